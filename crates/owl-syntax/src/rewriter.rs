// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! In-place term rewriting over syntax trees
//!
//! Every term node equal to the target is replaced by a freshly built tree
//! of the replacement. The replaced node's role tag moves onto the new
//! subtree root, and the payloads of all ancestors of a splice point are
//! re-derived so the tree keeps encoding a well-formed value.
//!
//! Matches are never nested: two nodes holding equal values encode subtrees
//! of equal size, and a proper descendant is always strictly smaller.

use crate::codec;
use crate::data::Term;
use crate::tree::{NodeValue, RoleTag, SyntaxTree};
use log::{debug, warn};

/// Replaces every occurrence of `target` in `tree` by `replacement`.
/// Returns the number of substituted positions; an absent target leaves the tree untouched.
pub fn rewrite(tree: &mut SyntaxTree, target: &Term, replacement: &Term) -> usize {
    if !target.same_category(replacement) {
        warn!("refusing to rewrite {} with {}: different term kinds", target, replacement);
        return 0;
    }

    let matches: Vec<_> = tree
        .preorder()
        .into_iter()
        .filter(|id| matches!(&tree.node(*id).value, NodeValue::Term(term) if term == target))
        .collect();
    if matches.is_empty() {
        return 0;
    }

    let replacement_is_named = replacement.as_class().map_or(false, |class| class.is_named());
    let mut spliced = vec![];
    for id in matches {
        let tag = tree.node(id).tag;
        if tag == Some(RoleTag::DisjointUnionClass) && !replacement_is_named {
            debug!("keeping disjoint union class {}: {} is not a named class", target, replacement);
            continue;
        }

        let fresh = codec::build_tagged(&NodeValue::Term(replacement.clone()), tag);
        let parent = tree.parent(id);
        tree.replace_subtree(id, &fresh);
        match parent {
            Some(parent) => spliced.push(parent),
            // the whole tree was the match
            None => return 1,
        }
    }

    let count = spliced.len();
    codec::refresh_ancestors(tree, spliced);
    count
}
