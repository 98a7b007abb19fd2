// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Class-expression terms and their syntax-tree encoding
//!
//! Values from `data` are lowered into arena-backed `SyntaxTree`s by the
//! `codec`, whose size (node count) is the measure every compression step
//! minimizes. The `rewriter` substitutes terms inside a tree in place.

pub mod codec;
pub mod data;
pub mod rewriter;
pub mod tree;

// Term model
pub use data::{
    Axiom, CardinalityKind, ClassExpression, DataRange, FacetRestriction, Individual, Iri,
    Literal, ObjectPropertyExpression, Term,
};

// Trees
pub use codec::{build, build_axiom, build_class, build_term, class_size, decode, size_buckets};
pub use rewriter::rewrite;
pub use tree::{NodeId, NodeValue, RoleTag, SyntaxNode, SyntaxTree};
