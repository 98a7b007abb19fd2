// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Arena-backed syntax trees
//!
//! Nodes live in a slot arena and are addressed by `NodeId`. Ids of live
//! nodes stay valid across rewrites; slots vacated by removed subtrees are
//! recycled through a free list. Every node other than the root has exactly
//! one parent, and the same value at two positions is two distinct nodes.

use crate::data::{Axiom, ClassExpression, ObjectPropertyExpression, Term};
use serde::{Deserialize, Serialize};

pub type NodeId = usize;

/// Structural position marker for nodes whose role is not implied by their value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoleTag {
    /// Left-hand side of a subsumption
    SubClass,
    /// Right-hand side of a subsumption
    SuperClass,
    /// Defined class of a disjoint union
    DisjointUnionClass,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeValue {
    Axiom(Axiom),
    Term(Term),
    /// Bound of a cardinality restriction
    Cardinality(u32),
    RoleChain(Vec<ObjectPropertyExpression>),
}

impl NodeValue {
    pub fn as_term(&self) -> Option<&Term> {
        match self {
            NodeValue::Term(term) => Some(term),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassExpression> {
        self.as_term().and_then(Term::as_class)
    }

    pub fn as_axiom(&self) -> Option<&Axiom> {
        match self {
            NodeValue::Axiom(axiom) => Some(axiom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub value: NodeValue,
    pub tag: Option<RoleTag>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SyntaxNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxTree {
    slots: Vec<Option<SyntaxNode>>,
    free: Vec<NodeId>,
    root: NodeId,
    live: usize,
}

impl SyntaxTree {
    /// Tree consisting of a single root node
    pub fn new(value: NodeValue, tag: Option<RoleTag>) -> Self {
        let mut tree = Self {
            slots: vec![],
            free: vec![],
            root: 0,
            live: 0,
        };
        tree.root = tree.alloc(SyntaxNode {
            value,
            tag,
            parent: None,
            children: vec![],
        });
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &SyntaxNode {
        self.node(self.root)
    }

    pub fn root_value(&self) -> &NodeValue {
        &self.root_node().value
    }

    /// Number of nodes: the encoding size of the value the tree represents
    pub fn size(&self) -> usize {
        self.live
    }

    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        self.get(id)
            .unwrap_or_else(|| panic!("BUG: node {} is not part of the tree", id))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut SyntaxNode {
        self.slots
            .get_mut(id)
            .and_then(Option::as_mut)
            .unwrap_or_else(|| panic!("BUG: node {} is not part of the tree", id))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Live nodes in pre-order, starting at the root
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.live);
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    /// Number of edges between `id` and the root
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Appends a new child under `parent`
    pub fn add_child(&mut self, parent: NodeId, value: NodeValue, tag: Option<RoleTag>) -> NodeId {
        let id = self.alloc(SyntaxNode {
            value,
            tag,
            parent: Some(parent),
            children: vec![],
        });
        self.node_mut(parent).children.push(id);
        id
    }

    pub fn set_value(&mut self, id: NodeId, value: NodeValue) {
        self.node_mut(id).value = value;
    }

    pub fn set_tag(&mut self, id: NodeId, tag: Option<RoleTag>) {
        self.node_mut(id).tag = tag;
    }

    /// Replaces the subtree rooted at `old` by a copy of `replacement`, in the same child slot.
    /// Returns the id of the copied replacement root.
    pub fn replace_subtree(&mut self, old: NodeId, replacement: &SyntaxTree) -> NodeId {
        let Some(parent) = self.parent(old) else {
            *self = replacement.clone();
            return self.root;
        };
        let slot = self
            .children(parent)
            .iter()
            .position(|child| *child == old)
            .unwrap_or_else(|| panic!("BUG: node {} missing from its parent's children", old));

        self.remove_subtree(old);
        let grafted = self.graft(parent, replacement);
        let children = &mut self.node_mut(parent).children;
        // graft appended the new root; move it into the vacated slot
        let appended = children.pop();
        debug_assert_eq!(appended, Some(grafted));
        children[slot] = grafted;
        grafted
    }

    /// Detaches the subtree at `id` from its parent and frees its slots
    pub fn remove_child(&mut self, id: NodeId) {
        let parent = self
            .parent(id)
            .unwrap_or_else(|| panic!("BUG: node {} is the root and cannot be detached", id));
        self.node_mut(parent).children.retain(|child| *child != id);
        self.remove_subtree(id);
    }

    /// Structural equality: same values, tags and child order at every position
    pub fn same_structure(&self, other: &SyntaxTree) -> bool {
        self.size() == other.size() && self.same_subtree(self.root, other, other.root)
    }

    fn same_subtree(&self, id: NodeId, other: &SyntaxTree, other_id: NodeId) -> bool {
        let (mine, theirs) = (self.node(id), other.node(other_id));
        mine.value == theirs.value
            && mine.tag == theirs.tag
            && mine.children.len() == theirs.children.len()
            && mine
                .children
                .iter()
                .zip(&theirs.children)
                .all(|(child, other_child)| self.same_subtree(*child, other, *other_child))
    }

    fn alloc(&mut self, node: SyntaxNode) -> NodeId {
        self.live += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Frees every slot of the subtree at `id`; the parent's child list is left for the caller
    fn remove_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.slots[current].take() {
                stack.extend(node.children);
                self.free.push(current);
                self.live -= 1;
            }
        }
    }

    /// Copies `other` under `parent` as its last child
    fn graft(&mut self, parent: NodeId, other: &SyntaxTree) -> NodeId {
        let other_root = other.root_node();
        let root = self.add_child(parent, other_root.value.clone(), other_root.tag);
        let mut stack = vec![(other.root, root)];
        while let Some((source, target)) = stack.pop() {
            for child in other.children(source) {
                let node = other.node(*child);
                let copied = self.add_child(target, node.value.clone(), node.tag);
                stack.push((*child, copied));
            }
        }
        root
    }
}
