// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Macro tables shared by explicit and discovered macros
//!
//! A macro pairs a symbol with its one-step expansion and its evaluation
//! (the expansion with every other macro unfolded). Contraction folds
//! evaluations back into symbols, visiting sub-expressions largest first.

use log::debug;
use owl_syntax::{
    build_class, codec, rewrite, size_buckets, Axiom, ClassExpression, Iri, SyntaxTree, Term,
};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macro {
    pub symbol: Iri,
    pub expansion: ClassExpression,
    pub evaluation: ClassExpression,
}

#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    macros: BTreeMap<Iri, Macro>,
    // evaluation -> symbol folding it; the smallest symbol wins ties
    symbols: BTreeMap<ClassExpression, Iri>,
    minimal: BTreeMap<Iri, ClassExpression>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: Macro) {
        debug_assert!(!self.macros.contains_key(&entry.symbol));
        match self.symbols.entry(entry.evaluation.clone()) {
            Entry::Vacant(vacant) => {
                vacant.insert(entry.symbol.clone());
            }
            Entry::Occupied(mut occupied) => {
                if entry.symbol < *occupied.get() {
                    occupied.insert(entry.symbol.clone());
                }
            }
        }
        self.macros.insert(entry.symbol.clone(), entry);
    }

    pub fn get(&self, symbol: &Iri) -> Option<&Macro> {
        self.macros.get(symbol)
    }

    pub fn contains(&self, symbol: &Iri) -> bool {
        self.macros.contains_key(symbol)
    }

    pub fn evaluation(&self, symbol: &Iri) -> Option<&ClassExpression> {
        self.macros.get(symbol).map(|entry| &entry.evaluation)
    }

    /// Symbol folding `evaluation`, if any macro evaluates to it
    pub fn symbol_for(&self, evaluation: &ClassExpression) -> Option<&Iri> {
        self.symbols.get(evaluation)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Macro> {
        self.macros.values()
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Folds macro evaluations among `subexpressions` into their symbols, largest first.
    /// Sub-expressions of size at most `threshold` are never folded.
    pub fn contract(
        &self,
        tree: &mut SyntaxTree,
        subexpressions: &BTreeSet<ClassExpression>,
        threshold: usize,
    ) -> usize {
        let mut folded = 0;
        for (size, bucket) in size_buckets(subexpressions).iter().rev() {
            if *size <= threshold {
                break;
            }
            for expression in bucket {
                if let Some(symbol) = self.symbols.get(expression) {
                    folded += rewrite(
                        tree,
                        &Term::Class(expression.clone()),
                        &Term::Class(ClassExpression::Class(symbol.clone())),
                    );
                }
            }
        }
        folded
    }

    /// Replaces every macro symbol in `tree` by its evaluation
    pub fn expand(&self, tree: &mut SyntaxTree, signature: &BTreeSet<Iri>) -> usize {
        signature
            .iter()
            .filter_map(|symbol| self.macros.get(symbol))
            .map(|entry| {
                rewrite(
                    tree,
                    &Term::Class(ClassExpression::Class(entry.symbol.clone())),
                    &Term::Class(entry.evaluation.clone()),
                )
            })
            .sum()
    }

    /// Rewrites each evaluation with the symbols of the macros nested inside it
    pub fn minimize_definitions(&mut self, threshold: usize) {
        let minimal: BTreeMap<Iri, ClassExpression> = self
            .macros
            .values()
            .map(|entry| {
                let mut nested = entry.evaluation.nested();
                nested.remove(&entry.evaluation);

                let mut tree = build_class(&entry.evaluation);
                let folded = self.contract(&mut tree, &nested, threshold);
                debug!("minimal definition of {} folds {} sub-expressions", entry.symbol, folded);
                (entry.symbol.clone(), decode_class(&tree))
            })
            .collect();
        self.minimal = minimal;
    }

    /// Self-minimized definition; the evaluation until `minimize_definitions` has run
    pub fn minimal_definition(&self, symbol: &Iri) -> Option<&ClassExpression> {
        self.minimal.get(symbol).or_else(|| self.evaluation(symbol))
    }

    /// `EquivalentClasses(symbol, evaluation)` for every macro
    pub fn evaluation_axioms(&self) -> Vec<Axiom> {
        self.iter()
            .map(|entry| equivalence(&entry.symbol, entry.evaluation.clone()))
            .collect()
    }

    /// `EquivalentClasses(symbol, expansion)` for every macro
    pub fn expansion_axioms(&self) -> Vec<Axiom> {
        self.iter()
            .map(|entry| equivalence(&entry.symbol, entry.expansion.clone()))
            .collect()
    }

    /// `EquivalentClasses(symbol, minimal definition)` for every macro
    pub fn definition_axioms(&self) -> Vec<Axiom> {
        self.iter()
            .filter_map(|entry| {
                self.minimal_definition(&entry.symbol)
                    .map(|definition| equivalence(&entry.symbol, definition.clone()))
            })
            .collect()
    }
}

fn equivalence(symbol: &Iri, definition: ClassExpression) -> Axiom {
    Axiom::equivalent([ClassExpression::Class(symbol.clone()), definition])
}

/// Class expression encoded by a tree built from one
pub(crate) fn decode_class(tree: &SyntaxTree) -> ClassExpression {
    match codec::decode(tree) {
        owl_syntax::NodeValue::Term(Term::Class(class)) => class,
        other => panic!("BUG: class expression tree decoded to {:?}", other),
    }
}

/// Where macros come from: existing definitions or corpus statistics
pub trait MacroSource {
    fn name(&self) -> &'static str;

    fn macros(&self) -> &MacroTable;

    /// Axioms the macros were read from; these are never expanded
    fn is_definition(&self, axiom: &Axiom) -> bool;

    /// Whether `axiom` takes part in macrofication at all
    fn covers(&self, _axiom: &Axiom) -> bool {
        true
    }
}

/// Mints `<namespace>1`, `<namespace>2`, ... for discovered macros
#[derive(Debug, Clone)]
pub struct SymbolGenerator {
    namespace: String,
    next_id: usize,
}

impl SymbolGenerator {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            next_id: 1,
        }
    }

    pub fn fresh(&mut self) -> Iri {
        let symbol = Iri::from(format!("{}{}", self.namespace, self.next_id));
        self.next_id += 1;
        symbol
    }

    /// Number of symbols minted so far
    pub fn issued(&self) -> usize {
        self.next_id - 1
    }
}
