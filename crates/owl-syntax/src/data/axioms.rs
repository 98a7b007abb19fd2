// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use super::{ClassExpression, Iri};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Class-expression axiom, compared structurally with annotations already stripped
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axiom {
    SubClassOf {
        sub: ClassExpression,
        sup: ClassExpression,
    },
    EquivalentClasses(BTreeSet<ClassExpression>),
    DisjointClasses(BTreeSet<ClassExpression>),
    /// `class` is the disjoint union of `disjuncts`
    DisjointUnion {
        class: Iri,
        disjuncts: BTreeSet<ClassExpression>,
    },
}

impl Axiom {
    pub fn sub_class_of(sub: ClassExpression, sup: ClassExpression) -> Self {
        Self::SubClassOf { sub, sup }
    }

    pub fn equivalent(operands: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::EquivalentClasses(operands.into_iter().collect())
    }

    pub fn disjoint(operands: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::DisjointClasses(operands.into_iter().collect())
    }

    pub fn disjoint_union(
        class: impl Into<Iri>,
        disjuncts: impl IntoIterator<Item = ClassExpression>,
    ) -> Self {
        Self::DisjointUnion {
            class: class.into(),
            disjuncts: disjuncts.into_iter().collect(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::SubClassOf { .. } => "SubClassOf",
            Self::EquivalentClasses(_) => "EquivalentClasses",
            Self::DisjointClasses(_) => "DisjointClasses",
            Self::DisjointUnion { .. } => "DisjointUnion",
        }
    }

    /// Top-level class expression operands; the defined class of a disjoint union is not one
    pub fn operands(&self) -> Vec<&ClassExpression> {
        match self {
            Self::SubClassOf { sub, sup } => vec![sub, sup],
            Self::EquivalentClasses(operands) | Self::DisjointClasses(operands) => {
                operands.iter().collect()
            }
            Self::DisjointUnion { disjuncts, .. } => disjuncts.iter().collect(),
        }
    }

    /// Every class expression occurring in the axiom, including a disjoint union's defined class
    pub fn nested_class_expressions(&self) -> BTreeSet<ClassExpression> {
        let mut nested = BTreeSet::new();
        if let Self::DisjointUnion { class, .. } = self {
            nested.insert(ClassExpression::Class(class.clone()));
        }
        for operand in self.operands() {
            operand.collect_nested(&mut nested);
        }
        nested
    }

    pub fn classes_in_signature(&self) -> BTreeSet<Iri> {
        let mut named = BTreeSet::new();
        if let Self::DisjointUnion { class, .. } = self {
            named.insert(class.clone());
        }
        for operand in self.operands() {
            operand.collect_named(&mut named);
        }
        named
    }

    pub fn contains_complement(&self) -> bool {
        self.operands()
            .into_iter()
            .any(|operand| operand.contains_complement())
    }

    /// Reject axioms the loader should never have produced
    pub fn check_well_formed(&self) -> anyhow::Result<()> {
        match self {
            Self::SubClassOf { .. } => {}
            Self::EquivalentClasses(operands) | Self::DisjointClasses(operands) => {
                anyhow::ensure!(
                    operands.len() >= 2,
                    "{} needs at least two distinct operands, found {}",
                    self.kind_name(),
                    operands.len()
                );
            }
            Self::DisjointUnion { class, disjuncts } => {
                anyhow::ensure!(
                    disjuncts.len() >= 2,
                    "disjoint union of {} needs at least two disjuncts, found {}",
                    class,
                    disjuncts.len()
                );
            }
        }
        for operand in self.operands() {
            operand.check_well_formed()?;
        }
        Ok(())
    }
}
