// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Axiom sets as handed over by a loader
//!
//! Ill-formed axioms are reported and discarded on entry so that nothing
//! downstream has to revalidate them.

use itertools::Itertools;
use log::warn;
use owl_syntax::{build_axiom, Axiom, Iri};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ontology {
    axioms: BTreeSet<Axiom>,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects well-formed axioms, logging and dropping the rest
    pub fn from_axioms(axioms: impl IntoIterator<Item = Axiom>) -> Self {
        let mut ontology = Self::new();
        for axiom in axioms {
            if let Err(error) = ontology.add_axiom(axiom) {
                warn!("discarding axiom: {:#}", error);
            }
        }
        ontology
    }

    /// Returns whether the axiom was new
    pub fn add_axiom(&mut self, axiom: Axiom) -> anyhow::Result<bool> {
        axiom.check_well_formed()?;
        Ok(self.axioms.insert(axiom))
    }

    pub fn axioms(&self) -> &BTreeSet<Axiom> {
        &self.axioms
    }

    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    pub fn classes_in_signature(&self) -> BTreeSet<Iri> {
        self.axioms
            .iter()
            .flat_map(Axiom::classes_in_signature)
            .collect()
    }

    /// Axioms free of class complements
    pub fn without_negations(&self) -> BTreeSet<Axiom> {
        self.axioms
            .iter()
            .filter(|axiom| !axiom.contains_complement())
            .cloned()
            .collect()
    }

    pub fn negation_count(&self) -> usize {
        self.axioms
            .iter()
            .filter(|axiom| axiom.contains_complement())
            .count()
    }

    /// Total encoding size of all axioms
    pub fn size(&self) -> usize {
        self.axioms.iter().map(|axiom| build_axiom(axiom).size()).sum()
    }
}

impl FromIterator<Axiom> for Ontology {
    fn from_iter<T: IntoIterator<Item = Axiom>>(iter: T) -> Self {
        Self::from_axioms(iter)
    }
}

/// Outcome of comparing two ontologies after dropping axioms with complements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxiomSetDiff {
    pub only_in_left: BTreeSet<Axiom>,
    pub only_in_right: BTreeSet<Axiom>,
}

impl AxiomSetDiff {
    pub fn is_equal(&self) -> bool {
        self.only_in_left.is_empty() && self.only_in_right.is_empty()
    }
}

impl fmt::Display for AxiomSetDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_equal() {
            return write!(f, "axiom sets are equal");
        }
        for axiom in self.only_in_left.iter().sorted_by_key(|axiom| axiom.to_string()) {
            writeln!(f, "- {}", axiom)?;
        }
        for axiom in self.only_in_right.iter().sorted_by_key(|axiom| axiom.to_string()) {
            writeln!(f, "+ {}", axiom)?;
        }
        Ok(())
    }
}

pub fn compare(left: &Ontology, right: &Ontology) -> AxiomSetDiff {
    let left = left.without_negations();
    let right = right.without_negations();
    AxiomSetDiff {
        only_in_left: left.difference(&right).cloned().collect(),
        only_in_right: right.difference(&left).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use owl_syntax::ClassExpression;

    fn class(name: &str) -> ClassExpression {
        ClassExpression::class(name)
    }

    #[test]
    fn test_ill_formed_axioms_are_discarded() {
        let ontology = Ontology::from_axioms([
            Axiom::sub_class_of(class("A"), class("B")),
            Axiom::equivalent([class("A")]),
            Axiom::disjoint_union("U", [class("A")]),
        ]);
        assert_eq!(ontology.len(), 1);
    }

    #[test]
    fn test_compare_ignores_negated_axioms() {
        let shared = Axiom::sub_class_of(class("A"), class("B"));
        let left = Ontology::from_axioms([
            shared.clone(),
            Axiom::sub_class_of(class("A"), ClassExpression::not(class("C"))),
        ]);
        let right = Ontology::from_axioms([shared]);

        let diff = compare(&left, &right);
        assert!(diff.is_equal());
        assert_eq!(left.negation_count(), 1);
    }

    #[test]
    fn test_compare_reports_missing_axioms() {
        let left = Ontology::from_axioms([
            Axiom::sub_class_of(class("A"), class("B")),
            Axiom::sub_class_of(class("B"), class("C")),
        ]);
        let right = Ontology::from_axioms([
            Axiom::sub_class_of(class("A"), class("B")),
            Axiom::disjoint([class("A"), class("C")]),
        ]);

        let diff = compare(&left, &right);
        assert!(!diff.is_equal());
        insta::assert_snapshot!(diff.to_string().trim_end(), @r###"
        - SubClassOf(<B> <C>)
        + DisjointClasses(<A> <C>)
        "###);
    }
}
