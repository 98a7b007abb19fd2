// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Classification of equivalence axioms by how many of their operands are named

use owl_syntax::{Axiom, ClassExpression, Iri};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefinitionKind {
    /// One named class equivalent to one complex expression
    SimpleAbbreviation,
    /// Two named classes
    SimpleSynonym,
    /// One named class equivalent to several complex expressions
    AmbiguousAbbreviation,
    /// More than two operands, all named
    EnumerativeSynonym,
    /// At least two named and two complex operands
    CompoundDefinition,
}

impl DefinitionKind {
    /// Classifies an equivalence axiom; `None` for every other axiom and unclassified shapes
    pub fn of(axiom: &Axiom) -> Option<Self> {
        let Axiom::EquivalentClasses(operands) = axiom else {
            return None;
        };
        let total = operands.len();
        let named = operands.iter().filter(|operand| operand.is_named()).count();
        let complex = total - named;

        match (total, named) {
            (2, 1) => Some(Self::SimpleAbbreviation),
            (2, 2) => Some(Self::SimpleSynonym),
            (t, 1) if t > 2 => Some(Self::AmbiguousAbbreviation),
            (t, n) if t > 2 && n == t => Some(Self::EnumerativeSynonym),
            (t, n) if t > 3 && n >= 2 && complex >= 2 => Some(Self::CompoundDefinition),
            _ => None,
        }
    }

    pub fn is_abbreviation(self) -> bool {
        matches!(self, Self::SimpleAbbreviation | Self::AmbiguousAbbreviation)
    }

    pub fn is_synonym(self) -> bool {
        matches!(self, Self::SimpleSynonym | Self::EnumerativeSynonym)
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SimpleAbbreviation => "simple abbreviation",
            Self::SimpleSynonym => "simple synonym",
            Self::AmbiguousAbbreviation => "ambiguous abbreviation",
            Self::EnumerativeSynonym => "enumerative synonym",
            Self::CompoundDefinition => "compound definition",
        };
        write!(f, "{}", name)
    }
}

/// Named classes indexed by the equivalence axioms that abbreviate or rename them
#[derive(Debug, Clone, Default)]
pub struct DefinitionIndex {
    /// named class -> its distinct complex expansions
    pub abbreviations: BTreeMap<Iri, BTreeSet<ClassExpression>>,
    /// named class -> the abbreviation axioms defining it
    pub definitions: BTreeMap<Iri, BTreeSet<Axiom>>,
    /// named class -> named classes declared equivalent to it
    pub synonyms: BTreeMap<Iri, BTreeSet<Iri>>,
    pub kinds: BTreeMap<Axiom, DefinitionKind>,
}

impl DefinitionIndex {
    pub fn new<'a>(axioms: impl IntoIterator<Item = &'a Axiom>) -> Self {
        let mut index = Self::default();
        for axiom in axioms {
            let Some(kind) = DefinitionKind::of(axiom) else {
                continue;
            };
            index.kinds.insert(axiom.clone(), kind);

            let Axiom::EquivalentClasses(operands) = axiom else {
                continue;
            };
            let (named, complex): (Vec<_>, Vec<_>) =
                operands.iter().partition(|operand| operand.is_named());
            let named: Vec<&Iri> = named.into_iter().filter_map(ClassExpression::as_named).collect();

            if kind.is_abbreviation() {
                let symbol = named[0].clone();
                index
                    .abbreviations
                    .entry(symbol.clone())
                    .or_default()
                    .extend(complex.into_iter().cloned());
                index
                    .definitions
                    .entry(symbol)
                    .or_default()
                    .insert(axiom.clone());
            } else if kind.is_synonym() {
                for symbol in &named {
                    let others = named.iter().filter(|other| *other != symbol).map(|other| (*other).clone());
                    index
                        .synonyms
                        .entry((*symbol).clone())
                        .or_default()
                        .extend(others);
                }
            }
        }
        index
    }

    /// Whether `axiom` abbreviates some named class
    pub fn is_definition(&self, axiom: &Axiom) -> bool {
        self.kinds.get(axiom).map_or(false, |kind| kind.is_abbreviation())
    }

    pub fn count(&self, kind: DefinitionKind) -> usize {
        self.kinds.values().filter(|k| **k == kind).count()
    }
}
