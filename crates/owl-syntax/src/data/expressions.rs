// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use super::Iri;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectPropertyExpression {
    ObjectProperty(Iri),
    /// Inverse of a named object property
    InverseObjectProperty(Iri),
}

impl ObjectPropertyExpression {
    pub fn named(iri: impl Into<Iri>) -> Self {
        Self::ObjectProperty(iri.into())
    }

    pub fn inverse(iri: impl Into<Iri>) -> Self {
        Self::InverseObjectProperty(iri.into())
    }

    /// The named property underneath, inverted or not
    pub fn named_property(&self) -> &Iri {
        match self {
            Self::ObjectProperty(iri) | Self::InverseObjectProperty(iri) => iri,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Individual {
    Named(Iri),
    /// Blank-node individual, identified by its node id
    Anonymous(String),
}

impl Individual {
    pub fn named(iri: impl Into<Iri>) -> Self {
        Self::Named(iri.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Literal {
    Plain(String),
    LanguageTagged { value: String, language: String },
    Typed { value: String, datatype: Iri },
}

impl Literal {
    pub fn typed(value: impl Into<String>, datatype: impl Into<Iri>) -> Self {
        Self::Typed {
            value: value.into(),
            datatype: datatype.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FacetRestriction {
    pub facet: Iri,
    pub value: Literal,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataRange {
    Datatype(Iri),
    DataOneOf(BTreeSet<Literal>),
    DataComplementOf(Box<DataRange>),
    DataIntersectionOf(BTreeSet<DataRange>),
    DataUnionOf(BTreeSet<DataRange>),
    DatatypeRestriction {
        datatype: Iri,
        restrictions: BTreeSet<FacetRestriction>,
    },
}

impl DataRange {
    pub fn datatype(iri: impl Into<Iri>) -> Self {
        Self::Datatype(iri.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardinalityKind {
    Min,
    Max,
    Exact,
}

/// Class expression: a term describing a set of individuals
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassExpression {
    /// Named atomic concept
    Class(Iri),

    /// Logical complement
    ObjectComplementOf(Box<ClassExpression>),

    ObjectIntersectionOf(BTreeSet<ClassExpression>),
    ObjectUnionOf(BTreeSet<ClassExpression>),

    /// Enumeration of individuals
    ObjectOneOf(BTreeSet<Individual>),

    /// Existential restriction
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// Universal restriction
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    ObjectHasValue {
        property: ObjectPropertyExpression,
        individual: Individual,
    },

    ObjectHasSelf(ObjectPropertyExpression),

    /// Min/max/exact cardinality; unqualified when `filler` is `None`
    ObjectCardinality {
        kind: CardinalityKind,
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },

    DataSomeValuesFrom {
        property: Iri,
        range: DataRange,
    },

    DataAllValuesFrom {
        property: Iri,
        range: DataRange,
    },

    DataHasValue {
        property: Iri,
        value: Literal,
    },

    DataCardinality {
        kind: CardinalityKind,
        cardinality: u32,
        property: Iri,
        range: Option<DataRange>,
    },
}

impl ClassExpression {
    pub fn class(iri: impl Into<Iri>) -> Self {
        Self::Class(iri.into())
    }

    pub fn not(operand: ClassExpression) -> Self {
        Self::ObjectComplementOf(Box::new(operand))
    }

    pub fn and(operands: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::ObjectIntersectionOf(operands.into_iter().collect())
    }

    pub fn or(operands: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::ObjectUnionOf(operands.into_iter().collect())
    }

    pub fn one_of(individuals: impl IntoIterator<Item = Individual>) -> Self {
        Self::ObjectOneOf(individuals.into_iter().collect())
    }

    pub fn some(property: ObjectPropertyExpression, filler: ClassExpression) -> Self {
        Self::ObjectSomeValuesFrom {
            property,
            filler: Box::new(filler),
        }
    }

    pub fn only(property: ObjectPropertyExpression, filler: ClassExpression) -> Self {
        Self::ObjectAllValuesFrom {
            property,
            filler: Box::new(filler),
        }
    }

    pub fn cardinality(
        kind: CardinalityKind,
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<ClassExpression>,
    ) -> Self {
        Self::ObjectCardinality {
            kind,
            cardinality,
            property,
            filler: filler.map(Box::new),
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Self::Class(_))
    }

    pub fn as_named(&self) -> Option<&Iri> {
        match self {
            Self::Class(iri) => Some(iri),
            _ => None,
        }
    }

    /// Class expressions appearing directly beneath this one
    pub fn operands(&self) -> Vec<&ClassExpression> {
        match self {
            Self::ObjectComplementOf(operand) => vec![&**operand],
            Self::ObjectIntersectionOf(operands) | Self::ObjectUnionOf(operands) => {
                operands.iter().collect()
            }
            Self::ObjectSomeValuesFrom { filler, .. } | Self::ObjectAllValuesFrom { filler, .. } => {
                vec![&**filler]
            }
            Self::ObjectCardinality {
                filler: Some(filler),
                ..
            } => vec![&**filler],
            _ => vec![],
        }
    }

    /// Every class expression occurring in this one, itself included
    pub fn nested(&self) -> BTreeSet<ClassExpression> {
        let mut nested = BTreeSet::new();
        self.collect_nested(&mut nested);
        nested
    }

    pub(crate) fn collect_nested(&self, nested: &mut BTreeSet<ClassExpression>) {
        if nested.insert(self.clone()) {
            for operand in self.operands() {
                operand.collect_nested(nested);
            }
        }
    }

    /// Named concepts occurring anywhere in this expression
    pub fn named_classes(&self) -> BTreeSet<Iri> {
        let mut named = BTreeSet::new();
        self.collect_named(&mut named);
        named
    }

    pub(crate) fn collect_named(&self, named: &mut BTreeSet<Iri>) {
        match self {
            Self::Class(iri) => {
                named.insert(iri.clone());
            }
            _ => {
                for operand in self.operands() {
                    operand.collect_named(named);
                }
            }
        }
    }

    pub fn contains_complement(&self) -> bool {
        matches!(self, Self::ObjectComplementOf(_))
            || self.operands().into_iter().any(|operand| operand.contains_complement())
    }

    pub(crate) fn check_well_formed(&self) -> anyhow::Result<()> {
        match self {
            Self::ObjectIntersectionOf(operands) | Self::ObjectUnionOf(operands) => {
                anyhow::ensure!(
                    operands.len() >= 2,
                    "`{}` needs at least two operands",
                    self
                );
            }
            Self::ObjectOneOf(individuals) => {
                anyhow::ensure!(!individuals.is_empty(), "empty individual enumeration");
            }
            Self::DataSomeValuesFrom { range, .. }
            | Self::DataAllValuesFrom { range, .. }
            | Self::DataCardinality {
                range: Some(range), ..
            } => range.check_well_formed()?,
            _ => {}
        }
        for operand in self.operands() {
            operand.check_well_formed()?;
        }
        Ok(())
    }
}

impl DataRange {
    fn check_well_formed(&self) -> anyhow::Result<()> {
        match self {
            Self::DataOneOf(literals) => {
                anyhow::ensure!(!literals.is_empty(), "empty literal enumeration")
            }
            Self::DataIntersectionOf(ranges) | Self::DataUnionOf(ranges) => {
                anyhow::ensure!(ranges.len() >= 2, "`{}` needs at least two operands", self);
                for range in ranges {
                    range.check_well_formed()?;
                }
            }
            Self::DataComplementOf(range) => range.check_well_formed()?,
            Self::Datatype(_) | Self::DatatypeRestriction { .. } => {}
        }
        Ok(())
    }
}

/// Any value that can sit in a term position of a syntax tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Class(ClassExpression),
    ObjectProperty(ObjectPropertyExpression),
    DataProperty(Iri),
    Individual(Individual),
    Literal(Literal),
    DataRange(DataRange),
    Facet(FacetRestriction),
}

impl Term {
    pub fn as_class(&self) -> Option<&ClassExpression> {
        match self {
            Term::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Whether both terms can occupy the same kind of position
    pub fn same_category(&self, other: &Term) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<ClassExpression> for Term {
    fn from(class: ClassExpression) -> Self {
        Term::Class(class)
    }
}

impl From<ObjectPropertyExpression> for Term {
    fn from(property: ObjectPropertyExpression) -> Self {
        Term::ObjectProperty(property)
    }
}

impl From<Individual> for Term {
    fn from(individual: Individual) -> Self {
        Term::Individual(individual)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl From<DataRange> for Term {
    fn from(range: DataRange) -> Self {
        Term::DataRange(range)
    }
}

impl From<FacetRestriction> for Term {
    fn from(facet: FacetRestriction) -> Self {
        Term::Facet(facet)
    }
}
