// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Functional-style rendering of terms and axioms

use super::*;
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl Display for ObjectPropertyExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjectProperty(iri) => write!(f, "{}", iri),
            Self::InverseObjectProperty(iri) => write!(f, "ObjectInverseOf({})", iri),
        }
    }
}

impl Display for Individual {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(iri) => write!(f, "{}", iri),
            Self::Anonymous(id) => write!(f, "_:{}", id),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(value) => write!(f, "{:?}", value),
            Self::LanguageTagged { value, language } => write!(f, "{:?}@{}", value, language),
            Self::Typed { value, datatype } => write!(f, "{:?}^^{}", value, datatype),
        }
    }
}

impl Display for FacetRestriction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.facet, self.value)
    }
}

impl Display for DataRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Datatype(iri) => write!(f, "{}", iri),
            Self::DataOneOf(literals) => write!(f, "DataOneOf({})", literals.iter().join(" ")),
            Self::DataComplementOf(range) => write!(f, "DataComplementOf({})", range),
            Self::DataIntersectionOf(ranges) => {
                write!(f, "DataIntersectionOf({})", ranges.iter().join(" "))
            }
            Self::DataUnionOf(ranges) => write!(f, "DataUnionOf({})", ranges.iter().join(" ")),
            Self::DatatypeRestriction {
                datatype,
                restrictions,
            } => write!(
                f,
                "DatatypeRestriction({} {})",
                datatype,
                restrictions.iter().join(" ")
            ),
        }
    }
}

fn cardinality_keyword(prefix: &str, kind: CardinalityKind) -> String {
    let bound = match kind {
        CardinalityKind::Min => "Min",
        CardinalityKind::Max => "Max",
        CardinalityKind::Exact => "Exact",
    };
    format!("{}{}Cardinality", prefix, bound)
}

impl Display for ClassExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(iri) => write!(f, "{}", iri),
            Self::ObjectComplementOf(operand) => write!(f, "ObjectComplementOf({})", operand),
            Self::ObjectIntersectionOf(operands) => {
                write!(f, "ObjectIntersectionOf({})", operands.iter().join(" "))
            }
            Self::ObjectUnionOf(operands) => {
                write!(f, "ObjectUnionOf({})", operands.iter().join(" "))
            }
            Self::ObjectOneOf(individuals) => {
                write!(f, "ObjectOneOf({})", individuals.iter().join(" "))
            }
            Self::ObjectSomeValuesFrom { property, filler } => {
                write!(f, "ObjectSomeValuesFrom({} {})", property, filler)
            }
            Self::ObjectAllValuesFrom { property, filler } => {
                write!(f, "ObjectAllValuesFrom({} {})", property, filler)
            }
            Self::ObjectHasValue {
                property,
                individual,
            } => write!(f, "ObjectHasValue({} {})", property, individual),
            Self::ObjectHasSelf(property) => write!(f, "ObjectHasSelf({})", property),
            Self::ObjectCardinality {
                kind,
                cardinality,
                property,
                filler,
            } => {
                write!(f, "{}({} {}", cardinality_keyword("Object", *kind), cardinality, property)?;
                if let Some(filler) = filler {
                    write!(f, " {}", filler)?;
                }
                write!(f, ")")
            }
            Self::DataSomeValuesFrom { property, range } => {
                write!(f, "DataSomeValuesFrom({} {})", property, range)
            }
            Self::DataAllValuesFrom { property, range } => {
                write!(f, "DataAllValuesFrom({} {})", property, range)
            }
            Self::DataHasValue { property, value } => {
                write!(f, "DataHasValue({} {})", property, value)
            }
            Self::DataCardinality {
                kind,
                cardinality,
                property,
                range,
            } => {
                write!(f, "{}({} {}", cardinality_keyword("Data", *kind), cardinality, property)?;
                if let Some(range) = range {
                    write!(f, " {}", range)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Term::Class(class) => write!(f, "{}", class),
            Term::ObjectProperty(property) => write!(f, "{}", property),
            Term::DataProperty(property) => write!(f, "{}", property),
            Term::Individual(individual) => write!(f, "{}", individual),
            Term::Literal(literal) => write!(f, "{}", literal),
            Term::DataRange(range) => write!(f, "{}", range),
            Term::Facet(facet) => write!(f, "{}", facet),
        }
    }
}

impl Display for Axiom {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubClassOf { sub, sup } => write!(f, "SubClassOf({} {})", sub, sup),
            Self::EquivalentClasses(operands) | Self::DisjointClasses(operands) => {
                write!(f, "{}({})", self.kind_name(), operands.iter().join(" "))
            }
            Self::DisjointUnion { class, disjuncts } => {
                write!(f, "DisjointUnion({} {})", class, disjuncts.iter().join(" "))
            }
        }
    }
}
