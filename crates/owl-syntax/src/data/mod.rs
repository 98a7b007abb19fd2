// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Term model
//!
//! Immutable values for class expressions, property expressions, individuals,
//! literals and data ranges, together with the four class-expression axiom
//! kinds. All values compare and hash structurally; unordered operand lists
//! are stored as ordered sets so construction order never matters.

pub mod axioms;
pub mod display;
pub mod expressions;

pub use axioms::Axiom;
pub use expressions::{
    CardinalityKind, ClassExpression, DataRange, FacetRestriction, Individual, Literal,
    ObjectPropertyExpression, Term,
};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Internationalized resource identifier naming a class, property, datatype or individual
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Iri(Arc<str>);

impl Iri {
    pub fn new(iri: impl AsRef<str>) -> Self {
        Self(Arc::from(iri.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Iri {
    fn from(iri: &str) -> Self {
        Self::new(iri)
    }
}

impl From<String> for Iri {
    fn from(iri: String) -> Self {
        Self(Arc::from(iri))
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Well-known vocabulary
pub mod vocabulary {
    pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
}
