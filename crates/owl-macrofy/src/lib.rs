// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Macro compression of ontology axioms
//!
//! Macros either come from the ontology's own abbreviation axioms
//! (`ExplicitMacros`) or are discovered from repeated sub-expressions
//! (`ImplicitMacros`). A `Macrofier` then rewrites each axiom with the
//! macros of one source, and `run_explicit` / `run_implicit` do both steps
//! for a whole `Ontology`.

pub mod analysis;
pub mod macrofication;
pub mod macros;
pub mod ontology;
pub mod options;

pub use analysis::{ExplicitMacros, ImplicitMacros};
pub use macrofication::{
    run_explicit, run_implicit, AxiomMacrofication, Macrofication, MacroficationSummary, Macrofier,
};
pub use macros::{Macro, MacroSource, MacroTable, SymbolGenerator};
pub use ontology::{compare, AxiomSetDiff, Ontology};
pub use options::MacroficationOptions;
