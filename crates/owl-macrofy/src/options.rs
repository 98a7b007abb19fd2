// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MACRO_NAMESPACE: &str = "http://owl.generated.macro#m_";

#[derive(clap::Args, Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[clap(next_help_heading = "Macrofication Options")]
#[serde(default)]
pub struct MacroficationOptions {
    /// Sub-expressions of at most this size are never contracted in axioms
    #[clap(long = "contraction-threshold", default_value_t = 1)]
    pub contraction_threshold: usize,

    /// Smallest sub-expression size (exclusive) folded when minimizing explicit definitions
    #[clap(long = "explicit-definition-threshold", default_value_t = 1)]
    pub explicit_definition_threshold: usize,

    /// Smallest sub-expression size (exclusive) folded when minimizing discovered definitions
    #[clap(long = "implicit-definition-threshold", default_value_t = 2)]
    pub implicit_definition_threshold: usize,

    /// Discovered macros must be larger than this
    #[clap(long = "min-macro-size", default_value_t = 2)]
    pub min_macro_size: usize,

    /// Discovered macros must occur more often than this
    #[clap(long = "min-occurrences", default_value_t = 1)]
    pub min_occurrences: usize,

    /// Prefix of freshly minted macro symbols
    #[clap(long = "macro-namespace", default_value = DEFAULT_MACRO_NAMESPACE)]
    pub macro_namespace: String,
}

impl Default for MacroficationOptions {
    fn default() -> Self {
        Self {
            contraction_threshold: 1,
            explicit_definition_threshold: 1,
            implicit_definition_threshold: 2,
            min_macro_size: 2,
            min_occurrences: 1,
            macro_namespace: DEFAULT_MACRO_NAMESPACE.to_string(),
        }
    }
}

impl MacroficationOptions {
    /// Reads options from a TOML document; absent keys keep their defaults
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        let options: Self = toml::from_str(source).context("invalid macrofication options")?;
        anyhow::ensure!(
            !options.macro_namespace.is_empty(),
            "macro namespace must not be empty"
        );
        Ok(options)
    }
}
