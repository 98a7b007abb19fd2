// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

pub mod definition_types;
pub mod dependency;
pub mod explicit;
pub mod implicit;

pub use definition_types::{DefinitionIndex, DefinitionKind};
pub use dependency::DependencyGraph;
pub use explicit::ExplicitMacros;
pub use implicit::{CorpusStatistics, ImplicitMacros};
