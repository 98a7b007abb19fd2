// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Macros discovered from repeated sub-expressions
//!
//! Every class expression of the corpus is counted by the number of tree
//! positions it occupies. An expression is worth a macro when it is large
//! enough, occurs more than once, and is not dominated: no expression
//! containing it occurs exactly as often, which would make the larger one
//! the better macro. Candidates are named bottom up by nesting level.
//!
//! Axioms containing a complement are left out of the corpus.

use crate::macros::{Macro, MacroSource, MacroTable, SymbolGenerator};
use crate::options::MacroficationOptions;
use log::{debug, info};
use owl_syntax::{build_axiom, class_size, Axiom, ClassExpression};
use std::collections::{BTreeMap, BTreeSet};

/// Occurrence, size and containment facts over a set of axioms
#[derive(Debug, Clone, Default)]
pub struct CorpusStatistics {
    occurrences: BTreeMap<ClassExpression, usize>,
    sizes: BTreeMap<ClassExpression, usize>,
    /// expression -> every expression containing it
    parents: BTreeMap<ClassExpression, BTreeSet<ClassExpression>>,
    /// nesting level -> expressions; atomic expressions sit on level 0
    levels: BTreeMap<usize, BTreeSet<ClassExpression>>,
}

impl CorpusStatistics {
    pub fn collect<'a>(axioms: impl IntoIterator<Item = &'a Axiom>) -> Self {
        let mut statistics = Self::default();
        let mut children: BTreeMap<ClassExpression, BTreeSet<ClassExpression>> = BTreeMap::new();

        for axiom in axioms {
            let tree = build_axiom(axiom);
            for id in tree.preorder() {
                if let Some(class) = tree.node(id).value.as_class() {
                    *statistics.occurrences.entry(class.clone()).or_default() += 1;
                }
            }

            for expression in axiom.nested_class_expressions() {
                if children.contains_key(&expression) {
                    continue;
                }
                let mut nested = expression.nested();
                nested.remove(&expression);
                for child in &nested {
                    statistics
                        .parents
                        .entry(child.clone())
                        .or_default()
                        .insert(expression.clone());
                }
                statistics.sizes.insert(expression.clone(), class_size(&expression));
                children.insert(expression, nested);
            }
        }

        // descendants are strictly smaller, so ascending size visits them first
        let mut ascending: Vec<_> = statistics.sizes.iter().map(|(e, size)| (*size, e)).collect();
        ascending.sort();
        let mut level_of: BTreeMap<&ClassExpression, usize> = BTreeMap::new();
        for (_, expression) in ascending {
            let level = children[expression]
                .iter()
                .map(|child| level_of[child] + 1)
                .max()
                .unwrap_or(0);
            level_of.insert(expression, level);
        }
        for (expression, level) in level_of {
            statistics
                .levels
                .entry(level)
                .or_default()
                .insert(expression.clone());
        }
        statistics
    }

    pub fn occurrences(&self, expression: &ClassExpression) -> usize {
        self.occurrences.get(expression).copied().unwrap_or(0)
    }

    pub fn size(&self, expression: &ClassExpression) -> usize {
        self.sizes
            .get(expression)
            .copied()
            .unwrap_or_else(|| class_size(expression))
    }

    pub fn parents(&self, expression: &ClassExpression) -> Option<&BTreeSet<ClassExpression>> {
        self.parents.get(expression)
    }

    /// A containing expression occurring exactly as often as `expression`
    pub fn dominating_parent(&self, expression: &ClassExpression) -> Option<&ClassExpression> {
        let occurrences = self.occurrences(expression);
        self.parents(expression)?
            .iter()
            .find(|parent| self.occurrences(parent) == occurrences)
    }

    /// All distinct expressions, lowest nesting level first
    pub fn bottom_up(&self) -> impl Iterator<Item = &ClassExpression> {
        self.levels.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    fn is_candidate(&self, expression: &ClassExpression, options: &MacroficationOptions) -> bool {
        self.size(expression) > options.min_macro_size
            && self.occurrences(expression) > options.min_occurrences
            && self.dominating_parent(expression).is_none()
    }
}

pub struct ImplicitMacros {
    corpus: BTreeSet<Axiom>,
    excluded: BTreeSet<Axiom>,
    statistics: CorpusStatistics,
    table: MacroTable,
}

impl ImplicitMacros {
    pub fn new<'a>(
        axioms: impl IntoIterator<Item = &'a Axiom>,
        options: &MacroficationOptions,
    ) -> Self {
        let mut symbols = SymbolGenerator::new(options.macro_namespace.clone());
        Self::discover(axioms, options, &mut symbols)
    }

    /// Discovers macros, naming them with symbols from `symbols`
    pub fn discover<'a>(
        axioms: impl IntoIterator<Item = &'a Axiom>,
        options: &MacroficationOptions,
        symbols: &mut SymbolGenerator,
    ) -> Self {
        let (corpus, excluded): (BTreeSet<Axiom>, BTreeSet<Axiom>) = axioms
            .into_iter()
            .cloned()
            .partition(|axiom| !axiom.contains_complement());
        let statistics = CorpusStatistics::collect(&corpus);

        let mut table = MacroTable::new();
        for expression in statistics.bottom_up() {
            if !statistics.is_candidate(expression, options) {
                continue;
            }
            let symbol = symbols.fresh();
            debug!(
                "{} stands for {} ({} occurrences, size {})",
                symbol,
                expression,
                statistics.occurrences(expression),
                statistics.size(expression)
            );
            table.insert(Macro {
                symbol,
                expansion: expression.clone(),
                evaluation: expression.clone(),
            });
        }
        table.minimize_definitions(options.implicit_definition_threshold);

        info!(
            "discovered {} macros among {} expressions of {} axioms ({} with complements skipped)",
            table.len(),
            statistics.len(),
            corpus.len(),
            excluded.len()
        );

        Self {
            corpus,
            excluded,
            statistics,
            table,
        }
    }

    pub fn statistics(&self) -> &CorpusStatistics {
        &self.statistics
    }

    /// Axioms the statistics were gathered from
    pub fn corpus(&self) -> &BTreeSet<Axiom> {
        &self.corpus
    }

    /// Axioms left out for containing a complement
    pub fn excluded(&self) -> &BTreeSet<Axiom> {
        &self.excluded
    }
}

impl MacroSource for ImplicitMacros {
    fn name(&self) -> &'static str {
        "implicit"
    }

    fn macros(&self) -> &MacroTable {
        &self.table
    }

    fn is_definition(&self, _axiom: &Axiom) -> bool {
        false
    }

    fn covers(&self, axiom: &Axiom) -> bool {
        !axiom.contains_complement()
    }
}
