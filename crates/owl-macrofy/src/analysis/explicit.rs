// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Macros read from the ontology's own abbreviation axioms
//!
//! Every named class abbreviated by an equivalence axiom is a candidate. A
//! candidate becomes a macro when it has exactly one expansion and does not
//! take part in, or depend on, a definitional cycle. Its evaluation unfolds
//! the other macros its expansion mentions, breadth first over the
//! dependency graph, until no macro symbol is left.

use crate::analysis::definition_types::DefinitionIndex;
use crate::analysis::dependency::DependencyGraph;
use crate::macros::{decode_class, Macro, MacroSource, MacroTable};
use crate::options::MacroficationOptions;
use log::{debug, info};
use owl_syntax::{build_class, rewrite, Axiom, ClassExpression, Iri, Term};
use std::collections::{BTreeMap, BTreeSet};

pub struct ExplicitMacros {
    index: DefinitionIndex,
    dependencies: DependencyGraph,
    ambiguous: BTreeSet<Iri>,
    cyclic: BTreeSet<Iri>,
    table: MacroTable,
}

impl ExplicitMacros {
    pub fn new<'a>(
        axioms: impl IntoIterator<Item = &'a Axiom>,
        options: &MacroficationOptions,
    ) -> Self {
        let index = DefinitionIndex::new(axioms);
        let dependencies = DependencyGraph::new(&index.abbreviations);

        let ambiguous: BTreeSet<Iri> = index
            .abbreviations
            .iter()
            .filter(|(_, expansions)| expansions.len() > 1)
            .map(|(symbol, _)| symbol.clone())
            .collect();
        let cyclic = dependencies.cyclic();

        let expansions: BTreeMap<Iri, ClassExpression> = index
            .abbreviations
            .iter()
            .filter(|(symbol, _)| !ambiguous.contains(*symbol) && !cyclic.contains(*symbol))
            .filter_map(|(symbol, expansions)| {
                let expansion = expansions.iter().next()?;
                Some((symbol.clone(), expansion.clone()))
            })
            .collect();

        let mut table = MacroTable::new();
        for (symbol, expansion) in &expansions {
            let evaluation = evaluate(symbol, &expansions, &dependencies);
            debug!("macro {} evaluates to {}", symbol, evaluation);
            table.insert(Macro {
                symbol: symbol.clone(),
                expansion: expansion.clone(),
                evaluation,
            });
        }
        table.minimize_definitions(options.explicit_definition_threshold);

        info!(
            "{} abbreviated classes: {} ambiguous, {} cyclic, {} macros",
            index.abbreviations.len(),
            ambiguous.len(),
            cyclic.len(),
            table.len()
        );

        Self {
            index,
            dependencies,
            ambiguous,
            cyclic,
            table,
        }
    }

    pub fn index(&self) -> &DefinitionIndex {
        &self.index
    }

    pub fn dependencies(&self) -> &DependencyGraph {
        &self.dependencies
    }

    /// Candidates with more than one distinct expansion
    pub fn ambiguous(&self) -> &BTreeSet<Iri> {
        &self.ambiguous
    }

    /// Candidates in, or depending on, a definitional cycle
    pub fn cyclic(&self) -> &BTreeSet<Iri> {
        &self.cyclic
    }

    pub fn is_macro(&self, symbol: &Iri) -> bool {
        self.table.contains(symbol)
    }

    /// Abbreviation axioms of the symbols that became macros
    pub fn non_cyclic_non_ambiguous_definitions(&self) -> BTreeSet<Axiom> {
        self.index
            .definitions
            .iter()
            .filter(|(symbol, _)| !self.ambiguous.contains(*symbol) && !self.cyclic.contains(*symbol))
            .flat_map(|(_, axioms)| axioms.iter().cloned())
            .collect()
    }
}

impl MacroSource for ExplicitMacros {
    fn name(&self) -> &'static str {
        "explicit"
    }

    fn macros(&self) -> &MacroTable {
        &self.table
    }

    fn is_definition(&self, axiom: &Axiom) -> bool {
        self.index.is_definition(axiom)
    }
}

/// Unfolds the macros in `symbol`'s expansion one dependency level at a time
fn evaluate(
    symbol: &Iri,
    expansions: &BTreeMap<Iri, ClassExpression>,
    dependencies: &DependencyGraph,
) -> ClassExpression {
    let mut tree = build_class(&expansions[symbol]);
    let mut frontier = dependencies.direct_dependencies(symbol);
    let mut level = 0;
    while !frontier.is_empty() {
        let mut next = BTreeSet::new();
        for dependency in &frontier {
            next.extend(dependencies.direct_dependencies(dependency));
            if let Some(expansion) = expansions.get(dependency) {
                rewrite(
                    &mut tree,
                    &Term::Class(ClassExpression::Class(dependency.clone())),
                    &Term::Class(expansion.clone()),
                );
            }
        }
        frontier = next;
        level += 1;
        // acyclic below a macro, so no path is longer than the candidate count
        debug_assert!(level <= dependencies.len(), "unbounded unfolding of {}", symbol);
    }
    decode_class(&tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owl_syntax::ObjectPropertyExpression;

    fn class(name: &str) -> ClassExpression {
        ClassExpression::class(name)
    }

    fn some(role: &str, filler: ClassExpression) -> ClassExpression {
        ClassExpression::some(ObjectPropertyExpression::named(role), filler)
    }

    fn resolve(axioms: &[Axiom]) -> ExplicitMacros {
        ExplicitMacros::new(axioms, &MacroficationOptions::default())
    }

    #[test]
    fn test_single_abbreviation_is_macro() {
        let macros = resolve(&[Axiom::equivalent([class("M"), some("r", class("C"))])]);

        assert!(macros.is_macro(&Iri::new("M")));
        assert_eq!(macros.macros().evaluation(&Iri::new("M")), Some(&some("r", class("C"))));
    }

    #[test]
    fn test_ambiguous_abbreviation_is_excluded() {
        let first = Axiom::equivalent([class("N"), some("r", class("C"))]);
        let second = Axiom::equivalent([class("N"), some("r", class("D"))]);
        let valid = Axiom::equivalent([class("M"), some("s", class("C"))]);
        let macros = resolve(&[first, second, valid.clone()]);

        assert!(macros.ambiguous().contains(&Iri::new("N")));
        assert!(!macros.is_macro(&Iri::new("N")));
        assert_eq!(macros.non_cyclic_non_ambiguous_definitions(), BTreeSet::from([valid]));
    }

    #[test]
    fn test_self_reference_is_cyclic() {
        let macros = resolve(&[Axiom::equivalent([class("N"), some("r", class("N"))])]);

        assert!(macros.cyclic().contains(&Iri::new("N")));
        assert!(macros.macros().is_empty());
        assert!(macros.non_cyclic_non_ambiguous_definitions().is_empty());
    }

    #[test]
    fn test_dependents_of_cycles_are_excluded() {
        let macros = resolve(&[
            Axiom::equivalent([class("A"), some("r", class("B"))]),
            Axiom::equivalent([class("B"), some("r", class("A"))]),
            Axiom::equivalent([class("D"), some("s", class("A"))]),
            Axiom::equivalent([class("E"), some("s", class("C"))]),
        ]);

        assert_eq!(
            macros.cyclic().iter().map(Iri::as_str).collect::<Vec<_>>(),
            vec!["A", "B", "D"]
        );
        assert!(macros.is_macro(&Iri::new("E")));
        assert_eq!(macros.macros().len(), 1);
    }

    #[test]
    fn test_evaluation_unfolds_every_level() {
        let macros = resolve(&[
            Axiom::equivalent([class("M"), some("r", ClassExpression::and([class("N"), class("P")]))]),
            Axiom::equivalent([class("N"), some("s", class("P"))]),
            Axiom::equivalent([class("P"), some("t", class("C"))]),
        ]);

        let p = some("t", class("C"));
        let n = some("s", p.clone());
        let m = some("r", ClassExpression::and([n.clone(), p.clone()]));
        let table = macros.macros();
        assert_eq!(table.evaluation(&Iri::new("P")), Some(&p));
        assert_eq!(table.evaluation(&Iri::new("N")), Some(&n));
        assert_eq!(table.evaluation(&Iri::new("M")), Some(&m));

        for entry in table.iter() {
            let free = entry.evaluation.named_classes();
            assert!(free.iter().all(|symbol| !macros.is_macro(symbol)), "{} is not unfolded", entry.symbol);
        }

        // minimal definitions fold back to the one-step definitions
        assert_eq!(
            table.minimal_definition(&Iri::new("M")),
            Some(&some("r", ClassExpression::and([class("N"), class("P")])))
        );
        assert_eq!(table.minimal_definition(&Iri::new("N")), Some(&some("s", class("P"))));
    }

    #[test]
    fn test_ambiguous_dependency_stays_free() {
        let macros = resolve(&[
            Axiom::equivalent([class("M"), some("r", class("N"))]),
            Axiom::equivalent([class("N"), some("s", class("C"))]),
            Axiom::equivalent([class("N"), some("t", class("C"))]),
        ]);

        assert_eq!(macros.macros().evaluation(&Iri::new("M")), Some(&some("r", class("N"))));
    }

    #[test]
    fn test_synonyms_and_compounds_are_not_candidates() {
        let macros = resolve(&[
            Axiom::equivalent([class("A"), class("B")]),
            Axiom::equivalent([class("A"), class("B"), some("r", class("C")), some("s", class("C"))]),
        ]);

        assert!(macros.macros().is_empty());
        assert!(macros.index().synonyms.contains_key(&Iri::new("A")));
    }
}
