// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Per-axiom macrofication
//!
//! Each axiom is first expanded (every macro symbol replaced by its
//! evaluation) and then contracted again, folding the largest evaluations
//! back into symbols. The three trees are kept so callers can compare sizes.

use crate::analysis::explicit::ExplicitMacros;
use crate::analysis::implicit::ImplicitMacros;
use crate::macros::MacroSource;
use crate::ontology::Ontology;
use crate::options::MacroficationOptions;
use log::{debug, info};
use owl_syntax::{build_axiom, decode, Axiom, ClassExpression, Iri, NodeValue, SyntaxTree};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct AxiomMacrofication {
    pub original: SyntaxTree,
    pub expanded: SyntaxTree,
    pub minimized: SyntaxTree,
}

impl AxiomMacrofication {
    pub fn axiom(&self) -> Axiom {
        decode_axiom(&self.original)
    }

    pub fn expanded_axiom(&self) -> Axiom {
        decode_axiom(&self.expanded)
    }

    pub fn minimized_axiom(&self) -> Axiom {
        decode_axiom(&self.minimized)
    }

    pub fn original_size(&self) -> usize {
        self.original.size()
    }

    pub fn expanded_size(&self) -> usize {
        self.expanded.size()
    }

    pub fn minimized_size(&self) -> usize {
        self.minimized.size()
    }

    pub fn is_changed(&self) -> bool {
        self.minimized_axiom() != self.axiom()
    }
}

fn decode_axiom(tree: &SyntaxTree) -> Axiom {
    match decode(tree) {
        NodeValue::Axiom(axiom) => axiom,
        other => panic!("BUG: axiom tree decoded to {:?}", other),
    }
}

pub struct Macrofier<'a, S: MacroSource + ?Sized> {
    source: &'a S,
    options: &'a MacroficationOptions,
}

impl<'a, S: MacroSource + ?Sized> Macrofier<'a, S> {
    pub fn new(source: &'a S, options: &'a MacroficationOptions) -> Self {
        Self { source, options }
    }

    /// Tree of `axiom` with every macro symbol unfolded; definition axioms are left alone.
    /// An axiom whose operands would merge into an ill-formed one is kept as it is.
    pub fn expand(&self, axiom: &Axiom) -> SyntaxTree {
        let mut tree = build_axiom(axiom);
        if self.source.is_definition(axiom) {
            return tree;
        }
        let unfolded = self
            .source
            .macros()
            .expand(&mut tree, &axiom.classes_in_signature());
        if unfolded == 0 {
            return tree;
        }
        if let Err(error) = decode_axiom(&tree).check_well_formed() {
            debug!("keeping {} unexpanded: {:#}", axiom, error);
            return build_axiom(axiom);
        }
        debug!("unfolded {} macro symbols in {}", unfolded, axiom);
        tree
    }

    /// Copy of `expanded` with macro evaluations folded back into symbols.
    /// When folding would merge operands into an ill-formed axiom, `expanded` is returned unchanged.
    pub fn contract(&self, expanded: &SyntaxTree) -> SyntaxTree {
        let axiom = decode_axiom(expanded);
        let mut tree = expanded.clone();
        self.source.macros().contract(
            &mut tree,
            &axiom.nested_class_expressions(),
            self.options.contraction_threshold,
        );
        if let Err(error) = decode_axiom(&tree).check_well_formed() {
            debug!("keeping {} uncontracted: {:#}", axiom, error);
            return expanded.clone();
        }
        tree
    }

    pub fn macrofy(&self, axiom: &Axiom) -> AxiomMacrofication {
        let original = build_axiom(axiom);
        let expanded = self.expand(axiom);
        let minimized = match self.defined_symbol(axiom) {
            Some(symbol) => {
                let definition = self
                    .source
                    .macros()
                    .minimal_definition(symbol)
                    .cloned()
                    .unwrap_or_else(|| panic!("BUG: macro {} has no definition", symbol));
                build_axiom(&Axiom::equivalent([
                    ClassExpression::Class(symbol.clone()),
                    definition,
                ]))
            }
            None => self.contract(&expanded),
        };

        let record = AxiomMacrofication {
            original,
            expanded,
            minimized,
        };
        if record.is_changed() {
            debug!(
                "{} -> {} (size {} -> {})",
                axiom,
                record.minimized_axiom(),
                record.original_size(),
                record.minimized_size()
            );
        }
        record
    }

    /// Macrofies every axiom the source covers
    pub fn macrofy_all<'b>(
        &self,
        axioms: impl IntoIterator<Item = &'b Axiom>,
    ) -> Vec<AxiomMacrofication> {
        axioms
            .into_iter()
            .filter(|axiom| self.source.covers(axiom))
            .map(|axiom| self.macrofy(axiom))
            .collect()
    }

    /// Macro defined by `axiom`, when it is one of the source's definition axioms
    fn defined_symbol<'b>(&self, axiom: &'b Axiom) -> Option<&'b Iri> {
        if !self.source.is_definition(axiom) {
            return None;
        }
        let Axiom::EquivalentClasses(operands) = axiom else {
            return None;
        };
        operands
            .iter()
            .filter_map(ClassExpression::as_named)
            .find(|symbol| self.source.macros().contains(symbol))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroficationSummary {
    pub source: &'static str,
    pub axioms: usize,
    pub changed_axioms: usize,
    pub original_size: usize,
    pub expanded_size: usize,
    pub minimized_size: usize,
    pub macros: usize,
    /// Total size of the minimal macro definitions
    pub definition_size: usize,
}

impl fmt::Display for MacroficationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} macrofication of {} axioms", self.source, self.axioms)?;
        writeln!(f, "  changed axioms:  {}", self.changed_axioms)?;
        writeln!(f, "  macros:          {}", self.macros)?;
        writeln!(f, "  original size:   {}", self.original_size)?;
        writeln!(f, "  expanded size:   {}", self.expanded_size)?;
        writeln!(f, "  minimized size:  {}", self.minimized_size)?;
        write!(f, "  definition size: {}", self.definition_size)
    }
}

/// Macros of one source together with the macrofication of each covered axiom
pub struct Macrofication<S> {
    pub source: S,
    pub records: Vec<AxiomMacrofication>,
}

impl<S: MacroSource> Macrofication<S> {
    pub fn new(source: S, ontology: &Ontology, options: &MacroficationOptions) -> Self {
        let records = Macrofier::new(&source, options).macrofy_all(ontology.axioms());
        let macrofication = Self { source, records };
        info!("{}", macrofication.summary());
        macrofication
    }

    pub fn summary(&self) -> MacroficationSummary {
        let macros = self.source.macros();
        MacroficationSummary {
            source: self.source.name(),
            axioms: self.records.len(),
            changed_axioms: self.records.iter().filter(|r| r.is_changed()).count(),
            original_size: self.records.iter().map(AxiomMacrofication::original_size).sum(),
            expanded_size: self.records.iter().map(AxiomMacrofication::expanded_size).sum(),
            minimized_size: self.records.iter().map(AxiomMacrofication::minimized_size).sum(),
            macros: macros.len(),
            definition_size: macros
                .definition_axioms()
                .iter()
                .map(|axiom| build_axiom(axiom).size())
                .sum(),
        }
    }

    pub fn expanded_axioms(&self) -> BTreeSet<Axiom> {
        self.records.iter().map(AxiomMacrofication::expanded_axiom).collect()
    }

    pub fn minimized_axioms(&self) -> BTreeSet<Axiom> {
        self.records.iter().map(AxiomMacrofication::minimized_axiom).collect()
    }

    /// `EquivalentClasses(symbol, minimal definition)` for every macro
    pub fn definition_axioms(&self) -> Vec<Axiom> {
        self.source.macros().definition_axioms()
    }
}

/// Macrofies `ontology` with the macros its own abbreviation axioms define
pub fn run_explicit(
    ontology: &Ontology,
    options: &MacroficationOptions,
) -> Macrofication<ExplicitMacros> {
    let source = ExplicitMacros::new(ontology.axioms(), options);
    Macrofication::new(source, ontology, options)
}

/// Macrofies the complement-free part of `ontology` with discovered macros
pub fn run_implicit(
    ontology: &Ontology,
    options: &MacroficationOptions,
) -> Macrofication<ImplicitMacros> {
    let source = ImplicitMacros::new(ontology.axioms(), options);
    Macrofication::new(source, ontology, options)
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

    fn worked_example() -> Ontology {
        Ontology::from_axioms([
            Axiom::sub_class_of(class("A"), ClassExpression::and([class("B"), some("r", class("C"))])),
            Axiom::equivalent([class("M"), some("r", class("C"))]),
        ])
    }

    #[test]
    fn test_contraction_folds_macro() {
        let ontology = worked_example();
        let options = MacroficationOptions::default();
        let macros = ExplicitMacros::new(ontology.axioms(), &options);
        let macrofier = Macrofier::new(&macros, &options);

        let axiom = Axiom::sub_class_of(class("A"), ClassExpression::and([class("B"), some("r", class("C"))]));
        let record = macrofier.macrofy(&axiom);

        assert_eq!(record.original_size(), 7);
        assert_eq!(record.expanded_size(), 7);
        assert_eq!(record.minimized_size(), 5);
        assert_eq!(
            record.minimized_axiom(),
            Axiom::sub_class_of(class("A"), ClassExpression::and([class("B"), class("M")]))
        );
        assert!(record.is_changed());
    }

    #[test]
    fn test_merged_operands_shrink_the_tree() {
        let ontology = worked_example();
        let options = MacroficationOptions::default();
        let macros = ExplicitMacros::new(ontology.axioms(), &options);
        let macrofier = Macrofier::new(&macros, &options);

        let axiom = Axiom::sub_class_of(
            class("A"),
            ClassExpression::and([class("B"), class("M"), some("r", class("C"))]),
        );
        let record = macrofier.macrofy(&axiom);

        let expanded = Axiom::sub_class_of(class("A"), ClassExpression::and([class("B"), some("r", class("C"))]));
        assert_eq!(record.expanded_axiom(), expanded);
        assert_eq!(record.expanded_size(), build_axiom(&expanded).size());
        assert_eq!(record.expanded_size(), 7);

        let minimized = Axiom::sub_class_of(class("A"), ClassExpression::and([class("B"), class("M")]));
        assert_eq!(record.minimized_axiom(), minimized);
        assert_eq!(record.minimized_size(), 5);
    }

    #[test]
    fn test_axiom_collapsing_below_two_operands_is_kept() {
        let ontology = worked_example();
        let options = MacroficationOptions::default();
        let macros = ExplicitMacros::new(ontology.axioms(), &options);
        let macrofier = Macrofier::new(&macros, &options);

        let axiom = Axiom::disjoint([class("M"), some("r", class("C"))]);
        let record = macrofier.macrofy(&axiom);

        assert_eq!(record.expanded_axiom(), axiom);
        assert_eq!(record.minimized_axiom(), axiom);
        assert!(record.minimized_axiom().check_well_formed().is_ok());
        assert_eq!(record.minimized_size(), build_axiom(&axiom).size());
        assert!(!record.is_changed());
    }

    #[test]
    fn test_definition_axiom_keeps_its_symbol() {
        let ontology = worked_example();
        let options = MacroficationOptions::default();
        let macros = ExplicitMacros::new(ontology.axioms(), &options);
        let definition = Axiom::equivalent([class("M"), some("r", class("C"))]);

        let record = Macrofier::new(&macros, &options).macrofy(&definition);
        assert_eq!(record.expanded_axiom(), definition);
        assert_eq!(record.minimized_axiom(), definition);
        assert!(!record.is_changed());
    }

    #[test]
    fn test_symbols_are_unfolded_then_refolded() {
        let ontology = Ontology::from_axioms([
            Axiom::equivalent([class("M"), some("r", class("N"))]),
            Axiom::equivalent([class("N"), some("s", class("C"))]),
            Axiom::sub_class_of(class("A"), some("t", class("M"))),
        ]);
        let options = MacroficationOptions::default();
        let macros = ExplicitMacros::new(ontology.axioms(), &options);
        let macrofier = Macrofier::new(&macros, &options);

        let record = macrofier.macrofy(&Axiom::sub_class_of(class("A"), some("t", class("M"))));
        assert_eq!(
            record.expanded_axiom(),
            Axiom::sub_class_of(class("A"), some("t", some("r", some("s", class("C")))))
        );
        assert_eq!(record.expanded_size(), 9);
        assert_eq!(record.minimized_axiom(), record.axiom());
    }

    #[test]
    fn test_nested_definition_is_minimized() {
        let ontology = Ontology::from_axioms([
            Axiom::equivalent([class("M"), some("r", some("s", class("C")))]),
            Axiom::equivalent([class("N"), some("s", class("C"))]),
        ]);
        let macrofication = run_explicit(&ontology, &MacroficationOptions::default());

        assert!(macrofication
            .minimized_axioms()
            .contains(&Axiom::equivalent([class("M"), some("r", class("N"))])));
    }

    #[test]
    fn test_summary_report() {
        let macrofication = run_explicit(&worked_example(), &MacroficationOptions::default());
        insta::assert_snapshot!(macrofication.summary(), @r###"
        explicit macrofication of 2 axioms
          changed axioms:  1
          macros:          1
          original size:   12
          expanded size:   12
          minimized size:  10
          definition size: 5
        "###);
    }

    #[test]
    fn test_implicit_run_skips_complements() {
        let repeated = some("r", class("C"));
        let ontology = Ontology::from_axioms([
            Axiom::sub_class_of(class("A"), repeated.clone()),
            Axiom::sub_class_of(class("B"), repeated.clone()),
            Axiom::sub_class_of(class("D"), ClassExpression::not(repeated)),
        ]);
        let macrofication = run_implicit(&ontology, &MacroficationOptions::default());

        assert_eq!(macrofication.records.len(), 2);
        let symbol = ClassExpression::class("http://owl.generated.macro#m_1");
        assert_eq!(
            macrofication.minimized_axioms(),
            BTreeSet::from([
                Axiom::sub_class_of(class("A"), symbol.clone()),
                Axiom::sub_class_of(class("B"), symbol),
            ])
        );
    }
}
