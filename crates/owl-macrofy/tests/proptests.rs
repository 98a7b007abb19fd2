// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for explicit macro evaluation and macrofication

use owl_macrofy::{ExplicitMacros, MacroSource, MacroficationOptions, Macrofier, Ontology};
use owl_syntax::{class_size, Axiom, ClassExpression, Iri, ObjectPropertyExpression};
use proptest::prelude::*;

const BASE_CLASSES: [&str; 4] = ["A", "B", "C", "D"];

// ===== Strategies =====

/// Expression skeleton whose leaves index into a pool of class names
#[derive(Debug, Clone)]
enum Shape {
    Leaf(usize),
    Exists(String, Box<Shape>),
    Forall(String, Box<Shape>),
    And(Box<Shape>, Box<Shape>),
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    (0usize..16).prop_map(Shape::Leaf).prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            ("[r-s]", inner.clone()).prop_map(|(role, filler)| Shape::Exists(role, Box::new(filler))),
            ("[r-s]", inner.clone()).prop_map(|(role, filler)| Shape::Forall(role, Box::new(filler))),
            (inner.clone(), inner).prop_map(|(left, right)| Shape::And(Box::new(left), Box::new(right))),
        ]
    })
}

/// Expansion skeletons; the top level is always a restriction so every axiom is an abbreviation
fn arb_abbreviations() -> impl Strategy<Value = Vec<(String, Shape)>> {
    prop::collection::vec(("[r-s]", arb_shape()), 1..6)
}

fn symbol(index: usize) -> Iri {
    Iri::from(format!("M{}", index))
}

fn realize(shape: &Shape, pool: &[Iri]) -> ClassExpression {
    match shape {
        Shape::Leaf(index) => ClassExpression::Class(pool[index % pool.len()].clone()),
        Shape::Exists(role, filler) => {
            ClassExpression::some(ObjectPropertyExpression::named(role.as_str()), realize(filler, pool))
        }
        Shape::Forall(role, filler) => {
            ClassExpression::only(ObjectPropertyExpression::named(role.as_str()), realize(filler, pool))
        }
        Shape::And(left, right) => {
            let (left, right) = (realize(left, pool), realize(right, pool));
            if left == right {
                left
            } else {
                ClassExpression::and([left, right])
            }
        }
    }
}

/// `EquivalentClasses(Mi, Ei)` where `Ei` only mentions base classes and symbols `Mj` with `j < i`
fn abbreviation_axioms(abbreviations: &[(String, Shape)]) -> Vec<Axiom> {
    let mut pool: Vec<Iri> = BASE_CLASSES.iter().map(|name| Iri::from(*name)).collect();
    let mut axioms = vec![];
    for (index, (role, shape)) in abbreviations.iter().enumerate() {
        let expansion = ClassExpression::some(ObjectPropertyExpression::named(role.as_str()), realize(shape, &pool));
        axioms.push(Axiom::equivalent([ClassExpression::Class(symbol(index)), expansion]));
        pool.push(symbol(index));
    }
    axioms
}

fn full_pool(count: usize) -> Vec<Iri> {
    BASE_CLASSES
        .iter()
        .map(|name| Iri::from(*name))
        .chain((0..count).map(symbol))
        .collect()
}

// ===== Property Tests =====

proptest! {
    #[test]
    fn prop_acyclic_abbreviations_all_become_macros(abbreviations in arb_abbreviations()) {
        let ontology = Ontology::from_axioms(abbreviation_axioms(&abbreviations));
        let macros = ExplicitMacros::new(ontology.axioms(), &MacroficationOptions::default());

        prop_assert!(macros.ambiguous().is_empty());
        prop_assert!(macros.cyclic().is_empty());
        for index in 0..abbreviations.len() {
            prop_assert!(macros.is_macro(&symbol(index)));
        }
    }

    #[test]
    fn prop_evaluations_mention_no_macro_symbol(abbreviations in arb_abbreviations()) {
        let ontology = Ontology::from_axioms(abbreviation_axioms(&abbreviations));
        let macros = ExplicitMacros::new(ontology.axioms(), &MacroficationOptions::default());

        for entry in macros.macros().iter() {
            for name in entry.evaluation.named_classes() {
                prop_assert!(!macros.is_macro(&name), "{} evaluates to {} mentioning {}", entry.symbol, entry.evaluation, name);
            }
        }
    }

    #[test]
    fn prop_minimal_definition_is_never_larger(abbreviations in arb_abbreviations()) {
        let ontology = Ontology::from_axioms(abbreviation_axioms(&abbreviations));
        let macros = ExplicitMacros::new(ontology.axioms(), &MacroficationOptions::default());
        let table = macros.macros();

        for entry in table.iter() {
            let minimal = table.minimal_definition(&entry.symbol);
            prop_assert!(minimal.is_some());
            if let Some(minimal) = minimal {
                prop_assert!(class_size(minimal) <= class_size(&entry.evaluation));
            }
        }
    }

    #[test]
    fn prop_macrofied_axioms_stay_well_formed(
        abbreviations in arb_abbreviations(),
        sub in arb_shape(),
        sup in arb_shape(),
    ) {
        let ontology = Ontology::from_axioms(abbreviation_axioms(&abbreviations));
        let options = MacroficationOptions::default();
        let macros = ExplicitMacros::new(ontology.axioms(), &options);
        let macrofier = Macrofier::new(&macros, &options);

        let pool = full_pool(abbreviations.len());
        let axiom = Axiom::sub_class_of(realize(&sub, &pool), realize(&sup, &pool));
        let record = macrofier.macrofy(&axiom);

        prop_assert!(record.expanded_axiom().check_well_formed().is_ok());
        prop_assert!(record.minimized_axiom().check_well_formed().is_ok());
        prop_assert!(record.minimized_size() <= record.expanded_size());
    }
}
