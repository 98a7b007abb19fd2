// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the syntax tree codec and rewriter

use owl_syntax::data::vocabulary::XSD_INTEGER;
use owl_syntax::*;
use proptest::prelude::*;

// ===== Strategies =====

fn arb_class_name() -> impl Strategy<Value = Iri> {
    "[A-F]".prop_map(Iri::from)
}

fn arb_property() -> impl Strategy<Value = ObjectPropertyExpression> {
    prop_oneof![
        3 => "[r-t]".prop_map(ObjectPropertyExpression::named),
        1 => "[r-t]".prop_map(ObjectPropertyExpression::inverse),
    ]
}

fn arb_individual() -> impl Strategy<Value = Individual> {
    prop_oneof![
        "[a-c]".prop_map(Individual::named),
        "[0-9]".prop_map(Individual::Anonymous),
    ]
}

fn arb_literal() -> impl Strategy<Value = Literal> {
    prop_oneof![
        "[a-z]{1,3}".prop_map(Literal::Plain),
        (0u32..50).prop_map(|n| Literal::typed(n.to_string(), XSD_INTEGER)),
    ]
}

fn arb_cardinality_kind() -> impl Strategy<Value = CardinalityKind> {
    prop_oneof![
        Just(CardinalityKind::Min),
        Just(CardinalityKind::Max),
        Just(CardinalityKind::Exact),
    ]
}

fn arb_data_range() -> impl Strategy<Value = DataRange> {
    let datatype = "[x-z]".prop_map(DataRange::datatype);
    prop_oneof![
        datatype.clone(),
        prop::collection::btree_set(arb_literal(), 1..3).prop_map(DataRange::DataOneOf),
        datatype.prop_map(|range| DataRange::DataComplementOf(Box::new(range))),
        ("[x-z]", prop::collection::btree_set(("[m-n]", arb_literal()), 1..3)).prop_map(
            |(datatype, facets)| DataRange::DatatypeRestriction {
                datatype: Iri::from(datatype),
                restrictions: facets
                    .into_iter()
                    .map(|(facet, value)| FacetRestriction {
                        facet: Iri::from(facet),
                        value,
                    })
                    .collect(),
            }
        ),
    ]
}

fn arb_class(depth: u32) -> impl Strategy<Value = ClassExpression> {
    let leaf = prop_oneof![
        4 => arb_class_name().prop_map(ClassExpression::Class),
        1 => prop::collection::btree_set(arb_individual(), 1..3).prop_map(ClassExpression::ObjectOneOf),
        1 => (arb_property(), arb_individual()).prop_map(|(property, individual)| {
            ClassExpression::ObjectHasValue { property, individual }
        }),
        1 => arb_property().prop_map(ClassExpression::ObjectHasSelf),
        1 => ("[p-q]", arb_data_range()).prop_map(|(property, range)| {
            ClassExpression::DataSomeValuesFrom { property: Iri::from(property), range }
        }),
        1 => ("[p-q]", arb_literal()).prop_map(|(property, value)| {
            ClassExpression::DataHasValue { property: Iri::from(property), value }
        }),
        1 => (arb_cardinality_kind(), 0u32..4, "[p-q]", prop::option::of(arb_data_range())).prop_map(
            |(kind, cardinality, property, range)| ClassExpression::DataCardinality {
                kind,
                cardinality,
                property: Iri::from(property),
                range,
            }
        ),
    ];

    leaf.prop_recursive(depth, 48, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(ClassExpression::not),
            prop::collection::btree_set(inner.clone(), 1..4).prop_map(ClassExpression::ObjectIntersectionOf),
            prop::collection::btree_set(inner.clone(), 1..4).prop_map(ClassExpression::ObjectUnionOf),
            (arb_property(), inner.clone()).prop_map(|(property, filler)| ClassExpression::some(property, filler)),
            (arb_property(), inner.clone()).prop_map(|(property, filler)| ClassExpression::only(property, filler)),
            (arb_cardinality_kind(), 0u32..4, arb_property(), prop::option::of(inner)).prop_map(
                |(kind, cardinality, property, filler)| {
                    ClassExpression::cardinality(kind, cardinality, property, filler)
                }
            ),
        ]
    })
}

fn arb_axiom() -> impl Strategy<Value = Axiom> {
    prop_oneof![
        (arb_class(3), arb_class(3)).prop_map(|(sub, sup)| Axiom::sub_class_of(sub, sup)),
        prop::collection::btree_set(arb_class(3), 2..4).prop_map(Axiom::EquivalentClasses),
        prop::collection::btree_set(arb_class(3), 2..4).prop_map(Axiom::DisjointClasses),
        (arb_class_name(), prop::collection::btree_set(arb_class(3), 2..4))
            .prop_map(|(class, disjuncts)| Axiom::DisjointUnion { class, disjuncts }),
    ]
}

// ===== Property Tests =====

proptest! {
    #[test]
    fn prop_class_round_trip(expr in arb_class(4)) {
        let tree = build_class(&expr);
        prop_assert_eq!(decode(&tree), NodeValue::Term(Term::Class(expr)));
    }

    #[test]
    fn prop_axiom_round_trip(axiom in arb_axiom()) {
        let tree = build_axiom(&axiom);
        prop_assert_eq!(decode(&tree), NodeValue::Axiom(axiom));
    }

    #[test]
    fn prop_nested_expressions_are_strictly_smaller(expr in arb_class(4)) {
        let size = class_size(&expr);
        for nested in expr.nested() {
            if nested != expr {
                prop_assert!(class_size(&nested) < size);
            }
        }
    }

    #[test]
    fn prop_equal_size_expressions_are_never_nested(axiom in arb_axiom()) {
        let buckets = size_buckets(&axiom.nested_class_expressions());
        for bucket in buckets.values() {
            for outer in bucket {
                for inner in bucket {
                    if outer != inner {
                        prop_assert!(!outer.nested().contains(inner));
                    }
                }
            }
        }
    }

    #[test]
    fn prop_absent_target_is_noop(axiom in arb_axiom()) {
        let mut tree = build_axiom(&axiom);
        let before = tree.clone();
        let absent = Term::Class(ClassExpression::class("Absent"));
        let count = rewrite(&mut tree, &absent, &Term::Class(ClassExpression::class("Other")));
        prop_assert_eq!(count, 0);
        prop_assert!(tree.same_structure(&before));
    }

    #[test]
    fn prop_rewrite_keeps_payload_and_decode_in_sync(axiom in arb_axiom(), name in arb_class_name()) {
        let mut tree = build_axiom(&axiom);
        let target = Term::Class(ClassExpression::Class(name));
        let replacement = Term::Class(ClassExpression::some(
            ObjectPropertyExpression::named("fresh"),
            ClassExpression::class("Fresh"),
        ));
        rewrite(&mut tree, &target, &replacement);

        let decoded = decode(&tree);
        prop_assert_eq!(tree.root_value(), &decoded);
        // the rewritten value re-encodes to a tree of the same size
        prop_assert_eq!(build(&decoded).size(), tree.size());
    }

    #[test]
    fn prop_rewrite_with_existing_names_stays_consistent(
        axiom in arb_axiom(),
        name in arb_class_name(),
        replacement in arb_class(2),
    ) {
        // names and sub-expressions drawn from the same pools make siblings collide
        let mut tree = build_axiom(&axiom);
        rewrite(&mut tree, &Term::Class(ClassExpression::Class(name)), &Term::Class(replacement));

        let decoded = decode(&tree);
        prop_assert_eq!(tree.root_value(), &decoded);
        prop_assert_eq!(build(&decoded).size(), tree.size());
    }
}
