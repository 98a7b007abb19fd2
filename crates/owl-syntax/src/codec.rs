// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Syntax tree codec
//!
//! `build` lowers an axiom or term into a tree with one node per syntactic
//! position; `decode` reconstructs the value bottom-up from node kinds. The
//! two are inverse: `decode(&build(v)) == v`.
//!
//! Layout of composite nodes (children in order):
//! - `SubClassOf`: sub class (tagged `SubClass`), super class (tagged `SuperClass`)
//! - `DisjointUnion`: defined class (tagged `DisjointUnionClass`), then disjuncts
//! - object restrictions: [cardinality], property, filler or individual
//! - data restrictions: [cardinality], data property, data range or literal
//! - `ObjectInverseOf`: the named property
//! - `DatatypeRestriction`: datatype, then one node per facet; a facet node holds its literal

use crate::data::{
    Axiom, ClassExpression, DataRange, FacetRestriction, Individual, Iri, Literal,
    ObjectPropertyExpression, Term,
};
use crate::tree::{NodeId, NodeValue, RoleTag, SyntaxTree};
use std::collections::{BTreeMap, BTreeSet};

/// Encodes any node value as a tree rooted at an untagged node
pub fn build(value: &NodeValue) -> SyntaxTree {
    build_tagged(value, None)
}

pub fn build_tagged(value: &NodeValue, tag: Option<RoleTag>) -> SyntaxTree {
    let mut tree = SyntaxTree::new(value.clone(), tag);
    let mut worklist = vec![tree.root()];
    while let Some(id) = worklist.pop() {
        let children = decompose(&tree.node(id).value);
        for (child, child_tag) in children {
            worklist.push(tree.add_child(id, child, child_tag));
        }
    }
    tree
}

pub fn build_axiom(axiom: &Axiom) -> SyntaxTree {
    build(&NodeValue::Axiom(axiom.clone()))
}

pub fn build_term(term: &Term) -> SyntaxTree {
    build(&NodeValue::Term(term.clone()))
}

pub fn build_class(class: &ClassExpression) -> SyntaxTree {
    build(&NodeValue::Term(Term::Class(class.clone())))
}

pub fn build_role_chain(chain: &[ObjectPropertyExpression]) -> SyntaxTree {
    build(&NodeValue::RoleChain(chain.to_vec()))
}

/// Encoding size of a class expression
pub fn class_size(class: &ClassExpression) -> usize {
    build_class(class).size()
}

fn class_node(class: &ClassExpression) -> NodeValue {
    NodeValue::Term(Term::Class(class.clone()))
}

fn term_node(term: impl Into<Term>) -> NodeValue {
    NodeValue::Term(term.into())
}

/// Immediate children of a value, in encoding order
fn decompose(value: &NodeValue) -> Vec<(NodeValue, Option<RoleTag>)> {
    match value {
        NodeValue::Axiom(axiom) => match axiom {
            Axiom::SubClassOf { sub, sup } => vec![
                (class_node(sub), Some(RoleTag::SubClass)),
                (class_node(sup), Some(RoleTag::SuperClass)),
            ],
            Axiom::EquivalentClasses(operands) | Axiom::DisjointClasses(operands) => {
                untagged(operands.iter().map(class_node).collect())
            }
            Axiom::DisjointUnion { class, disjuncts } => {
                let defined = ClassExpression::Class(class.clone());
                std::iter::once((class_node(&defined), Some(RoleTag::DisjointUnionClass)))
                    .chain(disjuncts.iter().map(|d| (class_node(d), None)))
                    .collect()
            }
        },
        NodeValue::Term(term) => untagged(decompose_term(term)),
        NodeValue::RoleChain(chain) => untagged(chain.iter().cloned().map(term_node).collect()),
        NodeValue::Cardinality(_) => vec![],
    }
}

fn untagged(values: Vec<NodeValue>) -> Vec<(NodeValue, Option<RoleTag>)> {
    values.into_iter().map(|value| (value, None)).collect()
}

fn decompose_term(term: &Term) -> Vec<NodeValue> {
    match term {
        Term::Class(class) => decompose_class(class),
        Term::ObjectProperty(ObjectPropertyExpression::InverseObjectProperty(iri)) => {
            vec![term_node(ObjectPropertyExpression::ObjectProperty(iri.clone()))]
        }
        Term::DataRange(range) => match range {
            DataRange::Datatype(_) => vec![],
            DataRange::DataOneOf(literals) => literals.iter().cloned().map(term_node).collect(),
            DataRange::DataComplementOf(range) => vec![term_node((**range).clone())],
            DataRange::DataIntersectionOf(ranges) | DataRange::DataUnionOf(ranges) => {
                ranges.iter().cloned().map(term_node).collect()
            }
            DataRange::DatatypeRestriction {
                datatype,
                restrictions,
            } => std::iter::once(term_node(DataRange::Datatype(datatype.clone())))
                .chain(restrictions.iter().cloned().map(term_node))
                .collect(),
        },
        Term::Facet(facet) => vec![term_node(facet.value.clone())],
        Term::ObjectProperty(ObjectPropertyExpression::ObjectProperty(_))
        | Term::DataProperty(_)
        | Term::Individual(_)
        | Term::Literal(_) => vec![],
    }
}

fn decompose_class(class: &ClassExpression) -> Vec<NodeValue> {
    use ClassExpression::*;
    match class {
        Class(_) => vec![],
        ObjectComplementOf(operand) => vec![class_node(operand)],
        ObjectIntersectionOf(operands) | ObjectUnionOf(operands) => {
            operands.iter().map(class_node).collect()
        }
        ObjectOneOf(individuals) => individuals.iter().cloned().map(term_node).collect(),
        ObjectSomeValuesFrom { property, filler } | ObjectAllValuesFrom { property, filler } => {
            vec![term_node(property.clone()), class_node(filler)]
        }
        ObjectHasValue {
            property,
            individual,
        } => vec![term_node(property.clone()), term_node(individual.clone())],
        ObjectHasSelf(property) => vec![term_node(property.clone())],
        ObjectCardinality {
            cardinality,
            property,
            filler,
            ..
        } => {
            let mut children = vec![
                NodeValue::Cardinality(*cardinality),
                term_node(property.clone()),
            ];
            children.extend(filler.iter().map(|filler| class_node(filler)));
            children
        }
        DataSomeValuesFrom { property, range } | DataAllValuesFrom { property, range } => vec![
            NodeValue::Term(Term::DataProperty(property.clone())),
            term_node(range.clone()),
        ],
        DataHasValue { property, value } => vec![
            NodeValue::Term(Term::DataProperty(property.clone())),
            term_node(value.clone()),
        ],
        DataCardinality {
            cardinality,
            property,
            range,
            ..
        } => {
            let mut children = vec![
                NodeValue::Cardinality(*cardinality),
                NodeValue::Term(Term::DataProperty(property.clone())),
            ];
            children.extend(range.iter().cloned().map(term_node));
            children
        }
    }
}

/// Reconstructs the value a tree encodes from its node kinds and leaves
pub fn decode(tree: &SyntaxTree) -> NodeValue {
    decode_node(tree, tree.root())
}

pub fn decode_node(tree: &SyntaxTree, id: NodeId) -> NodeValue {
    let node = tree.node(id);
    if node.is_leaf() {
        return node.value.clone();
    }
    let decoded: Vec<(Option<RoleTag>, NodeValue)> = node
        .children()
        .iter()
        .map(|child| (tree.node(*child).tag, decode_node(tree, *child)))
        .collect();
    let children: Vec<_> = decoded.iter().map(|(tag, value)| (*tag, value)).collect();
    reassemble(&node.value, &children)
}

/// Recomputes the stored payload of `nodes` and all their ancestors from their children, deepest first.
/// Children of set-valued nodes that became equal to an earlier sibling are removed, so the tree
/// stays the encoding of the value it holds.
pub(crate) fn refresh_ancestors(tree: &mut SyntaxTree, nodes: impl IntoIterator<Item = NodeId>) {
    let mut stale = BTreeSet::new();
    for node in nodes {
        let mut current = Some(node);
        while let Some(id) = current {
            if !stale.insert(id) {
                break;
            }
            current = tree.parent(id);
        }
    }

    let mut ordered: Vec<(usize, NodeId)> = stale.into_iter().map(|id| (tree.depth(id), id)).collect();
    ordered.sort_by(|left, right| right.cmp(left));

    for (_, id) in ordered {
        if is_set_valued(&tree.node(id).value) {
            drop_duplicate_children(tree, id);
        }
        let node = tree.node(id);
        let children: Vec<_> = node
            .children()
            .iter()
            .map(|child| {
                let child = tree.node(*child);
                (child.tag, &child.value)
            })
            .collect();
        let value = reassemble(&node.value, &children);
        tree.set_value(id, value);
    }
}

/// Whether the children of a node form a set rather than a sequence
fn is_set_valued(value: &NodeValue) -> bool {
    match value {
        NodeValue::Axiom(axiom) => !matches!(axiom, Axiom::SubClassOf { .. }),
        NodeValue::Term(Term::Class(class)) => matches!(
            class,
            ClassExpression::ObjectIntersectionOf(_)
                | ClassExpression::ObjectUnionOf(_)
                | ClassExpression::ObjectOneOf(_)
        ),
        NodeValue::Term(Term::DataRange(range)) => matches!(
            range,
            DataRange::DataOneOf(_)
                | DataRange::DataIntersectionOf(_)
                | DataRange::DataUnionOf(_)
                | DataRange::DatatypeRestriction { .. }
        ),
        _ => false,
    }
}

/// Removes children repeating the tag and value of an earlier sibling
fn drop_duplicate_children(tree: &mut SyntaxTree, id: NodeId) {
    let mut seen = BTreeSet::new();
    let duplicates: Vec<NodeId> = tree
        .children(id)
        .iter()
        .copied()
        .filter(|child| {
            let node = tree.node(*child);
            !seen.insert((node.tag, node.value.clone()))
        })
        .collect();
    for duplicate in duplicates {
        tree.remove_child(duplicate);
    }
}

/// Typed views over the already-decoded children of a node
struct Parts<'a> {
    children: &'a [(Option<RoleTag>, &'a NodeValue)],
}

impl<'a> Parts<'a> {
    fn terms(&self) -> impl Iterator<Item = (Option<RoleTag>, &'a Term)> + 'a {
        self.children
            .iter()
            .filter_map(|(tag, value)| value.as_term().map(|term| (*tag, term)))
    }

    fn classes(&self) -> BTreeSet<ClassExpression> {
        self.terms()
            .filter(|(tag, _)| *tag != Some(RoleTag::DisjointUnionClass))
            .filter_map(|(_, term)| term.as_class().cloned())
            .collect()
    }

    fn class(&self) -> Option<ClassExpression> {
        self.terms().find_map(|(_, term)| term.as_class().cloned())
    }

    fn tagged_class(&self, tag: RoleTag) -> Option<ClassExpression> {
        self.terms()
            .filter(|(child_tag, _)| *child_tag == Some(tag))
            .find_map(|(_, term)| term.as_class().cloned())
    }

    fn properties(&self) -> Vec<ObjectPropertyExpression> {
        self.terms()
            .filter_map(|(_, term)| match term {
                Term::ObjectProperty(property) => Some(property.clone()),
                _ => None,
            })
            .collect()
    }

    fn property(&self) -> Option<ObjectPropertyExpression> {
        self.properties().into_iter().next()
    }

    fn data_property(&self) -> Option<Iri> {
        self.terms().find_map(|(_, term)| match term {
            Term::DataProperty(property) => Some(property.clone()),
            _ => None,
        })
    }

    fn individuals(&self) -> BTreeSet<Individual> {
        self.terms()
            .filter_map(|(_, term)| match term {
                Term::Individual(individual) => Some(individual.clone()),
                _ => None,
            })
            .collect()
    }

    fn literals(&self) -> Vec<Literal> {
        self.terms()
            .filter_map(|(_, term)| match term {
                Term::Literal(literal) => Some(literal.clone()),
                _ => None,
            })
            .collect()
    }

    fn ranges(&self) -> Vec<DataRange> {
        self.terms()
            .filter_map(|(_, term)| match term {
                Term::DataRange(range) => Some(range.clone()),
                _ => None,
            })
            .collect()
    }

    fn facets(&self) -> BTreeSet<FacetRestriction> {
        self.terms()
            .filter_map(|(_, term)| match term {
                Term::Facet(facet) => Some(facet.clone()),
                _ => None,
            })
            .collect()
    }

    fn cardinality(&self) -> Option<u32> {
        self.children.iter().find_map(|(_, value)| match value {
            NodeValue::Cardinality(cardinality) => Some(*cardinality),
            _ => None,
        })
    }
}

/// Rebuilds a composite value of the same kind as `template` from its children.
/// Parts missing from `children` fall back to the template's own.
fn reassemble(template: &NodeValue, children: &[(Option<RoleTag>, &NodeValue)]) -> NodeValue {
    let parts = Parts { children };
    match template {
        NodeValue::Axiom(axiom) => NodeValue::Axiom(reassemble_axiom(axiom, &parts)),
        NodeValue::Term(term) => NodeValue::Term(reassemble_term(term, &parts)),
        NodeValue::Cardinality(cardinality) => NodeValue::Cardinality(*cardinality),
        NodeValue::RoleChain(_) => NodeValue::RoleChain(parts.properties()),
    }
}

fn reassemble_axiom(axiom: &Axiom, parts: &Parts) -> Axiom {
    match axiom {
        Axiom::SubClassOf { sub, sup } => Axiom::SubClassOf {
            sub: parts
                .tagged_class(RoleTag::SubClass)
                .unwrap_or_else(|| sub.clone()),
            sup: parts
                .tagged_class(RoleTag::SuperClass)
                .unwrap_or_else(|| sup.clone()),
        },
        Axiom::EquivalentClasses(_) => Axiom::EquivalentClasses(parts.classes()),
        Axiom::DisjointClasses(_) => Axiom::DisjointClasses(parts.classes()),
        Axiom::DisjointUnion { class, .. } => Axiom::DisjointUnion {
            class: parts
                .tagged_class(RoleTag::DisjointUnionClass)
                .and_then(|defined| defined.as_named().cloned())
                .unwrap_or_else(|| class.clone()),
            disjuncts: parts.classes(),
        },
    }
}

fn reassemble_term(term: &Term, parts: &Parts) -> Term {
    match term {
        Term::Class(class) => Term::Class(reassemble_class(class, parts)),
        Term::ObjectProperty(ObjectPropertyExpression::InverseObjectProperty(iri)) => {
            let inverted = parts
                .property()
                .map(|property| property.named_property().clone())
                .unwrap_or_else(|| iri.clone());
            Term::ObjectProperty(ObjectPropertyExpression::InverseObjectProperty(inverted))
        }
        Term::DataRange(range) => Term::DataRange(reassemble_range(range, parts)),
        Term::Facet(facet) => Term::Facet(FacetRestriction {
            facet: facet.facet.clone(),
            value: parts
                .literals()
                .into_iter()
                .next()
                .unwrap_or_else(|| facet.value.clone()),
        }),
        Term::ObjectProperty(_) | Term::DataProperty(_) | Term::Individual(_) | Term::Literal(_) => {
            term.clone()
        }
    }
}

fn reassemble_range(range: &DataRange, parts: &Parts) -> DataRange {
    match range {
        DataRange::Datatype(_) => range.clone(),
        DataRange::DataOneOf(_) => DataRange::DataOneOf(parts.literals().into_iter().collect()),
        DataRange::DataComplementOf(operand) => DataRange::DataComplementOf(Box::new(
            parts
                .ranges()
                .into_iter()
                .next()
                .unwrap_or_else(|| (**operand).clone()),
        )),
        DataRange::DataIntersectionOf(_) => {
            DataRange::DataIntersectionOf(parts.ranges().into_iter().collect())
        }
        DataRange::DataUnionOf(_) => DataRange::DataUnionOf(parts.ranges().into_iter().collect()),
        DataRange::DatatypeRestriction { datatype, .. } => DataRange::DatatypeRestriction {
            datatype: parts
                .ranges()
                .into_iter()
                .find_map(|range| match range {
                    DataRange::Datatype(iri) => Some(iri),
                    _ => None,
                })
                .unwrap_or_else(|| datatype.clone()),
            restrictions: parts.facets(),
        },
    }
}

fn reassemble_class(class: &ClassExpression, parts: &Parts) -> ClassExpression {
    use ClassExpression::*;
    let filler_or = |fallback: &ClassExpression| parts.class().unwrap_or_else(|| fallback.clone());
    let property_or =
        |fallback: &ObjectPropertyExpression| parts.property().unwrap_or_else(|| fallback.clone());
    let data_property_or = |fallback: &Iri| parts.data_property().unwrap_or_else(|| fallback.clone());

    match class {
        Class(_) => class.clone(),
        ObjectComplementOf(operand) => ObjectComplementOf(Box::new(filler_or(&**operand))),
        ObjectIntersectionOf(_) => ObjectIntersectionOf(parts.classes()),
        ObjectUnionOf(_) => ObjectUnionOf(parts.classes()),
        ObjectOneOf(_) => ObjectOneOf(parts.individuals()),
        ObjectSomeValuesFrom { property, filler } => ObjectSomeValuesFrom {
            property: property_or(property),
            filler: Box::new(filler_or(&**filler)),
        },
        ObjectAllValuesFrom { property, filler } => ObjectAllValuesFrom {
            property: property_or(property),
            filler: Box::new(filler_or(&**filler)),
        },
        ObjectHasValue {
            property,
            individual,
        } => ObjectHasValue {
            property: property_or(property),
            individual: parts
                .individuals()
                .into_iter()
                .next()
                .unwrap_or_else(|| individual.clone()),
        },
        ObjectHasSelf(property) => ObjectHasSelf(property_or(property)),
        ObjectCardinality {
            kind,
            cardinality,
            property,
            ..
        } => ObjectCardinality {
            kind: *kind,
            cardinality: parts.cardinality().unwrap_or(*cardinality),
            property: property_or(property),
            filler: parts.class().map(Box::new),
        },
        DataSomeValuesFrom { property, range } => DataSomeValuesFrom {
            property: data_property_or(property),
            range: parts.ranges().into_iter().next().unwrap_or_else(|| range.clone()),
        },
        DataAllValuesFrom { property, range } => DataAllValuesFrom {
            property: data_property_or(property),
            range: parts.ranges().into_iter().next().unwrap_or_else(|| range.clone()),
        },
        DataHasValue { property, value } => DataHasValue {
            property: data_property_or(property),
            value: parts.literals().into_iter().next().unwrap_or_else(|| value.clone()),
        },
        DataCardinality {
            kind,
            cardinality,
            property,
            ..
        } => DataCardinality {
            kind: *kind,
            cardinality: parts.cardinality().unwrap_or(*cardinality),
            property: data_property_or(property),
            range: parts.ranges().into_iter().next(),
        },
    }
}

/// Class expressions grouped by encoding size; iterate in reverse for largest first
pub fn size_buckets<'a>(
    expressions: impl IntoIterator<Item = &'a ClassExpression>,
) -> BTreeMap<usize, BTreeSet<ClassExpression>> {
    let mut buckets: BTreeMap<usize, BTreeSet<ClassExpression>> = BTreeMap::new();
    for expression in expressions {
        buckets
            .entry(class_size(expression))
            .or_default()
            .insert(expression.clone());
    }
    buckets
}
