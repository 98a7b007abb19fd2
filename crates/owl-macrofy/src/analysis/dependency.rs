// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Dependencies between macro candidates
//!
//! A candidate depends directly on every other candidate named in one of
//! its expansions. Transitive dependencies are collected frontier by
//! frontier; a candidate reaching itself is cyclic, and so is anything that
//! reaches a cyclic candidate.

use log::debug;
use owl_syntax::{ClassExpression, Iri};
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, BTreeSet};

pub struct DependencyGraph {
    graph: DiGraph<Iri, ()>,
    nodes: BTreeMap<Iri, NodeIndex>,
    transitive: BTreeMap<Iri, BTreeSet<Iri>>,
}

impl DependencyGraph {
    /// Builds the graph over `candidates`, each mapped to all of its expansions
    pub fn new(candidates: &BTreeMap<Iri, BTreeSet<ClassExpression>>) -> Self {
        let mut graph = DiGraph::new();
        let nodes: BTreeMap<Iri, NodeIndex> = candidates
            .keys()
            .map(|symbol| (symbol.clone(), graph.add_node(symbol.clone())))
            .collect();

        for (symbol, expansions) in candidates {
            for expansion in expansions {
                for named in expansion.named_classes() {
                    if let Some(target) = nodes.get(&named) {
                        graph.update_edge(nodes[symbol], *target, ());
                    }
                }
            }
        }

        let mut dependencies = Self {
            graph,
            nodes,
            transitive: BTreeMap::new(),
        };
        dependencies.transitive = dependencies
            .nodes
            .keys()
            .map(|symbol| (symbol.clone(), dependencies.collect_transitive(symbol)))
            .collect();
        dependencies
    }

    fn collect_transitive(&self, symbol: &Iri) -> BTreeSet<Iri> {
        let mut collected = BTreeSet::new();
        let mut frontier = self.direct_dependencies(symbol);
        while !frontier.is_empty() {
            let mut next = BTreeSet::new();
            for dependency in frontier {
                if collected.insert(dependency.clone()) {
                    next.extend(self.direct_dependencies(&dependency));
                }
            }
            frontier = next;
        }
        collected
    }

    pub fn contains(&self, symbol: &Iri) -> bool {
        self.nodes.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Candidates named in one of `symbol`'s expansions
    pub fn direct_dependencies(&self, symbol: &Iri) -> BTreeSet<Iri> {
        match self.nodes.get(symbol) {
            Some(node) => self
                .graph
                .neighbors(*node)
                .map(|neighbor| self.graph[neighbor].clone())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    pub fn transitive_dependencies(&self, symbol: &Iri) -> Option<&BTreeSet<Iri>> {
        self.transitive.get(symbol)
    }

    pub fn depends_on(&self, symbol: &Iri, dependency: &Iri) -> bool {
        self.transitive
            .get(symbol)
            .map_or(false, |dependencies| dependencies.contains(dependency))
    }

    /// Candidates among their own transitive dependencies
    pub fn self_dependent(&self) -> BTreeSet<Iri> {
        self.transitive
            .iter()
            .filter(|(symbol, dependencies)| dependencies.contains(*symbol))
            .map(|(symbol, _)| symbol.clone())
            .collect()
    }

    /// Self-dependent candidates plus every candidate reaching one of them
    pub fn cyclic(&self) -> BTreeSet<Iri> {
        let self_dependent = self.self_dependent();
        let cyclic: BTreeSet<Iri> = self
            .transitive
            .iter()
            .filter(|(symbol, dependencies)| {
                self_dependent.contains(*symbol) || !dependencies.is_disjoint(&self_dependent)
            })
            .map(|(symbol, _)| symbol.clone())
            .collect();
        debug!(
            "{} self-dependent and {} cyclic candidates out of {}",
            self_dependent.len(),
            cyclic.len(),
            self.len()
        );
        cyclic
    }

    /// Graphviz rendering for debugging
    pub fn to_dot(&self) -> String {
        let labeled = self.graph.map(|_, symbol| symbol.to_string(), |_, _| "");
        format!("{}", Dot::with_config(&labeled, &[Config::EdgeNoLabel]))
    }
}
