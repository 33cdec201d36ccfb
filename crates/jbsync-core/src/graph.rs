// Rust guideline compliant 2026-02-06

//! Dependency graph checks over converted issues.
//!
//! Conversion never fails because of the shape of the dependency graph: the
//! source tracker allows cycles and partial exports. This module reports
//! such conditions so the caller can surface them.

use crate::{Export, Issue};
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A condition in the dependency graph worth reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum GraphAdvisory {
    /// An issue depends on an id that is not among the converted issues.
    DanglingDependency {
        /// Issue holding the dependency.
        issue: String,
        /// Missing dependency id.
        target: String,
    },
    /// A set of issues depend on each other in a cycle.
    Cycle(Vec<String>),
}

impl fmt::Display for GraphAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphAdvisory::DanglingDependency { issue, target } => {
                write!(f, "{} depends on {} which was not imported", issue, target)
            }
            GraphAdvisory::Cycle(ids) => write!(f, "dependency cycle: {}", ids.join(" -> ")),
        }
    }
}

/// Directed graph of issue dependencies. Edges point from an issue to what
/// it depends on.
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    id_to_node: HashMap<String, NodeIndex>,
    dangling: Vec<(String, String)>,
}

impl DependencyGraph {
    /// Builds the graph from converted issues.
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut graph = DiGraph::new();
        let mut id_to_node = HashMap::new();
        let mut dangling = Vec::new();

        for issue in issues {
            let node_idx = graph.add_node(issue.id.clone());
            id_to_node.insert(issue.id.clone(), node_idx);
        }

        for issue in issues {
            let from_idx = id_to_node[&issue.id];
            for dep in &issue.depends_on {
                match id_to_node.get(dep) {
                    Some(&to_idx) => {
                        graph.add_edge(from_idx, to_idx, ());
                    }
                    None => dangling.push((issue.id.clone(), dep.clone())),
                }
            }
        }

        Self {
            graph,
            id_to_node,
            dangling,
        }
    }

    /// Builds the graph from the issues of an export.
    pub fn from_export(export: &Export) -> Self {
        Self::from_issues(&export.issues)
    }

    /// Number of issues in the graph.
    pub fn len(&self) -> usize {
        self.id_to_node.len()
    }

    /// Returns true if the graph has no issues.
    pub fn is_empty(&self) -> bool {
        self.id_to_node.is_empty()
    }

    /// Returns true if the graph contains a dependency cycle.
    pub fn has_cycle(&self) -> bool {
        !self.cycles().is_empty()
    }

    /// Returns every strongly connected group of issues, ids sorted.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || self
                        .graph
                        .find_edge(component[0], component[0])
                        .is_some()
            })
            .map(|component| {
                let mut ids: Vec<String> = component
                    .into_iter()
                    .map(|node| self.graph[node].clone())
                    .collect();
                ids.sort();
                ids
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Returns issue ids so that every issue comes after what it depends on,
    /// or None if the graph is cyclic.
    pub fn dependency_order(&self) -> Option<Vec<String>> {
        toposort(&self.graph, None).ok().map(|nodes| {
            nodes
                .into_iter()
                .rev()
                .map(|node| self.graph[node].clone())
                .collect()
        })
    }

    /// Dependencies that point outside the issue set, as (issue, target).
    pub fn dangling(&self) -> &[(String, String)] {
        &self.dangling
    }

    /// All advisories: dangling dependencies first, then cycles.
    pub fn advisories(&self) -> Vec<GraphAdvisory> {
        self.dangling
            .iter()
            .map(|(issue, target)| GraphAdvisory::DanglingDependency {
                issue: issue.clone(),
                target: target.clone(),
            })
            .chain(self.cycles().into_iter().map(GraphAdvisory::Cycle))
            .collect()
    }
}
