//! In-memory dependency graph backed by petgraph::DiGraph.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::config::{DependencyFact, Graph, Link, Node};

/// Wrapper around petgraph::DiGraph keyed by node name.
///
/// Nodes are never removed, so a node's `NodeIndex` equals its `id` and edge
/// indices follow insertion order. Parallel edges are kept.
pub struct DependencyGraph {
    graph: DiGraph<Node, ()>,
    /// O(1) name → NodeIndex lookup.
    name_index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_index: HashMap::new(),
        }
    }

    /// Get or create the node named `name`.
    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.name_index.get(name) {
            idx
        } else {
            let id = self.graph.node_count();
            let idx = self.graph.add_node(Node::new(id, name));
            self.name_index.insert(name.to_string(), idx);
            idx
        }
    }

    /// Record one fact: resolve the source, then the dest, then link them.
    pub fn add_dependency(&mut self, fact: &DependencyFact) -> Link {
        let source = self.ensure_node(&fact.source);
        self.graph[source].source_count += 1;

        let dest = self.ensure_node(&fact.dest);
        self.graph[dest].dest_count += 1;

        self.graph.add_edge(source, dest, ());

        Link {
            source_id: source.index(),
            target_id: dest.index(),
        }
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.name_index
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Nodes in id order, mutably. Ids must not be changed.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.graph.node_weights_mut()
    }

    /// Links in insertion order.
    pub fn links(&self) -> Vec<Link> {
        self.graph
            .edge_references()
            .map(|e| Link {
                source_id: e.source().index(),
                target_id: e.target().index(),
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Snapshot as the serializable [`Graph`].
    pub fn to_graph(&self) -> Graph {
        Graph {
            nodes: self.nodes().cloned().collect(),
            links: self.links(),
        }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_dependency_creates_both_nodes() {
        let mut g = DependencyGraph::new();
        let link = g.add_dependency(&DependencyFact::new("a", "b"));
        assert_eq!(
            link,
            Link {
                source_id: 0,
                target_id: 1
            }
        );
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.node_by_name("a").unwrap().source_count, 1);
        assert_eq!(g.node_by_name("b").unwrap().dest_count, 1);
    }

    #[test]
    fn existing_nodes_are_reused() {
        let mut g = DependencyGraph::new();
        g.add_dependency(&DependencyFact::new("a", "b"));
        g.add_dependency(&DependencyFact::new("b", "a"));
        assert_eq!(g.node_count(), 2);
        let a = g.node_by_name("a").unwrap();
        assert_eq!((a.id, a.source_count, a.dest_count), (0, 1, 1));
    }

    #[test]
    fn parallel_edges_are_kept_in_order() {
        let mut g = DependencyGraph::new();
        g.add_dependency(&DependencyFact::new("a", "b"));
        g.add_dependency(&DependencyFact::new("c", "a"));
        g.add_dependency(&DependencyFact::new("a", "b"));
        let pairs: Vec<_> = g.links().iter().map(|l| (l.source_id, l.target_id)).collect();
        assert_eq!(pairs, vec![(0, 1), (2, 0), (0, 1)]);
        assert_eq!(g.link_count(), 3);
    }

    #[test]
    fn self_dependency() {
        let mut g = DependencyGraph::new();
        let link = g.add_dependency(&DependencyFact::new("loop", "loop"));
        assert_eq!((link.source_id, link.target_id), (0, 0));
        let n = g.node(0).unwrap();
        assert_eq!((n.source_count, n.dest_count), (1, 1));
    }

    #[test]
    fn to_graph_matches_ids() {
        let mut g = DependencyGraph::new();
        g.add_dependency(&DependencyFact::new("x", "y"));
        let graph = g.to_graph();
        for (i, node) in graph.nodes.iter().enumerate() {
            assert_eq!(node.id, i);
        }
        assert!(g.has_node("y"));
        assert!(!g.has_node("z"));
    }
}
