//! Neighborhood and reachability queries over a finished [`Graph`].

use std::collections::{BTreeSet, HashSet, VecDeque};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::config::Graph;

/// Adjacency index built once from a [`Graph`]'s links.
///
/// Edge weights are link positions, so results can be mapped back to
/// `graph.links`.
pub struct DependencyIndex {
    graph: DiGraph<(), usize>,
}

impl DependencyIndex {
    pub fn new(graph: &Graph) -> Self {
        let mut g = DiGraph::with_capacity(graph.nodes.len(), graph.links.len());
        for _ in &graph.nodes {
            g.add_node(());
        }
        for (i, link) in graph.links.iter().enumerate() {
            if link.source_id < graph.nodes.len() && link.target_id < graph.nodes.len() {
                g.add_edge(NodeIndex::new(link.source_id), NodeIndex::new(link.target_id), i);
            } else {
                log::warn!(
                    "link {i} points outside the node set ({} -> {})",
                    link.source_id,
                    link.target_id
                );
            }
        }
        Self { graph: g }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn contains(&self, id: usize) -> bool {
        id < self.graph.node_count()
    }

    /// Direct successors of `id` (nodes it depends on).
    pub fn dependencies_of(&self, id: usize) -> BTreeSet<usize> {
        self.adjacent(id, Direction::Outgoing)
    }

    /// Direct predecessors of `id` (nodes that depend on it).
    pub fn dependants_of(&self, id: usize) -> BTreeSet<usize> {
        self.adjacent(id, Direction::Incoming)
    }

    /// Direct neighbors in either direction.
    pub fn neighbors(&self, id: usize) -> BTreeSet<usize> {
        let mut out = self.dependencies_of(id);
        out.extend(self.dependants_of(id));
        out
    }

    /// Forward transitive closure: every node reachable from `id` along
    /// outgoing links. `id` itself is included only if a cycle leads back.
    pub fn reachable_from(&self, id: usize) -> BTreeSet<usize> {
        let mut reached = BTreeSet::new();
        if !self.contains(id) {
            return reached;
        }

        let mut visited: HashSet<usize> = HashSet::new();
        let mut queue: VecDeque<usize> = self.dependencies_of(id).into_iter().collect();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            reached.insert(current);
            for next in self.dependencies_of(current) {
                if !visited.contains(&next) {
                    queue.push_back(next);
                }
            }
        }
        reached
    }

    fn adjacent(&self, id: usize, dir: Direction) -> BTreeSet<usize> {
        if !self.contains(id) {
            return BTreeSet::new();
        }
        self.graph
            .neighbors_directed(NodeIndex::new(id), dir)
            .map(|n| n.index())
            .collect()
    }
}
