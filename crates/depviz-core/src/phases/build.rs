//! Phase 2: Fold dependency facts into a graph and a prefix table.

use crate::config::{DependencyFact, Link};
use crate::graph::{DependencyGraph, PrefixTable};

/// Accumulates facts one at a time. Owns all state for a single build.
#[derive(Default)]
pub struct GraphBuilder {
    graph: DependencyGraph,
    prefixes: PrefixTable,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one fact: source node first, then dest, then the link.
    pub fn add_fact(&mut self, fact: &DependencyFact) -> Link {
        let link = self.graph.add_dependency(fact);
        self.prefixes.record(&fact.source);
        self.prefixes.record(&fact.dest);
        link
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn prefixes(&self) -> &PrefixTable {
        &self.prefixes
    }

    pub fn finish(self) -> (DependencyGraph, PrefixTable) {
        (self.graph, self.prefixes)
    }
}

/// Run the build phase over facts in scan order.
pub fn run_build_phase(facts: &[DependencyFact]) -> (DependencyGraph, PrefixTable) {
    let mut builder = GraphBuilder::new();
    for fact in facts {
        builder.add_fact(fact);
    }
    log::debug!(
        "built graph: {} nodes, {} links, {} prefixes",
        builder.graph.node_count(),
        builder.graph.link_count(),
        builder.prefixes.len()
    );
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn facts(pairs: &[(&str, &str)]) -> Vec<DependencyFact> {
        pairs
            .iter()
            .map(|(s, d)| DependencyFact::new(*s, *d))
            .collect()
    }

    #[test]
    fn three_facts_three_nodes() {
        let (graph, _) = run_build_phase(&facts(&[("A", "B"), ("B", "C"), ("A", "C")]));
        let names: Vec<_> = graph.nodes().map(|n| (n.id, n.name.as_str())).collect();
        assert_eq!(names, vec![(0, "A"), (1, "B"), (2, "C")]);

        let links: Vec<_> = graph
            .links()
            .iter()
            .map(|l| (l.source_id, l.target_id))
            .collect();
        assert_eq!(links, vec![(0, 1), (1, 2), (0, 2)]);

        let sources: Vec<_> = graph.nodes().map(|n| n.source_count).collect();
        assert_eq!(sources, vec![2, 1, 0]);
        let dests: Vec<_> = graph.nodes().map(|n| n.dest_count).collect();
        assert_eq!(dests, vec![0, 1, 2]);
    }

    #[test]
    fn empty_input() {
        let (graph, prefixes) = run_build_phase(&[]);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.link_count(), 0);
        assert!(prefixes.is_empty());
    }

    #[test]
    fn source_created_before_dest() {
        let (graph, _) = run_build_phase(&facts(&[("new1", "new2"), ("new3", "new1")]));
        let names: Vec<_> = graph.nodes().map(|n| n.name.clone()).collect();
        assert_eq!(names, vec!["new1", "new2", "new3"]);
    }

    #[test]
    fn prefixes_counted_per_occurrence() {
        let (_, prefixes) = run_build_phase(&facts(&[("abX", "cdY"), ("abZ", "cdY")]));
        assert_eq!(prefixes.count("ab"), 2);
        assert_eq!(prefixes.count("cd"), 2);
    }

    #[test]
    fn incremental_builder_returns_links() {
        let mut b = GraphBuilder::new();
        let l1 = b.add_fact(&DependencyFact::new("a", "b"));
        let l2 = b.add_fact(&DependencyFact::new("a", "b"));
        assert_eq!(l1, l2);
        assert_eq!(b.graph().link_count(), 2);
        assert_eq!(b.prefixes().count("a"), 2);
    }
}
