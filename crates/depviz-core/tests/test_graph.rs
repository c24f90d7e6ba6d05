//! Graph construction and classification properties.

mod common;

use std::collections::HashSet;

use common::*;
use depviz_core::config::DependencyFact;
use depviz_core::phases::build::run_build_phase;
use depviz_core::phases::classify::{run_classify_phase, GroupPatterns};
use pretty_assertions::assert_eq;

const FACTS: &[(&str, &str)] = &[
    ("abLogin", "cdStore"),
    ("abLogin", "utils"),
    ("abApp", "abLogin"),
    ("abApp", "cdStore"),
    ("cdStore", "efHttp"),
    ("abLogin", "cdStore"),
];

#[test]
fn names_are_distinct() {
    let graph = graph_from_pairs(FACTS);
    let names = node_names(&graph);
    let unique: HashSet<_> = names.iter().collect();
    assert_eq!(unique.len(), names.len());
}

#[test]
fn ids_follow_first_encounter() {
    let graph = graph_from_pairs(FACTS);
    assert_eq!(
        node_names(&graph),
        vec!["abLogin", "cdStore", "utils", "abApp", "efHttp"]
    );
    for (i, node) in graph.nodes.iter().enumerate() {
        assert_eq!(node.id, i);
    }
}

#[test]
fn one_link_per_fact_in_order() {
    let graph = graph_from_pairs(FACTS);
    assert_eq!(link_names(&graph), pairs(FACTS));
}

#[test]
fn counts_match_link_endpoints() {
    let graph = graph_from_pairs(FACTS);
    for node in &graph.nodes {
        let out = graph.links.iter().filter(|l| l.source_id == node.id).count();
        let inc = graph.links.iter().filter(|l| l.target_id == node.id).count();
        assert_eq!(node.source_count, out, "{}", node.name);
        assert_eq!(node.dest_count, inc, "{}", node.name);
        assert_eq!(node.weight, node.source_count);
    }
}

#[test]
fn groups_follow_prefix_frequency() {
    let facts: Vec<_> = FACTS
        .iter()
        .map(|(s, d)| DependencyFact::new(*s, *d))
        .collect();
    let (mut graph, prefixes) = run_build_phase(&facts);
    assert_eq!(prefixes.count("ab"), 6);
    assert_eq!(prefixes.count("cd"), 4);

    let patterns = run_classify_phase(&mut graph, &prefixes, None);
    assert_eq!(
        patterns.as_strings(),
        &["^ab.*", "^cd.*", "^ut.*", "^ef.*"]
    );
    let groups: Vec<_> = graph.nodes().map(|n| (n.name.as_str(), n.group)).collect();
    assert_eq!(
        groups,
        vec![
            ("abLogin", 1),
            ("cdStore", 2),
            ("utils", 3),
            ("abApp", 1),
            ("efHttp", 4)
        ]
    );
}

#[test]
fn custom_patterns_take_precedence_in_order() {
    let facts = vec![
        DependencyFact::new("uiLoginService", "uiButton"),
        DependencyFact::new("uiButton", "coreDom"),
    ];
    let (mut graph, prefixes) = run_build_phase(&facts);
    let custom = vec!["Service$".to_string(), "^ui".to_string()];
    run_classify_phase(&mut graph, &prefixes, Some(custom.as_slice()));

    let groups: Vec<_> = graph.nodes().map(|n| n.group).collect();
    assert_eq!(groups, vec![1, 2, 0]);
}

#[test]
fn reclassify_with_same_patterns_is_stable() {
    let facts: Vec<_> = FACTS
        .iter()
        .map(|(s, d)| DependencyFact::new(*s, *d))
        .collect();
    let (mut graph, prefixes) = run_build_phase(&facts);
    let patterns = GroupPatterns::from_prefixes(&prefixes);
    depviz_core::phases::classify::classify_nodes(&mut graph, &patterns);
    let once = graph.to_graph();
    depviz_core::phases::classify::classify_nodes(&mut graph, &patterns);
    assert_eq!(graph.to_graph(), once);
}

#[test]
fn build_is_deterministic() {
    assert_eq!(graph_from_pairs(FACTS), graph_from_pairs(FACTS));
}
