//! Render adapter: force parameters and view state over a built graph.

mod common;

use std::collections::BTreeSet;

use common::*;
use depviz_core::config::RenderConfig;
use depviz_core::graph::DependencyIndex;
use depviz_core::render::{ForceParams, LinkMark, SelectionMode, ViewState, FADED_LINK_DISTANCE};
use pretty_assertions::assert_eq;

/// a -> b -> c -> a cycle, plus d -> a.
fn cyclic() -> depviz_core::config::Graph {
    graph_from_pairs(&[("a", "b"), ("b", "c"), ("c", "a"), ("d", "a")])
}

fn ids(list: &[usize]) -> BTreeSet<usize> {
    list.iter().copied().collect()
}

#[test]
fn reachable_includes_start_only_through_cycle() {
    let graph = cyclic();
    let index = DependencyIndex::new(&graph);
    assert_eq!(index.reachable_from(0), ids(&[0, 1, 2]));
    assert_eq!(index.reachable_from(3), ids(&[0, 1, 2]));

    let chain = graph_from_pairs(&[("x", "y"), ("y", "z")]);
    let index = DependencyIndex::new(&chain);
    assert_eq!(index.reachable_from(0), ids(&[1, 2]));
    assert!(index.reachable_from(2).is_empty());
}

#[test]
fn recursive_select_on_cycle_terminates() {
    let graph = cyclic();
    let mut view = ViewState::new(&graph);
    view.select_recursive(1);
    assert_eq!(view.emphasized_nodes(), ids(&[0, 1, 2]));
    assert_eq!(view.link_mark(3), Some(LinkMark::Faded));
    assert_eq!(view.link_mark(1), Some(LinkMark::Dependency));
    assert_eq!(view.link_mark(0), Some(LinkMark::Dependant));
    assert_eq!(view.link_mark(2), Some(LinkMark::Dependant));
}

#[test]
fn select_then_filter_then_clear() {
    let graph = cyclic();
    let mut view = ViewState::new(&graph);
    view.select(3);
    assert_eq!(view.selected(), Some((3, SelectionMode::Normal)));
    assert_eq!(view.emphasized_nodes(), ids(&[0, 3]));

    view.filter("[ab]").unwrap();
    assert_eq!(view.selected(), None);
    assert_eq!(view.emphasized_nodes(), ids(&[0, 1]));
    assert_eq!(view.link_mark(0), Some(LinkMark::Default));
    assert_eq!(view.link_mark(2), Some(LinkMark::Faded));

    view.deselect();
    assert_eq!(view.emphasized_nodes(), ids(&[0, 1, 2, 3]));
}

#[test]
fn filtered_links_are_pushed_apart() {
    let graph = cyclic();
    let cfg = RenderConfig::default();
    let params = ForceParams::new(&cfg);
    let mut view = ViewState::new(&graph);

    let before = params.link_distances(&graph, &view);
    assert!(before.iter().all(|d| *d < FADED_LINK_DISTANCE));

    view.filter("^a$").unwrap();
    let after = params.link_distances(&graph, &view);
    assert!(after.iter().all(|d| *d == FADED_LINK_DISTANCE));
}

#[test]
fn heavier_nodes_are_larger() {
    let graph = graph_from_pairs(&[("hub", "a"), ("hub", "b"), ("hub", "c"), ("a", "b")]);
    let cfg = RenderConfig::default();
    let params = ForceParams::new(&cfg);
    let hub = graph.node_by_name("hub").unwrap();
    let leaf = graph.node_by_name("c").unwrap();
    assert!(params.node_radius(hub) > params.node_radius(leaf));
    assert!(params.node_charge(hub, true) < params.node_charge(leaf, true));
}
