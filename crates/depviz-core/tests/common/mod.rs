//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use depviz_core::config::{AnalysisResult, DependencyFact, Graph, ScanConfig};
use depviz_core::phases::build::run_build_phase;
use depviz_core::phases::classify::run_classify_phase;
use depviz_core::pipeline::run_pipeline;

// ---------------------------------------------------------------------------
// Fixture path resolution
// ---------------------------------------------------------------------------

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

/// A scan config rooted at a fixture.
pub fn fixture_config(name: &str) -> ScanConfig {
    ScanConfig {
        root: fixture_path(name).to_string_lossy().to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Runners
// ---------------------------------------------------------------------------

/// Run the full pipeline on a fixture with default settings.
pub fn run_fixture(name: &str) -> AnalysisResult {
    run_pipeline(&fixture_config(name), None)
}

/// Build and classify a graph straight from `(source, dest)` pairs.
pub fn graph_from_pairs(pairs: &[(&str, &str)]) -> Graph {
    let facts: Vec<DependencyFact> = pairs
        .iter()
        .map(|(s, d)| DependencyFact::new(*s, *d))
        .collect();
    let (mut graph, prefixes) = run_build_phase(&facts);
    run_classify_phase(&mut graph, &prefixes, None);
    graph.to_graph()
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

pub fn node_names(graph: &Graph) -> Vec<String> {
    graph.nodes.iter().map(|n| n.name.clone()).collect()
}

/// Links as `(source_name, target_name)`.
pub fn link_names(graph: &Graph) -> Vec<(String, String)> {
    graph
        .links
        .iter()
        .map(|l| {
            (
                graph.nodes[l.source_id].name.clone(),
                graph.nodes[l.target_id].name.clone(),
            )
        })
        .collect()
}

pub fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}
