//! Result assembly and artifact serialisation.

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;

use crate::config::{AnalysisResult, Graph, RenderConfig, ScanConfig};
use crate::graph::DependencyGraph;
use crate::phases::classify::GroupPatterns;
use crate::phases::scan::ScanReport;

/// Artifact layout written by [`write_output`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `var dependencies = ...;` for a browser viewer to load as a script.
    #[default]
    Script,
    /// The graph as pretty JSON.
    Json,
}

/// Build the AnalysisResult from the finished phases.
pub fn build_result(
    config: &ScanConfig,
    report: &ScanReport,
    graph: &DependencyGraph,
    patterns: &GroupPatterns,
    timings: &HashMap<String, f64>,
    total_ms: f64,
) -> AnalysisResult {
    let graph = graph.to_graph();

    let mut metadata = HashMap::new();
    metadata.insert(
        "root".to_string(),
        serde_json::Value::String(config.root.clone()),
    );
    metadata.insert(
        "analysed_at".to_string(),
        serde_json::Value::String(Utc::now().to_rfc3339()),
    );
    metadata.insert(
        "depviz_version".to_string(),
        serde_json::Value::String(env!("CARGO_PKG_VERSION").to_string()),
    );
    metadata.insert(
        "analysis_duration_ms".to_string(),
        serde_json::json!(((total_ms * 10.0).round() / 10.0)),
    );
    metadata.insert(
        "phase_timings".to_string(),
        serde_json::to_value(timings).unwrap_or_default(),
    );

    let mut stats = HashMap::new();
    stats.insert("files".to_string(), serde_json::json!(report.file_count()));
    stats.insert(
        "skipped_files".to_string(),
        serde_json::json!(report.skipped_files.len()),
    );
    stats.insert("facts".to_string(), serde_json::json!(report.facts.len()));
    stats.insert("nodes".to_string(), serde_json::json!(graph.nodes.len()));
    stats.insert("links".to_string(), serde_json::json!(graph.links.len()));
    stats.insert("groups".to_string(), serde_json::json!(graph.group_count()));
    stats.insert(
        "diagnostics".to_string(),
        serde_json::json!(report.diagnostics.len()),
    );

    AnalysisResult {
        version: "1.0".to_string(),
        metadata,
        stats,
        graph,
        group_patterns: patterns.as_strings().to_vec(),
        diagnostics: report.diagnostics.iter().map(|e| e.to_string()).collect(),
    }
}

/// Render the graph as a script: `var dependencies = ...;`, followed by
/// `var rendererOptions = ...;` when `render` is given.
pub fn render_script(graph: &Graph, render: Option<&RenderConfig>) -> serde_json::Result<String> {
    let mut out = format!(
        "var dependencies = {};\n",
        serde_json::to_string_pretty(graph)?
    );
    if let Some(render) = render {
        out.push_str(&format!(
            "var rendererOptions = {};\n",
            serde_json::to_string_pretty(render)?
        ));
    }
    Ok(out)
}

/// Serialise the graph in `format`.
pub fn render_artifact(
    graph: &Graph,
    format: OutputFormat,
    render: Option<&RenderConfig>,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Script => render_script(graph, render),
        OutputFormat::Json => serde_json::to_string_pretty(graph),
    }
}

/// Write the graph artifact, creating parent directories as needed.
pub fn write_output(
    graph: &Graph,
    output_path: &str,
    format: OutputFormat,
    render: Option<&RenderConfig>,
) -> std::io::Result<()> {
    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let text = render_artifact(graph, format, render).map_err(std::io::Error::other)?;
    std::fs::write(output_path, text)
}
