//! Sequential phase orchestrator with timing.

use std::collections::HashMap;
use std::time::Instant;

use crate::config::{AnalysisResult, ScanConfig};
use crate::output::build_result;
use crate::phases;
use crate::source::{FileSource, FsFileSource};

/// Phase labels for progress reporting.
const PHASE_LABELS: &[(&str, &str)] = &[
    ("scan", "Scanning annotations"),
    ("build", "Building dependency graph"),
    ("classify", "Grouping modules"),
];

/// Progress callback type: (phase_name, label).
pub type ProgressCallback = Box<dyn FnMut(&str, &str)>;

/// Run scan, build and classify over the local filesystem.
pub fn run_pipeline(
    config: &ScanConfig,
    progress_callback: Option<ProgressCallback>,
) -> AnalysisResult {
    run_pipeline_with_source(&FsFileSource::new(), config, progress_callback)
}

/// Run the pipeline against any [`FileSource`].
pub fn run_pipeline_with_source<S: FileSource + ?Sized>(
    source: &S,
    config: &ScanConfig,
    mut progress_callback: Option<ProgressCallback>,
) -> AnalysisResult {
    let mut timings: HashMap<String, f64> = HashMap::new();
    let total_start = Instant::now();

    let mut report_phase = |name: &str| {
        if let Some(ref mut cb) = progress_callback {
            let label = PHASE_LABELS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, l)| *l)
                .unwrap_or(name);
            cb(name, label);
        }
        Instant::now()
    };

    let start = report_phase("scan");
    let report = phases::scan::run_scan_phase(source, config);
    timings.insert("scan".to_string(), start.elapsed().as_secs_f64());

    let start = report_phase("build");
    let (mut graph, prefixes) = phases::build::run_build_phase(&report.facts);
    timings.insert("build".to_string(), start.elapsed().as_secs_f64());

    let start = report_phase("classify");
    let patterns =
        phases::classify::run_classify_phase(&mut graph, &prefixes, config.custom_group_patterns());
    timings.insert("classify".to_string(), start.elapsed().as_secs_f64());

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    log::info!(
        "pipeline finished in {total_ms:.1}ms: {} nodes, {} links",
        graph.node_count(),
        graph.link_count()
    );

    build_result(config, &report, &graph, &patterns, &timings, total_ms)
}
