//! depviz CLI: map `@depend` annotations into a dependency graph artifact.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use depviz_core::config::{AnalysisResult, RenderConfig, ScanConfig};
use depviz_core::graph::DependencyIndex;
use depviz_core::output::{write_output, OutputFormat};
use depviz_core::pipeline;

#[derive(Parser)]
#[command(
    name = "depviz",
    about = "depviz - Map annotated module dependencies into a force-directed graph"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// `var dependencies = ...;` script
    Script,
    /// Plain JSON graph
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Script => OutputFormat::Script,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Traversal filters shared by every command that scans.
#[derive(Args)]
struct ScanFilters {
    /// Comma-separated file extension filter
    #[arg(long)]
    ext: Option<String>,

    /// Additional entry names to exclude
    #[arg(long)]
    exclude: Vec<String>,

    /// Descend into hidden directories
    #[arg(long)]
    include_hidden: bool,

    /// Skip files larger than this many bytes
    #[arg(long, default_value = "1000000")]
    max_file_size: u64,
}

impl ScanFilters {
    fn into_config(self, path: &Path) -> ScanConfig {
        let extensions = self.ext.map(|e| {
            e.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        });
        ScanConfig {
            root: path.to_string_lossy().to_string(),
            extensions,
            exclude_patterns: self.exclude,
            include_hidden: self.include_hidden,
            max_file_size: self.max_file_size,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a file or directory and write the dependency graph
    Scan {
        /// File or directory to scan
        path: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = "dependencies.js")]
        output: String,

        /// Artifact format
        #[arg(long, value_enum, default_value = "script")]
        format: FormatArg,

        /// Renderer options JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Group pattern, in precedence order (overrides prefix grouping)
        #[arg(long = "group-pattern")]
        group_patterns: Vec<String>,

        #[command(flatten)]
        filters: ScanFilters,

        /// Suppress all output except errors
        #[arg(long)]
        quiet: bool,
    },
    /// Print what a module depends on and what depends on it
    Deps {
        /// File or directory to scan
        path: PathBuf,

        /// Module name to look up
        name: String,

        /// Follow dependencies transitively
        #[arg(long)]
        recursive: bool,

        #[command(flatten)]
        filters: ScanFilters,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan {
            path,
            output,
            format,
            config,
            group_patterns,
            filters,
            quiet,
        } => {
            let mut render = None;
            if let Some(config_path) = &config {
                match RenderConfig::load(config_path) {
                    Ok(cfg) => render = Some(cfg),
                    Err(e) => {
                        eprintln!("Error loading config: {e}");
                        std::process::exit(1);
                    }
                }
            }

            let mut scan_config = ScanConfig {
                verbose: cli.verbose > 0,
                render: render.clone().unwrap_or_default(),
                ..filters.into_config(&path)
            };
            if !group_patterns.is_empty() {
                scan_config.render.custom_group_patterns = Some(group_patterns);
            }

            let result = if quiet {
                pipeline::run_pipeline(&scan_config, None)
            } else {
                run_with_progress(&scan_config)
            };

            if let Err(e) = write_output(&result.graph, &output, format.into(), render.as_ref()) {
                eprintln!("Error writing output: {e}");
                std::process::exit(1);
            }

            if !quiet {
                println!(
                    "\n  {} {}",
                    style("Output written to:").green(),
                    output
                );
            }
        }
        Commands::Deps {
            path,
            name,
            recursive,
            filters,
        } => {
            let scan_config = filters.into_config(&path);
            let result = pipeline::run_pipeline(&scan_config, None);
            print_deps(&result, &name, recursive);
        }
    }
}

fn run_with_progress(config: &ScanConfig) -> AnalysisResult {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(
            spinner.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
    }
    pb.set_message("Initialising...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let progress: pipeline::ProgressCallback = {
        let pb = pb.clone();
        Box::new(move |_name, label| {
            pb.set_message(label.to_string());
        })
    };

    let start = Instant::now();
    let result = pipeline::run_pipeline(config, Some(progress));
    pb.finish_and_clear();

    println!(
        "\n{}  depviz: {}",
        style("✓").green().bold(),
        style(
            Path::new(&config.root)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| config.root.clone())
        )
        .bold()
    );
    for (label, key) in [
        ("Files:", "files"),
        ("Skipped:", "skipped_files"),
        ("Modules:", "nodes"),
        ("Links:", "links"),
        ("Groups:", "groups"),
    ] {
        println!(
            "  {:<14} {}",
            label,
            result.stats.get(key).unwrap_or(&serde_json::json!(0))
        );
    }

    let duration = start.elapsed();
    println!(
        "  {:<14} {:.1}ms",
        "Duration:",
        duration.as_secs_f64() * 1000.0
    );

    if !result.diagnostics.is_empty() {
        println!(
            "  {:<14} {}",
            style("Warnings:").yellow(),
            result.diagnostics.len()
        );
    }

    if config.verbose {
        if let Some(serde_json::Value::Object(timings)) = result.metadata.get("phase_timings") {
            println!("\n  Phase Timings:");
            for (phase, secs) in timings {
                if let Some(val) = secs.as_f64() {
                    println!("    {:<14} {:.1}ms", phase, val * 1000.0);
                }
            }
        }
        if !result.group_patterns.is_empty() {
            println!("\n  Groups:");
            for (i, pattern) in result.group_patterns.iter().enumerate() {
                println!("    {:<4} {}", i + 1, pattern);
            }
        }
    }

    result
}

fn print_deps(result: &AnalysisResult, name: &str, recursive: bool) {
    let graph = &result.graph;
    let Some(node) = graph.node_by_name(name) else {
        eprintln!("Unknown module: {name}");
        std::process::exit(1);
    };
    let index = DependencyIndex::new(graph);
    let names = |ids: std::collections::BTreeSet<usize>| -> Vec<String> {
        ids.into_iter()
            .filter_map(|id| graph.node(id).map(|n| n.name.clone()))
            .collect()
    };

    println!("{}", style(&node.name).bold());
    if recursive {
        println!("  {}", style("Transitive dependencies:").green());
        for dep in names(index.reachable_from(node.id)) {
            println!("    {dep}");
        }
    } else {
        println!("  {}", style("Depends on:").green());
        for dep in names(index.dependencies_of(node.id)) {
            println!("    {dep}");
        }
        println!("  {}", style("Used by:").green());
        for dep in names(index.dependants_of(node.id)) {
            println!("    {dep}");
        }
    }
}
