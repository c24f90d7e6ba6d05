//! Phase 1: Walk the source tree and extract dependency facts.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::annotations::extract_facts;
use crate::config::{DependencyFact, ScanConfig};
use crate::error::ScanError;
use crate::source::FileSource;

/// Entry names skipped at any depth.
const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "bower_components",
    "__pycache__",
    ".vs",
    ".vscode",
    ".idea",
    "dist",
    "build",
    "target",
    "coverage",
    ".venv",
    "venv",
];

/// Everything the scan phase produced.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Facts in traversal order.
    pub facts: Vec<DependencyFact>,
    /// Files that were read, in traversal order.
    pub files: Vec<PathBuf>,
    /// Files passed over because of the size limit.
    pub skipped_files: Vec<PathBuf>,
    pub diagnostics: Vec<ScanError>,
}

impl ScanReport {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Run the scan phase over `config.root`.
pub fn run_scan_phase<S: FileSource + ?Sized>(source: &S, config: &ScanConfig) -> ScanReport {
    let mut report = ScanReport::default();
    let root = Path::new(&config.root);

    let excludes: Vec<&str> = DEFAULT_EXCLUDES
        .iter()
        .copied()
        .chain(config.exclude_patterns.iter().map(|s| s.as_str()))
        .collect();
    let walker = Walker {
        source,
        config,
        excludes,
    };

    // Serial walk fixes the order; reads below may run in any order.
    let mut candidates = Vec::new();
    walker.visit(root, true, &mut candidates, &mut report);

    for path in candidates {
        match source.file_size(&path) {
            Some(size) if size > config.max_file_size => {
                log::debug!("skipping {} ({size} bytes)", path.display());
                report.skipped_files.push(path);
            }
            _ => report.files.push(path),
        }
    }

    let results: Vec<Result<Vec<DependencyFact>, ScanError>> = report
        .files
        .par_iter()
        .map(|path| scan_file(source, path))
        .collect();

    let scanned = std::mem::take(&mut report.files);
    for (path, result) in scanned.into_iter().zip(results) {
        match result {
            Ok(facts) => {
                for fact in &facts {
                    log::trace!("{}: {} -> {}", path.display(), fact.source, fact.dest);
                }
                report.facts.extend(facts);
                report.files.push(path);
            }
            Err(e) => {
                log::warn!("{e}");
                report.diagnostics.push(e);
            }
        }
    }

    log::debug!(
        "scanned {} files, {} facts, {} diagnostics",
        report.files.len(),
        report.facts.len(),
        report.diagnostics.len()
    );
    report
}

/// Read one file and extract its facts.
pub fn scan_file<S: FileSource + ?Sized>(
    source: &S,
    path: &Path,
) -> Result<Vec<DependencyFact>, ScanError> {
    let content = source
        .read_text(path)
        .map_err(|e| ScanError::from_read(path.to_path_buf(), e))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(extract_facts(&file_name, &content))
}

struct Walker<'a, S: ?Sized> {
    source: &'a S,
    config: &'a ScanConfig,
    excludes: Vec<&'a str>,
}

impl<S: FileSource + ?Sized> Walker<'_, S> {
    /// Depth-first, pre-order: a subdirectory is fully visited at its
    /// position in the listing, before the siblings that follow it.
    fn visit(&self, path: &Path, is_root: bool, out: &mut Vec<PathBuf>, report: &mut ScanReport) {
        if !self.source.exists(path) {
            let err = ScanError::MissingPath {
                path: path.to_path_buf(),
            };
            log::warn!("{err}");
            report.diagnostics.push(err);
            return;
        }

        if !self.source.is_directory(path) {
            if is_root || self.wants_file(path) {
                out.push(path.to_path_buf());
            }
            return;
        }

        let entries = match self.source.list(path) {
            Ok(entries) => entries,
            Err(source) => {
                let err = ScanError::UnreadableDirectory {
                    path: path.to_path_buf(),
                    source,
                };
                log::warn!("{err}");
                report.diagnostics.push(err);
                return;
            }
        };

        for name in entries {
            if self.excludes.iter().any(|p| name == *p) {
                continue;
            }
            let child = path.join(&name);
            if self.source.is_symlink(&child) && self.source.is_directory(&child) {
                log::debug!("not following symlinked directory {}", child.display());
                continue;
            }
            if !self.config.include_hidden
                && name.starts_with('.')
                && self.source.is_directory(&child)
            {
                continue;
            }
            self.visit(&child, false, out, report);
        }
    }

    fn wants_file(&self, path: &Path) -> bool {
        let Some(filter) = &self.config.extensions else {
            return true;
        };
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        filter
            .iter()
            .any(|f| f.trim_start_matches('.').eq_ignore_ascii_case(&ext))
    }
}
