//! Core data types and configuration for depviz.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One declared `source -> dest` dependency, in file-scan order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyFact {
    pub source: String,
    pub dest: String,
}

impl DependencyFact {
    pub fn new(source: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }
}

/// A module in the dependency graph.
///
/// `id` is assigned in first-encounter order and is what [`Link`] endpoints
/// refer to. `weight` and `group` stay zero until the classify phase runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: usize,
    pub name: String,
    pub source_count: usize,
    pub dest_count: usize,
    #[serde(default)]
    pub weight: usize,
    #[serde(default)]
    pub group: usize,
}

impl Node {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            source_count: 0,
            dest_count: 0,
            weight: 0,
            group: 0,
        }
    }
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub source_id: usize,
    pub target_id: usize,
}

/// The finished dependency graph handed to renderers.
///
/// `nodes` is in ascending id order, `links` in fact order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Look up a node by its unique name.
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id).filter(|n| n.id == id)
    }

    /// Number of distinct non-zero groups in use.
    pub fn group_count(&self) -> usize {
        let mut groups: Vec<usize> = self
            .nodes
            .iter()
            .map(|n| n.group)
            .filter(|g| *g > 0)
            .collect();
        groups.sort_unstable();
        groups.dedup();
        groups.len()
    }
}

/// Display options understood by the viewer.
///
/// Keys are camelCase on the wire; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    /// Base edge length added to both endpoint radii.
    #[serde(default = "default_link_distance")]
    pub default_link_distance: f64,
    /// Spring coefficient for emphasized links.
    #[serde(default = "default_link_strength")]
    pub default_link_strength: f64,
    /// Base node radius before scaling by source count.
    #[serde(default = "default_circle_radius")]
    pub default_circle_radius: f64,
    #[serde(default = "default_true")]
    pub show_text_near_circles: bool,
    /// Labels longer than this many characters are truncated.
    #[serde(default = "default_max_text_length")]
    pub default_max_text_length: usize,
    /// Ordered group patterns overriding prefix derivation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_group_patterns: Option<Vec<String>>,
    /// Repulsion scaling applied to node weight.
    #[serde(default = "default_charge_multiplier")]
    pub charge_multiplier: f64,
}

fn default_link_distance() -> f64 {
    20.0
}
fn default_link_strength() -> f64 {
    0.1
}
fn default_circle_radius() -> f64 {
    30.0
}
fn default_true() -> bool {
    true
}
fn default_max_text_length() -> usize {
    100
}
fn default_charge_multiplier() -> f64 {
    300.0
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_link_distance: default_link_distance(),
            default_link_strength: default_link_strength(),
            default_circle_radius: default_circle_radius(),
            show_text_near_circles: default_true(),
            default_max_text_length: default_max_text_length(),
            custom_group_patterns: None,
            charge_multiplier: default_charge_multiplier(),
        }
    }
}

impl RenderConfig {
    /// Parse a JSON document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    /// Load a JSON config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

/// Configuration for a scan run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File or directory to scan.
    #[serde(default)]
    pub root: String,
    /// Only read files with one of these extensions (without the dot).
    pub extensions: Option<Vec<String>>,
    /// Entry names to skip, in addition to the built-in exclusions.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default)]
    pub include_hidden: bool,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub render: RenderConfig,
}

fn default_max_file_size() -> u64 {
    1_000_000
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: String::new(),
            extensions: None,
            exclude_patterns: Vec::new(),
            include_hidden: false,
            max_file_size: default_max_file_size(),
            verbose: false,
            render: RenderConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Custom group patterns, if the render config supplies any.
    pub fn custom_group_patterns(&self) -> Option<&[String]> {
        self.render.custom_group_patterns.as_deref()
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub stats: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub graph: Graph,
    /// Resolved group patterns; group `n` is `group_patterns[n - 1]`.
    #[serde(default)]
    pub group_patterns: Vec<String>,
    #[serde(default)]
    pub diagnostics: Vec<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            version: default_version(),
            metadata: HashMap::new(),
            stats: HashMap::new(),
            graph: Graph::default(),
            group_patterns: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}
