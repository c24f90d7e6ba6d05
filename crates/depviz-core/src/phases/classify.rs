//! Phase 3: Assign node weights and prefix groups.

use regex::Regex;

use crate::graph::{DependencyGraph, PrefixTable};

/// Ordered group patterns. Group `n` (1-based) is pattern `n - 1`.
#[derive(Debug, Clone)]
pub struct GroupPatterns {
    sources: Vec<String>,
    /// `None` for a custom pattern that failed to compile; it never matches.
    compiled: Vec<Option<Regex>>,
}

impl GroupPatterns {
    /// One `^<prefix>.*` pattern per prefix, most frequent first.
    pub fn from_prefixes(prefixes: &PrefixTable) -> Self {
        let sources = prefixes
            .ranked()
            .into_iter()
            .map(|(prefix, _)| format!("^{}.*", regex::escape(prefix)))
            .collect();
        Self::compile(sources)
    }

    /// Use `patterns` verbatim, in order.
    pub fn custom(patterns: &[String]) -> Self {
        Self::compile(patterns.to_vec())
    }

    /// Custom patterns when supplied, otherwise derived from `prefixes`.
    pub fn resolve(prefixes: &PrefixTable, custom: Option<&[String]>) -> Self {
        match custom {
            Some(patterns) => Self::custom(patterns),
            None => Self::from_prefixes(prefixes),
        }
    }

    fn compile(sources: Vec<String>) -> Self {
        let compiled = sources
            .iter()
            .map(|src| match Regex::new(src) {
                Ok(re) => Some(re),
                Err(e) => {
                    log::warn!("group pattern {src:?} will never match: {e}");
                    None
                }
            })
            .collect();
        Self { sources, compiled }
    }

    pub fn as_strings(&self) -> &[String] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// 1 + index of the first matching pattern, or 0.
    pub fn group_for(&self, name: &str) -> usize {
        self.compiled
            .iter()
            .position(|re| re.as_ref().is_some_and(|re| re.is_match(name)))
            .map_or(0, |i| i + 1)
    }
}

/// Run the classify phase. Idempotent for a given pattern list.
pub fn run_classify_phase(
    graph: &mut DependencyGraph,
    prefixes: &PrefixTable,
    custom: Option<&[String]>,
) -> GroupPatterns {
    let patterns = GroupPatterns::resolve(prefixes, custom);
    classify_nodes(graph, &patterns);
    patterns
}

/// Set `weight` and `group` on every node in id order.
pub fn classify_nodes(graph: &mut DependencyGraph, patterns: &GroupPatterns) {
    for node in graph.nodes_mut() {
        node.weight = node.source_count;
        node.group = patterns.group_for(&node.name);
        log::trace!(
            "node {} {:?}: group={} weight={}",
            node.id,
            node.name,
            node.group,
            node.weight
        );
    }
}
