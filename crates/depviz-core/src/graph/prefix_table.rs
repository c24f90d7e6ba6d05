//! Two-character name prefix frequencies.

use indexmap::IndexMap;

/// Number of leading characters that make up a prefix.
pub const PREFIX_LEN: usize = 2;

/// Prefix → occurrence count, remembering first-seen order.
///
/// Every name seen while linking is counted, once per occurrence, so a name
/// that appears in five facts contributes five.
#[derive(Debug, Clone, Default)]
pub struct PrefixTable {
    counts: IndexMap<String, usize>,
}

impl PrefixTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the prefix of `name`. Names shorter than two characters count
    /// as their own prefix; the empty name is ignored.
    pub fn record(&mut self, name: &str) {
        let prefix = prefix_of(name);
        if prefix.is_empty() {
            return;
        }
        *self.counts.entry(prefix.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.counts.get(prefix).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Prefixes in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Prefixes by descending count; ties keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.iter().collect();
        // stable: equal counts stay in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl<'a> FromIterator<(&'a str, usize)> for PrefixTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, usize)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (prefix, count) in iter {
            *table.counts.entry(prefix.to_string()).or_insert(0) += count;
        }
        table
    }
}

/// First [`PREFIX_LEN`] characters of `name`, on a char boundary.
pub fn prefix_of(name: &str) -> &str {
    match name.char_indices().nth(PREFIX_LEN) {
        Some((end, _)) => &name[..end],
        None => name,
    }
}
