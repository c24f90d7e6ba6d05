//! `@class` / `@depend` annotation extraction.
//!
//! Everything here is a pure function of the text it is given. A name is the
//! run of non-whitespace after the keyword, so `/* @depend util */` yields
//! `util`, not `util */`.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::DependencyFact;

/// Declares the logical name of the file it appears in.
pub static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@class[ \t]+(\S+)").unwrap());

/// Declares one dependency of the enclosing file. Repeatable.
pub static DEPEND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@depend[ \t]+(\S+)").unwrap());

/// All first-group captures of `pattern` in `text`, left to right.
pub fn extract_all<'t>(text: &'t str, pattern: &Regex) -> Vec<&'t str> {
    pattern
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// The first capture of `pattern` in `text`, if any.
pub fn extract_first<'t>(text: &'t str, pattern: &Regex) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Strip `.ext` from the end of `name` when `ext` is given and matches.
pub fn strip_extension<'n>(name: &'n str, ext: Option<&str>) -> &'n str {
    match ext {
        Some(ext) if !ext.is_empty() => name
            .strip_suffix(ext)
            .and_then(|rest| rest.strip_suffix('.'))
            .unwrap_or(name),
        _ => name,
    }
}

/// Last `/`- or `\`-separated segment of a referenced path.
pub fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Logical name of a file: its `@class` value, else its stem.
///
/// Returns `None` only when neither yields a non-empty name.
pub fn logical_name(file_name: &str, content: &str) -> Option<String> {
    let ext = extension_of(file_name);

    if let Some(declared) = extract_first(content, &CLASS_RE) {
        let name = strip_extension(declared, ext);
        if !name.is_empty() {
            return Some(name.to_string());
        }
        log::debug!("ignoring empty @class in {file_name}");
    }

    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    (!stem.is_empty()).then_some(stem)
}

/// Dependency names declared in `content`, in order of appearance.
pub fn dependency_names<'t>(file_name: &str, content: &'t str) -> Vec<&'t str> {
    let ext = extension_of(file_name);
    extract_all(content, &DEPEND_RE)
        .into_iter()
        .filter_map(|raw| {
            let name = strip_extension(base_name(raw), ext);
            if name.is_empty() {
                log::debug!("ignoring empty @depend {raw:?} in {file_name}");
                None
            } else {
                Some(name)
            }
        })
        .collect()
}

/// Every fact one file contributes, in order of appearance.
pub fn extract_facts(file_name: &str, content: &str) -> Vec<DependencyFact> {
    let deps = dependency_names(file_name, content);
    if deps.is_empty() {
        return Vec::new();
    }
    let Some(source) = logical_name(file_name, content) else {
        return Vec::new();
    };
    deps.into_iter()
        .map(|dest| DependencyFact::new(source.clone(), dest))
        .collect()
}

fn extension_of(file_name: &str) -> Option<&str> {
    Path::new(file_name).extension().and_then(|e| e.to_str())
}
