//! depviz core: annotation-driven module dependency graphs.
//!
//! Source files declare themselves with `@class <name>` and their
//! dependencies with `@depend <name>`. This crate scans a tree for those
//! markers, folds them into a directed graph, groups nodes by name prefix,
//! and exposes the layout parameters and selection logic a force-directed
//! viewer needs.

pub mod annotations;
pub mod config;
pub mod error;
pub mod graph;
pub mod output;
pub mod phases;
pub mod pipeline;
pub mod render;
pub mod source;
