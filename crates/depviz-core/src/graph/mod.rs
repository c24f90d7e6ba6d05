pub mod dependency_graph;
pub mod prefix_table;
pub mod query;

pub use dependency_graph::DependencyGraph;
pub use prefix_table::PrefixTable;
pub use query::DependencyIndex;
