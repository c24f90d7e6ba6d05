//! Render adapter: what a force-directed viewer needs from a [`Graph`].
//!
//! Nothing here draws. [`ForceParams`] turns a [`RenderConfig`] into the
//! per-node and per-link numbers a simulation consumes, and [`ViewState`]
//! tracks which nodes and links are emphasized after selection or filtering.

mod view;

pub use view::{LinkMark, SelectionMode, ViewState};

use crate::config::{Graph, Node, RenderConfig};

/// Link distance used when either endpoint is de-emphasized.
pub const FADED_LINK_DISTANCE: f64 = 500.0;

/// Force-layout parameters derived from a [`RenderConfig`].
pub struct ForceParams<'a> {
    config: &'a RenderConfig,
}

impl<'a> ForceParams<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Radius grows by a tenth of the base radius per outgoing dependency.
    pub fn node_radius(&self, node: &Node) -> f64 {
        let r = self.config.default_circle_radius;
        r + r * node.source_count as f64 / 10.0
    }

    /// Repulsion: heavier nodes push harder. Faded nodes exert none.
    pub fn node_charge(&self, node: &Node, emphasized: bool) -> f64 {
        if emphasized {
            -(node.weight as f64) * self.config.charge_multiplier
        } else {
            0.0
        }
    }

    pub fn link_distance(&self, source: &Node, target: &Node, emphasized: bool) -> f64 {
        if emphasized {
            self.node_radius(source) + self.node_radius(target) + self.config.default_link_distance
        } else {
            FADED_LINK_DISTANCE
        }
    }

    pub fn link_strength(&self, emphasized: bool) -> f64 {
        if emphasized {
            self.config.default_link_strength
        } else {
            0.0
        }
    }

    /// Label shown next to the node, or `None` when labels are hidden.
    pub fn label(&self, node: &Node) -> Option<String> {
        self.config
            .show_text_near_circles
            .then(|| node.name.chars().take(self.config.default_max_text_length).collect())
    }

    /// Link distances for every link of `graph` given the view's emphasis.
    pub fn link_distances(&self, graph: &Graph, view: &ViewState) -> Vec<f64> {
        graph
            .links
            .iter()
            .map(|link| {
                match (graph.node(link.source_id), graph.node(link.target_id)) {
                    (Some(s), Some(t)) => {
                        let emphasized = view.is_node_emphasized(s.id)
                            && view.is_node_emphasized(t.id);
                        self.link_distance(s, t, emphasized)
                    }
                    _ => FADED_LINK_DISTANCE,
                }
            })
            .collect()
    }
}
