use std::collections::BTreeSet;

use regex::RegexBuilder;

use crate::config::Graph;
use crate::error::FilterError;
use crate::graph::DependencyIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// The node and its direct neighbors, both directions.
    Normal,
    /// The node and everything it transitively depends on.
    Recursive,
}

/// How a link is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMark {
    Default,
    /// Outgoing from the selected node.
    Dependency,
    /// Emphasized, but not outgoing from the selected node.
    Dependant,
    Faded,
}

/// Emphasis state of a graph in the viewer.
///
/// De-emphasized elements stay in the graph; only their marks change.
pub struct ViewState<'g> {
    graph: &'g Graph,
    index: DependencyIndex,
    selected: Option<(usize, SelectionMode)>,
    node_emphasis: Vec<bool>,
    link_marks: Vec<LinkMark>,
}

impl<'g> ViewState<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            index: DependencyIndex::new(graph),
            selected: None,
            node_emphasis: vec![true; graph.nodes.len()],
            link_marks: vec![LinkMark::Default; graph.links.len()],
        }
    }

    pub fn graph(&self) -> &Graph {
        self.graph
    }

    pub fn index(&self) -> &DependencyIndex {
        &self.index
    }

    pub fn selected(&self) -> Option<(usize, SelectionMode)> {
        self.selected
    }

    pub fn is_node_emphasized(&self, id: usize) -> bool {
        self.node_emphasis.get(id).copied().unwrap_or(false)
    }

    pub fn link_mark(&self, link: usize) -> Option<LinkMark> {
        self.link_marks.get(link).copied()
    }

    pub fn emphasized_nodes(&self) -> BTreeSet<usize> {
        self.node_emphasis
            .iter()
            .enumerate()
            .filter_map(|(id, on)| on.then_some(id))
            .collect()
    }

    /// Highlight `id` and its direct neighbors. Selecting the same node
    /// again deselects.
    pub fn select(&mut self, id: usize) {
        if self.toggle_off(id, SelectionMode::Normal) {
            return;
        }
        let mut keep = self.index.neighbors(id);
        keep.insert(id);
        self.emphasize_only(&keep);

        for (mark, link) in self.link_marks.iter_mut().zip(&self.graph.links) {
            *mark = if link.source_id == id {
                LinkMark::Dependency
            } else if link.target_id == id {
                LinkMark::Dependant
            } else {
                LinkMark::Faded
            };
        }
        self.selected = Some((id, SelectionMode::Normal));
    }

    /// Highlight `id` and its forward transitive closure. Selecting the
    /// same node again deselects.
    pub fn select_recursive(&mut self, id: usize) {
        if self.toggle_off(id, SelectionMode::Recursive) {
            return;
        }
        let mut keep = self.index.reachable_from(id);
        keep.insert(id);
        self.emphasize_only(&keep);

        for (mark, link) in self.link_marks.iter_mut().zip(&self.graph.links) {
            *mark = if !keep.contains(&link.source_id) {
                LinkMark::Faded
            } else if link.source_id == id {
                LinkMark::Dependency
            } else {
                LinkMark::Dependant
            };
        }
        self.selected = Some((id, SelectionMode::Recursive));
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.node_emphasis.fill(true);
        self.link_marks.fill(LinkMark::Default);
    }

    /// Emphasize nodes whose name matches `text` (case-insensitive regex).
    /// A link stays emphasized only if both endpoints match. Empty text
    /// clears the filter.
    pub fn filter(&mut self, text: &str) -> Result<(), FilterError> {
        if text.is_empty() {
            self.deselect();
            return Ok(());
        }
        let re = RegexBuilder::new(text).case_insensitive(true).build()?;
        self.deselect();

        for (on, node) in self.node_emphasis.iter_mut().zip(&self.graph.nodes) {
            *on = re.is_match(&node.name);
        }
        for (mark, link) in self.link_marks.iter_mut().zip(&self.graph.links) {
            let both = [link.source_id, link.target_id].iter().all(|&id| {
                self.graph
                    .node(id)
                    .is_some_and(|n| re.is_match(&n.name))
            });
            *mark = if both { LinkMark::Default } else { LinkMark::Faded };
        }
        Ok(())
    }

    /// Returns true if this call deselected instead of selecting.
    fn toggle_off(&mut self, id: usize, mode: SelectionMode) -> bool {
        if self.selected == Some((id, mode)) {
            self.deselect();
            return true;
        }
        if self.graph.node(id).is_none() {
            log::debug!("ignoring selection of unknown node {id}");
            return true;
        }
        false
    }

    fn emphasize_only(&mut self, keep: &BTreeSet<usize>) {
        for (id, on) in self.node_emphasis.iter_mut().enumerate() {
            *on = keep.contains(&id);
        }
    }
}
