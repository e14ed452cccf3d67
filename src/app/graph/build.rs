use std::collections::HashMap;

use lifecycle_atlas::layout::{LayoutOutput, layout};

use super::super::{LayoutCache, ViewModel};

impl ViewModel {
    /// Recomputes the layout when the state revision moved since the last pass.
    pub(in crate::app) fn ensure_layout(&mut self) {
        let revision = self.ui_state.revision();
        if self
            .layout_cache
            .as_ref()
            .is_some_and(|cache| cache.revision == revision)
        {
            return;
        }

        let output = layout(
            self.store.phases(),
            &self.ui_state.layout_input(),
            &self.layout_config,
        );
        let index_by_id = index_nodes(&output);

        self.layout_cache = Some(LayoutCache {
            revision,
            output,
            index_by_id,
        });
    }

    pub(in crate::app) fn layout_output(&self) -> Option<&LayoutOutput> {
        self.layout_cache.as_ref().map(|cache| &cache.output)
    }

    pub(in crate::app) fn visible_counts(&self) -> Option<(usize, usize, usize)> {
        let output = self.layout_output()?;
        let dimmed = output
            .nodes
            .iter()
            .filter(|node| node.hints.dimmed)
            .count();
        Some((output.nodes.len(), output.edges.len(), dimmed))
    }
}

fn index_nodes(output: &LayoutOutput) -> HashMap<String, usize> {
    output
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (node.id.clone(), index))
        .collect()
}
