use std::collections::{HashMap, HashSet};

use lifecycle_atlas::content::ContentStore;

/// Layout indices on the path from a phase down to the selected node.
#[derive(Debug, Default)]
pub(super) struct HighlightState {
    pub(super) path_nodes: HashSet<usize>,
    pub(super) path_edges: HashSet<(usize, usize)>,
}

impl HighlightState {
    pub(super) fn is_active(&self) -> bool {
        !self.path_nodes.is_empty()
    }
}

pub(super) fn build_highlight_state(
    store: &ContentStore,
    index_by_id: &HashMap<String, usize>,
    selected_id: &str,
) -> HighlightState {
    let path = store
        .breadcrumbs(selected_id)
        .into_iter()
        .filter_map(|crumb| index_by_id.get(&crumb.id).copied())
        .collect::<Vec<_>>();

    let path_edges = path
        .windows(2)
        .filter_map(|pair| match pair {
            [source, target] => Some((*source, *target)),
            _ => None,
        })
        .collect();

    HighlightState {
        path_nodes: path.into_iter().collect(),
        path_edges,
    }
}
