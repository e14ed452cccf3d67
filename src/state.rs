use std::collections::BTreeSet;

use crate::content::ContentStore;
use crate::filter::PriorityFilter;
use crate::layout::LayoutInput;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    selected_node_id: Option<String>,
    expanded_node_ids: BTreeSet<String>,
    priority_filter: PriorityFilter,
    search_query: String,
    selected_key_process: Option<String>,
    revision: u64,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        self.selected_node_id.as_deref()
    }

    pub fn expanded_node_ids(&self) -> &BTreeSet<String> {
        &self.expanded_node_ids
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_node_ids.contains(id)
    }

    pub fn priority_filter(&self) -> PriorityFilter {
        self.priority_filter
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_key_process(&self) -> Option<&str> {
        self.selected_key_process.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn layout_input(&self) -> LayoutInput<'_> {
        LayoutInput {
            expanded_ids: &self.expanded_node_ids,
            selected_id: self.selected_node_id.as_deref(),
            priority_filter: self.priority_filter,
            search_query: &self.search_query,
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn select(&mut self, id: Option<String>) {
        if self.selected_node_id == id {
            return;
        }
        self.selected_node_id = id;
        self.bump();
    }

    pub fn toggle_expand(&mut self, id: &str) {
        if !self.expanded_node_ids.remove(id) {
            self.expanded_node_ids.insert(id.to_owned());
        }
        self.bump();
    }

    /// Replaces the expansion set.
    pub fn expand_many<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expanded_node_ids = ids.into_iter().map(Into::into).collect();
        self.bump();
    }

    pub fn add_expanded<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.expanded_node_ids.len();
        self.expanded_node_ids.extend(ids.into_iter().map(Into::into));
        if self.expanded_node_ids.len() != before {
            self.bump();
        }
    }

    pub fn collapse_all(&mut self) {
        if self.expanded_node_ids.is_empty() {
            return;
        }
        self.expanded_node_ids.clear();
        self.bump();
    }

    pub fn set_priority_filter(&mut self, filter: PriorityFilter) {
        if self.priority_filter == filter {
            return;
        }
        self.priority_filter = filter;
        self.bump();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.search_query == query {
            return;
        }
        self.search_query = query;
        self.bump();
    }

    pub fn select_key_process(&mut self, id: Option<String>) {
        self.selected_key_process = id;
    }

    pub fn reveal(&mut self, store: &ContentStore, id: &str) {
        let ancestors = store
            .ancestors(id)
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        self.add_expanded(ancestors);
        self.select(Some(id.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{KnowledgeNode, LifecycleData};

    fn ids(state: &UiState) -> Vec<&str> {
        state.expanded_node_ids().iter().map(String::as_str).collect()
    }

    #[test]
    fn starts_empty() {
        let state = UiState::new();
        assert_eq!(state.selected_node_id(), None);
        assert!(state.expanded_node_ids().is_empty());
        assert_eq!(state.priority_filter(), PriorityFilter::All);
        assert_eq!(state.search_query(), "");
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut state = UiState::new();
        state.toggle_expand("phase-1");
        assert!(state.is_expanded("phase-1"));
        state.toggle_expand("phase-1");
        assert!(!state.is_expanded("phase-1"));
        assert_eq!(state.revision(), 2);
    }

    #[test]
    fn expand_many_replaces_and_add_expanded_unions() {
        let mut state = UiState::new();
        state.expand_many(["a", "b"]);
        state.expand_many(["c"]);
        assert_eq!(ids(&state), vec!["c"]);

        state.add_expanded(["a", "c"]);
        assert_eq!(ids(&state), vec!["a", "c"]);

        state.collapse_all();
        assert!(state.expanded_node_ids().is_empty());
    }

    #[test]
    fn unchanged_values_keep_revision() {
        let mut state = UiState::new();
        state.set_search_query("");
        state.set_priority_filter(PriorityFilter::All);
        state.select(None);
        state.collapse_all();
        state.select_key_process(Some("kp".to_owned()));
        assert_eq!(state.revision(), 0);

        state.set_search_query("tls");
        state.set_priority_filter(PriorityFilter::Critical);
        state.select(Some("dangling".to_owned()));
        assert_eq!(state.revision(), 3);
        assert_eq!(state.selected_node_id(), Some("dangling"));
    }

    #[test]
    fn reveal_expands_ancestors_and_selects() {
        let leaf = KnowledgeNode {
            id: "g".to_owned(),
            ..KnowledgeNode::default()
        };
        let child = KnowledgeNode {
            id: "c".to_owned(),
            children: vec![leaf],
            ..KnowledgeNode::default()
        };
        let phase = KnowledgeNode {
            id: "p".to_owned(),
            children: vec![child],
            ..KnowledgeNode::default()
        };
        let store = ContentStore::new(LifecycleData {
            phases: vec![phase],
            ..LifecycleData::default()
        })
        .expect("valid tree");

        let mut state = UiState::new();
        state.expand_many(["other"]);
        state.reveal(&store, "g");
        assert_eq!(ids(&state), vec!["c", "other", "p"]);
        assert_eq!(state.selected_node_id(), Some("g"));
    }
}
