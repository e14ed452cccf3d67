use std::collections::HashSet;

use crate::content::{ContentStore, KeyProcess, Workflow, WorkflowStep};
use crate::state::UiState;

pub fn focus_expansion(store: &ContentStore, process: &KeyProcess) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for related in &process.related_nodes {
        if !store.contains(related) {
            continue;
        }

        if seen.insert(related.as_str()) {
            ids.push(related.clone());
        }
        for ancestor in store.ancestors(related) {
            if seen.insert(ancestor) {
                ids.push(ancestor.to_owned());
            }
        }
    }

    ids
}

/// Returns the node it selected, if any related node exists in the tree.
pub fn activate_key_process(
    state: &mut UiState,
    store: &ContentStore,
    process_id: &str,
) -> Option<String> {
    let Some(process) = store.key_process(process_id) else {
        tracing::warn!(process = process_id, "unknown key process");
        state.select_key_process(None);
        return None;
    };

    state.select_key_process(Some(process.id.clone()));
    state.expand_many(focus_expansion(store, process));

    let first = process
        .related_nodes
        .iter()
        .find(|id| store.contains(id.as_str()))?
        .clone();
    state.select(Some(first.clone()));
    Some(first)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkflowCursor {
    step: usize,
}

impl WorkflowCursor {
    pub fn index(self) -> usize {
        self.step
    }

    pub fn current(self, workflow: &Workflow) -> Option<&WorkflowStep> {
        workflow.steps.get(self.step)
    }

    pub fn is_first(self) -> bool {
        self.step == 0
    }

    pub fn is_last(self, workflow: &Workflow) -> bool {
        self.step + 1 >= workflow.steps.len()
    }

    pub fn next(&mut self, workflow: &Workflow) {
        if !self.is_last(workflow) {
            self.step += 1;
        }
    }

    pub fn previous(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    pub fn jump_to(&mut self, workflow: &Workflow, step: usize) {
        self.step = step.min(workflow.steps.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::content::{KnowledgeNode, LifecycleData};

    fn node(id: &str, children: Vec<KnowledgeNode>) -> KnowledgeNode {
        KnowledgeNode {
            id: id.to_owned(),
            name: id.to_owned(),
            children,
            ..KnowledgeNode::default()
        }
    }

    fn store_with(process: KeyProcess) -> ContentStore {
        ContentStore::new(LifecycleData {
            phases: vec![
                node("phase-4", vec![node("p4-3", Vec::new()), node("p4-4", Vec::new())]),
                node("phase-5", vec![node("p5-1", vec![node("p5-1-a", Vec::new())])]),
            ],
            key_processes: vec![process],
            ..LifecycleData::default()
        })
        .expect("valid tree")
    }

    fn process(related: &[&str]) -> KeyProcess {
        KeyProcess {
            id: "url-enter".to_owned(),
            name: "What happens when you type a URL".to_owned(),
            related_nodes: related.iter().map(|id| (*id).to_owned()).collect(),
            ..KeyProcess::default()
        }
    }

    #[test]
    fn focus_includes_ancestors_and_skips_unknown_ids() {
        let process = process(&["ghost", "p4-3", "p5-1-a", "p4-4"]);
        let store = store_with(process.clone());
        assert_eq!(
            focus_expansion(&store, &process),
            vec!["p4-3", "phase-4", "p5-1-a", "phase-5", "p5-1", "p4-4"]
        );
    }

    #[test]
    fn activation_replaces_expansion_and_selects_first_known_node() {
        let store = store_with(process(&["ghost", "p4-4"]));
        let mut state = UiState::new();
        state.expand_many(["phase-5"]);

        let focused = activate_key_process(&mut state, &store, "url-enter");

        assert_eq!(focused.as_deref(), Some("p4-4"));
        assert_eq!(state.selected_key_process(), Some("url-enter"));
        assert_eq!(state.selected_node_id(), Some("p4-4"));
        assert!(state.is_expanded("phase-4"));
        assert!(!state.is_expanded("phase-5"));
    }

    #[test]
    fn unknown_process_clears_selection() {
        let store = store_with(process(&["p4-3"]));
        let mut state = UiState::new();
        state.select_key_process(Some("url-enter".to_owned()));
        assert_eq!(activate_key_process(&mut state, &store, "nope"), None);
        assert_eq!(state.selected_key_process(), None);
        assert!(state.expanded_node_ids().is_empty());
    }

    #[test]
    fn activation_without_known_nodes_focuses_nothing() {
        let store = store_with(process(&["ghost"]));
        let mut state = UiState::new();
        state.select(Some("p4-3".to_owned()));

        assert_eq!(activate_key_process(&mut state, &store, "url-enter"), None);
        assert_eq!(state.selected_key_process(), Some("url-enter"));
        assert_eq!(state.selected_node_id(), Some("p4-3"));
    }

    #[test]
    fn cursor_stays_within_steps() {
        let workflow = Workflow {
            title: "Flow".to_owned(),
            steps: ["dns", "tcp", "tls"]
                .iter()
                .map(|id| WorkflowStep {
                    id: (*id).to_owned(),
                    title: id.to_uppercase(),
                    ..WorkflowStep::default()
                })
                .collect(),
            ..Workflow::default()
        };

        let mut cursor = WorkflowCursor::default();
        cursor.previous();
        assert!(cursor.is_first());
        cursor.next(&workflow);
        cursor.next(&workflow);
        cursor.next(&workflow);
        assert_eq!(cursor.index(), 2);
        assert!(cursor.is_last(&workflow));
        assert_eq!(cursor.current(&workflow).map(|s| s.id.as_str()), Some("tls"));

        cursor.jump_to(&workflow, 99);
        assert_eq!(cursor.index(), 2);
        cursor.jump_to(&Workflow::default(), 5);
        assert_eq!(cursor.index(), 0);
    }
}
