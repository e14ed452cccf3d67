use std::collections::{HashMap, HashSet};

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use thiserror::Error;

use crate::filter::{PriorityFilter, matches};

use super::model::{CrossCutting, KeyProcess, KnowledgeNode, LifecycleData, Meta};

pub const MAX_TREE_DEPTH: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("node at {path} has an empty id")]
    EmptyId { path: String },
    #[error("node id `{0}` appears more than once")]
    DuplicateId(String),
    #[error("node `{id}` sits at depth {depth}, below the leaf level")]
    TooDeep { id: String, depth: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeMatch {
    pub id: String,
    pub name: String,
    pub score: i64,
}

#[derive(Clone, Debug)]
pub struct ContentStore {
    data: LifecycleData,
    paths: HashMap<String, Vec<usize>>,
    preorder: Vec<String>,
}

impl ContentStore {
    pub fn new(data: LifecycleData) -> Result<Self, ContentError> {
        let mut paths = HashMap::new();
        let mut preorder = Vec::new();
        let mut cursor = Vec::new();

        index_level(&data.phases, &mut cursor, &mut paths, &mut preorder)?;

        let store = Self {
            data,
            paths,
            preorder,
        };

        for process in &store.data.key_processes {
            for related in &process.related_nodes {
                if !store.contains(related) {
                    tracing::warn!(
                        process = process.id.as_str(),
                        node = related.as_str(),
                        "key process references an unknown node"
                    );
                }
            }
        }

        Ok(store)
    }

    pub fn meta(&self) -> &Meta {
        &self.data.meta
    }

    pub fn phases(&self) -> &[KnowledgeNode] {
        &self.data.phases
    }

    pub fn cross_cutting(&self) -> &CrossCutting {
        &self.data.cross_cutting
    }

    pub fn key_processes(&self) -> &[KeyProcess] {
        &self.data.key_processes
    }

    pub fn key_process(&self, id: &str) -> Option<&KeyProcess> {
        self.data.key_processes.iter().find(|process| process.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.preorder.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.paths.contains_key(id)
    }

    pub fn find(&self, id: &str) -> Option<&KnowledgeNode> {
        let path = self.paths.get(id)?;
        self.node_at_path(path)
    }

    fn node_at_path(&self, path: &[usize]) -> Option<&KnowledgeNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.data.phases.get(*first)?;
        for index in rest {
            node = node.children.get(*index)?;
        }
        Some(node)
    }

    pub fn depth(&self, id: &str) -> Option<usize> {
        self.paths.get(id).map(|path| path.len() - 1)
    }

    pub fn is_expandable(&self, id: &str) -> bool {
        let Some(path) = self.paths.get(id) else {
            return false;
        };
        path.len() < MAX_TREE_DEPTH
            && self
                .node_at_path(path)
                .is_some_and(KnowledgeNode::has_children)
    }

    pub fn ancestors(&self, id: &str) -> Vec<&str> {
        let Some(path) = self.paths.get(id) else {
            return Vec::new();
        };

        (1..path.len())
            .filter_map(|len| self.node_at_path(&path[..len]))
            .map(|node| node.id.as_str())
            .collect()
    }

    pub fn breadcrumbs(&self, id: &str) -> Vec<Breadcrumb> {
        let Some(path) = self.paths.get(id) else {
            return Vec::new();
        };

        (1..=path.len())
            .filter_map(|len| self.node_at_path(&path[..len]))
            .map(|node| Breadcrumb {
                id: node.id.clone(),
                name: node.name.clone(),
            })
            .collect()
    }

    pub fn expandable_ids(&self) -> Vec<String> {
        self.preorder
            .iter()
            .filter(|id| self.is_expandable(id))
            .cloned()
            .collect()
    }

    // Ignores the priority filter.
    pub fn search_expansion_ids(&self, query: &str) -> Vec<String> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut ids = Vec::new();

        for id in &self.preorder {
            let Some(node) = self.find(id) else {
                continue;
            };
            if !matches(node, PriorityFilter::All, query) {
                continue;
            }

            if seen.insert(id.as_str()) {
                ids.push(id.clone());
            }
            for ancestor in self.ancestors(id) {
                if seen.insert(ancestor) {
                    ids.push(ancestor.to_owned());
                }
            }
        }

        ids
    }

    pub fn fuzzy_find(&self, query: &str, limit: usize) -> Vec<NodeMatch> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default().ignore_case();
        let mut ranked = self
            .preorder
            .iter()
            .enumerate()
            .filter_map(|(order, id)| {
                let node = self.find(id)?;
                let score = matcher.fuzzy_match(&node.name, query)?;
                Some((score, order, node))
            })
            .collect::<Vec<_>>();

        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|(score, _order, node)| NodeMatch {
                id: node.id.clone(),
                name: node.name.clone(),
                score,
            })
            .collect()
    }
}

fn index_level(
    nodes: &[KnowledgeNode],
    cursor: &mut Vec<usize>,
    paths: &mut HashMap<String, Vec<usize>>,
    preorder: &mut Vec<String>,
) -> Result<(), ContentError> {
    for (index, node) in nodes.iter().enumerate() {
        cursor.push(index);

        if node.id.trim().is_empty() {
            return Err(ContentError::EmptyId {
                path: format!("{cursor:?}"),
            });
        }
        if cursor.len() > MAX_TREE_DEPTH {
            return Err(ContentError::TooDeep {
                id: node.id.clone(),
                depth: cursor.len(),
            });
        }
        if paths.insert(node.id.clone(), cursor.clone()).is_some() {
            return Err(ContentError::DuplicateId(node.id.clone()));
        }
        preorder.push(node.id.clone());

        index_level(&node.children, cursor, paths, preorder)?;
        cursor.pop();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::content::model::KnowledgeNode;

    fn node(id: &str, name: &str, children: Vec<KnowledgeNode>) -> KnowledgeNode {
        KnowledgeNode {
            id: id.to_owned(),
            name: name.to_owned(),
            children,
            ..KnowledgeNode::default()
        }
    }

    fn sample_store() -> ContentStore {
        let mut leaf = node("p1-1-a", "Cookie consent", Vec::new());
        leaf.key_details = vec!["GCLID survives redirects".to_owned()];

        let data = LifecycleData {
            phases: vec![
                node(
                    "phase-1",
                    "Account Setup",
                    vec![
                        node("p1-1", "Tracking", vec![leaf]),
                        node("p1-2", "Billing", Vec::new()),
                    ],
                ),
                node("phase-2", "Launch", Vec::new()),
            ],
            ..LifecycleData::default()
        };
        ContentStore::new(data).expect("valid tree")
    }

    #[test]
    fn finds_nodes_at_every_depth() {
        let store = sample_store();
        assert_eq!(store.node_count(), 5);
        assert_eq!(
            store.find("p1-1-a").map(|n| n.name.as_str()),
            Some("Cookie consent")
        );
        assert_eq!(store.depth("phase-2"), Some(0));
        assert_eq!(store.depth("p1-1-a"), Some(2));
        assert!(store.find("missing").is_none());
        assert_eq!(store.depth("missing"), None);
    }

    #[test]
    fn ancestors_and_breadcrumbs_run_phase_first() {
        let store = sample_store();
        assert_eq!(store.ancestors("p1-1-a"), vec!["phase-1", "p1-1"]);
        assert!(store.ancestors("phase-1").is_empty());

        let names = store
            .breadcrumbs("p1-1-a")
            .into_iter()
            .map(|crumb| crumb.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Account Setup", "Tracking", "Cookie consent"]);
    }

    #[test]
    fn unknown_ids_resolve_to_nothing() {
        let store = sample_store();
        assert!(store.find("ghost").is_none());
        assert!(store.breadcrumbs("ghost").is_empty());
        assert!(store.ancestors("ghost").is_empty());
        assert!(!store.is_expandable("ghost"));
    }

    #[test]
    fn only_parents_above_leaf_level_are_expandable() {
        let store = sample_store();
        assert!(store.is_expandable("phase-1"));
        assert!(store.is_expandable("p1-1"));
        assert!(!store.is_expandable("p1-2"));
        assert!(!store.is_expandable("p1-1-a"));
        assert!(!store.is_expandable("phase-2"));
        assert_eq!(store.expandable_ids(), vec!["phase-1", "p1-1"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let data = LifecycleData {
            phases: vec![
                node("phase-1", "A", vec![node("dup", "x", Vec::new())]),
                node("dup", "B", Vec::new()),
            ],
            ..LifecycleData::default()
        };
        assert_eq!(
            ContentStore::new(data).unwrap_err(),
            ContentError::DuplicateId("dup".to_owned())
        );
    }

    #[test]
    fn trees_deeper_than_three_levels_are_rejected() {
        let data = LifecycleData {
            phases: vec![node(
                "a",
                "A",
                vec![node("b", "B", vec![node("c", "C", vec![node("d", "D", Vec::new())])])],
            )],
            ..LifecycleData::default()
        };
        assert_eq!(
            ContentStore::new(data).unwrap_err(),
            ContentError::TooDeep {
                id: "d".to_owned(),
                depth: 4
            }
        );
    }

    #[test]
    fn empty_ids_are_rejected() {
        let data = LifecycleData {
            phases: vec![node(" ", "A", Vec::new())],
            ..LifecycleData::default()
        };
        assert!(matches!(
            ContentStore::new(data),
            Err(ContentError::EmptyId { .. })
        ));
    }

    #[test]
    fn search_expansion_includes_ancestors_of_deep_matches() {
        let store = sample_store();
        assert_eq!(
            store.search_expansion_ids("gclid"),
            vec!["p1-1-a", "phase-1", "p1-1"]
        );
        assert!(store.search_expansion_ids("   ").is_empty());
        assert!(store.search_expansion_ids("no such text").is_empty());
    }

    #[test]
    fn fuzzy_find_ranks_names_and_respects_limit() {
        let store = sample_store();
        let hits = store.fuzzy_find("bill", 3);
        assert_eq!(hits.first().map(|hit| hit.id.as_str()), Some("p1-2"));
        assert!(store.fuzzy_find("", 3).is_empty());
        assert!(store.fuzzy_find("a", 1).len() <= 1);
    }
}
