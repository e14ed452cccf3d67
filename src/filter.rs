use serde::{Deserialize, Serialize};

use crate::content::{KnowledgeNode, Priority};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    Critical,
    Important,
    Awareness,
}

impl PriorityFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Critical, Self::Important, Self::Awareness];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Critical => "Critical",
            Self::Important => "Important",
            Self::Awareness => "Awareness",
        }
    }

    pub fn admits(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Critical => priority == Priority::Critical,
            Self::Important => priority == Priority::Important,
            Self::Awareness => priority == Priority::Awareness,
        }
    }
}

/// Lowercased, space-joined text the query is matched against. Absent
/// fields are skipped.
pub fn searchable_text(node: &KnowledgeNode) -> String {
    let optional = [
        node.definition.as_deref(),
        node.ads_context.as_deref(),
        node.relevance_note.as_deref(),
    ];

    std::iter::once(node.name.as_str())
        .chain(optional.into_iter().flatten())
        .chain(node.key_details.iter().map(String::as_str))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn matches(node: &KnowledgeNode, priority_filter: PriorityFilter, search_query: &str) -> bool {
    if !priority_filter.admits(node.priority) {
        return false;
    }

    if search_query.trim().is_empty() {
        return true;
    }

    searchable_text(node).contains(&search_query.to_lowercase())
}

pub fn subtree_matches(
    node: &KnowledgeNode,
    priority_filter: PriorityFilter,
    search_query: &str,
) -> bool {
    matches(node, priority_filter, search_query)
        || node
            .children
            .iter()
            .any(|child| subtree_matches(child, priority_filter, search_query))
}
