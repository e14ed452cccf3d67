use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::{KnowledgeNode, Priority};
use crate::filter::{PriorityFilter, matches, subtree_matches};

#[derive(Debug, Error, PartialEq)]
pub enum LayoutConfigError {
    #[error("layout size `{field}` must be positive, got {value}")]
    NonPositiveSize { field: &'static str, value: f32 },
    #[error("layout gap `{field}` must not be negative, got {value}")]
    NegativeGap { field: &'static str, value: f32 },
    #[error("children_per_row must be at least 1")]
    EmptyRow,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub phase_width: f32,
    pub phase_height: f32,
    pub phase_y: f32,
    pub child_width: f32,
    pub child_height: f32,
    pub grandchild_width: f32,
    pub grandchild_height: f32,
    pub children_per_row: usize,
    pub phase_gap: f32,
    pub child_top_margin: f32,
    pub child_column_gap: f32,
    pub child_row_gap: f32,
    pub grandchild_offset: f32,
    pub grandchild_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            phase_width: 240.0,
            phase_height: 150.0,
            phase_y: 100.0,
            child_width: 200.0,
            child_height: 110.0,
            grandchild_width: 180.0,
            grandchild_height: 80.0,
            children_per_row: 2,
            phase_gap: 100.0,
            child_top_margin: 100.0,
            child_column_gap: 40.0,
            child_row_gap: 50.0,
            grandchild_offset: 40.0,
            grandchild_gap: 12.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        let sizes = [
            ("phase_width", self.phase_width),
            ("phase_height", self.phase_height),
            ("child_width", self.child_width),
            ("child_height", self.child_height),
            ("grandchild_width", self.grandchild_width),
            ("grandchild_height", self.grandchild_height),
        ];
        for (field, value) in sizes {
            if !(value > 0.0 && value.is_finite()) {
                return Err(LayoutConfigError::NonPositiveSize { field, value });
            }
        }

        let gaps = [
            ("phase_gap", self.phase_gap),
            ("child_top_margin", self.child_top_margin),
            ("child_column_gap", self.child_column_gap),
            ("child_row_gap", self.child_row_gap),
            ("grandchild_offset", self.grandchild_offset),
            ("grandchild_gap", self.grandchild_gap),
        ];
        for (field, value) in gaps {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(LayoutConfigError::NegativeGap { field, value });
            }
        }

        if self.children_per_row == 0 {
            return Err(LayoutConfigError::EmptyRow);
        }

        Ok(())
    }

    /// Reads a JSON object of overrides; omitted fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("invalid layout config JSON in {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("rejected layout config {}", path.display()))?;
        Ok(config)
    }

    fn child_start_y(&self) -> f32 {
        self.phase_y + self.phase_height + self.child_top_margin
    }

    fn grandchild_stack_height(&self, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        count as f32 * self.grandchild_height + (count - 1) as f32 * self.grandchild_gap
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Phase,
    SubProcess,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderHints {
    pub dimmed: bool,
    pub expanded: bool,
    pub selected: bool,
    pub child_count: usize,
    pub expandable: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PositionedNode {
    pub id: String,
    pub kind: NodeKind,
    pub depth: usize,
    pub position: Point,
    pub size: Size,
    pub priority: Priority,
    pub hints: RenderHints,
}

impl PositionedNode {
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.size.width
            && point.y >= self.position.y
            && point.y <= self.position.y + self.size.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    PhaseLink,
    PhaseToChild,
    ChildToGrandchild,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub style: EdgeStyle,
}

impl Edge {
    fn new(source: &str, target: &str, style: EdgeStyle) -> Self {
        Self {
            source: source.to_owned(),
            target: target.to_owned(),
            style,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LayoutOutput {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<Edge>,
    pub width: f32,
    pub height: f32,
}

impl LayoutOutput {
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Topmost node under `point`; later nodes are drawn on top.
    pub fn node_at(&self, point: Point) -> Option<&PositionedNode> {
        self.nodes.iter().rev().find(|node| node.contains(point))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LayoutInput<'a> {
    pub expanded_ids: &'a BTreeSet<String>,
    pub selected_id: Option<&'a str>,
    pub priority_filter: PriorityFilter,
    pub search_query: &'a str,
}

impl LayoutInput<'_> {
    fn is_expanded(&self, node: &KnowledgeNode) -> bool {
        node.has_children() && self.expanded_ids.contains(&node.id)
    }

    fn hints(&self, node: &KnowledgeNode, dimmed: bool, expandable: bool) -> RenderHints {
        RenderHints {
            dimmed,
            expanded: expandable && self.is_expanded(node),
            selected: self.selected_id == Some(node.id.as_str()),
            child_count: node.children.len(),
            expandable,
        }
    }
}

struct ChildGrid {
    column_widths: Vec<f32>,
    row_heights: Vec<f32>,
}

impl ChildGrid {
    fn measure(
        children: &[KnowledgeNode],
        input: &LayoutInput<'_>,
        config: &LayoutConfig,
    ) -> Self {
        let columns = config.children_per_row.min(children.len()).max(1);
        let rows = children.len().div_ceil(columns);

        let mut column_widths = vec![config.child_width; columns];
        let mut row_heights = vec![config.child_height; rows];

        for (index, child) in children.iter().enumerate() {
            if !input.is_expanded(child) {
                continue;
            }

            let (row, column) = (index / columns, index % columns);
            column_widths[column] =
                config.child_width + config.grandchild_offset + config.grandchild_width;
            row_heights[row] =
                row_heights[row].max(config.grandchild_stack_height(child.children.len()));
        }

        Self {
            column_widths,
            row_heights,
        }
    }

    fn width(&self, config: &LayoutConfig) -> f32 {
        let gaps = self.column_widths.len().saturating_sub(1) as f32 * config.child_column_gap;
        self.column_widths.iter().sum::<f32>() + gaps
    }

    fn cell_origin(&self, index: usize, origin_x: f32, config: &LayoutConfig) -> Point {
        let columns = self.column_widths.len();
        let (row, column) = (index / columns, index % columns);

        let x = origin_x
            + self.column_widths[..column]
                .iter()
                .map(|width| width + config.child_column_gap)
                .sum::<f32>();
        let y = config.child_start_y()
            + self.row_heights[..row]
                .iter()
                .map(|height| height + config.child_row_gap)
                .sum::<f32>();

        Point { x, y }
    }

    fn bottom(&self, config: &LayoutConfig) -> f32 {
        let gaps = self.row_heights.len().saturating_sub(1) as f32 * config.child_row_gap;
        config.child_start_y() + self.row_heights.iter().sum::<f32>() + gaps
    }
}

pub fn layout(
    phases: &[KnowledgeNode],
    input: &LayoutInput<'_>,
    config: &LayoutConfig,
) -> LayoutOutput {
    let mut output = LayoutOutput::default();
    let mut current_x = 0.0f32;
    let mut previous_phase: Option<&str> = None;

    for phase in phases {
        let phase_expanded = input.is_expanded(phase);

        output.nodes.push(PositionedNode {
            id: phase.id.clone(),
            kind: NodeKind::Phase,
            depth: 0,
            position: Point {
                x: current_x,
                y: config.phase_y,
            },
            size: Size {
                width: config.phase_width,
                height: config.phase_height,
            },
            priority: phase.priority,
            hints: input.hints(
                phase,
                !subtree_matches(phase, input.priority_filter, input.search_query),
                phase.has_children(),
            ),
        });
        output.height = output.height.max(config.phase_y + config.phase_height);

        if let Some(previous) = previous_phase {
            output
                .edges
                .push(Edge::new(previous, &phase.id, EdgeStyle::PhaseLink));
        }
        previous_phase = Some(phase.id.as_str());

        let mut column_width = config.phase_width;

        if phase_expanded {
            let grid = ChildGrid::measure(&phase.children, input, config);
            column_width = column_width.max(grid.width(config));
            output.height = output.height.max(grid.bottom(config));

            for (index, child) in phase.children.iter().enumerate() {
                let origin = grid.cell_origin(index, current_x, config);
                place_child(&mut output, phase, child, origin, input, config);
            }
        }

        current_x += column_width;
        output.width = current_x;
        current_x += config.phase_gap;
    }

    tracing::debug!(
        nodes = output.nodes.len(),
        edges = output.edges.len(),
        width = output.width,
        "laid out lifecycle graph"
    );

    output
}

fn place_child(
    output: &mut LayoutOutput,
    phase: &KnowledgeNode,
    child: &KnowledgeNode,
    origin: Point,
    input: &LayoutInput<'_>,
    config: &LayoutConfig,
) {
    output.nodes.push(PositionedNode {
        id: child.id.clone(),
        kind: NodeKind::SubProcess,
        depth: 1,
        position: origin,
        size: Size {
            width: config.child_width,
            height: config.child_height,
        },
        priority: child.priority,
        hints: input.hints(
            child,
            !subtree_matches(child, input.priority_filter, input.search_query),
            child.has_children(),
        ),
    });
    output
        .edges
        .push(Edge::new(&phase.id, &child.id, EdgeStyle::PhaseToChild));

    if !input.is_expanded(child) {
        return;
    }

    let grandchild_x = origin.x + config.child_width + config.grandchild_offset;
    for (index, grandchild) in child.children.iter().enumerate() {
        let y = origin.y + index as f32 * (config.grandchild_height + config.grandchild_gap);

        output.nodes.push(PositionedNode {
            id: grandchild.id.clone(),
            kind: NodeKind::SubProcess,
            depth: 2,
            position: Point { x: grandchild_x, y },
            size: Size {
                width: config.grandchild_width,
                height: config.grandchild_height,
            },
            priority: grandchild.priority,
            // Leaves: direct match only, and never expandable.
            hints: input.hints(
                grandchild,
                !matches(grandchild, input.priority_filter, input.search_query),
                false,
            ),
        });
        output.edges.push(Edge::new(
            &child.id,
            &grandchild.id,
            EdgeStyle::ChildToGrandchild,
        ));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn node(id: &str, children: Vec<KnowledgeNode>) -> KnowledgeNode {
        KnowledgeNode {
            id: id.to_owned(),
            name: id.to_owned(),
            priority: Priority::Important,
            children,
            ..KnowledgeNode::default()
        }
    }

    fn expanded(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|id| (*id).to_owned()).collect()
    }

    fn run(phases: &[KnowledgeNode], expanded_ids: &BTreeSet<String>) -> LayoutOutput {
        let input = LayoutInput {
            expanded_ids,
            selected_id: None,
            priority_filter: PriorityFilter::All,
            search_query: "",
        };
        layout(phases, &input, &LayoutConfig::default())
    }

    fn position(output: &LayoutOutput, id: &str) -> Point {
        output.node(id).expect("node laid out").position
    }

    #[test]
    fn collapsed_phases_are_spaced_by_base_width() {
        let phases = vec![
            node("a", Vec::new()),
            node("b", Vec::new()),
            node("c", Vec::new()),
        ];
        let output = run(&phases, &BTreeSet::new());
        let xs = output.nodes.iter().map(|n| n.position.x).collect::<Vec<_>>();
        assert_eq!(xs, vec![0.0, 340.0, 680.0]);
        assert_eq!(output.width, 920.0);
        assert!(output.nodes.iter().all(|n| n.position.y == 100.0));
    }

    #[test]
    fn children_fill_two_column_grid_under_phase() {
        let phases = vec![
            node(
                "a",
                vec![
                    node("a1", Vec::new()),
                    node("a2", Vec::new()),
                    node("a3", Vec::new()),
                ],
            ),
            node("b", Vec::new()),
        ];
        let output = run(&phases, &expanded(&["a"]));

        assert_eq!(position(&output, "a1"), Point { x: 0.0, y: 350.0 });
        assert_eq!(position(&output, "a2"), Point { x: 240.0, y: 350.0 });
        assert_eq!(position(&output, "a3"), Point { x: 0.0, y: 510.0 });
        // 2 * 200 + 40 = 440 wide column.
        assert_eq!(position(&output, "b").x, 540.0);
        assert_eq!(output.height, 620.0);
    }

    #[test]
    fn expanded_grandchildren_widen_their_column_and_row() {
        let phases = vec![
            node(
                "a",
                vec![
                    node("a1", vec![node("g1", Vec::new()), node("g2", Vec::new())]),
                    node("a2", Vec::new()),
                    node("a3", Vec::new()),
                ],
            ),
            node("b", Vec::new()),
        ];

        let narrow = run(&phases, &expanded(&["a"]));
        let wide = run(&phases, &expanded(&["a", "a1"]));

        assert!(narrow.node("g1").is_none());
        assert_eq!(position(&wide, "g1"), Point { x: 240.0, y: 350.0 });
        assert_eq!(position(&wide, "g2"), Point { x: 240.0, y: 442.0 });
        // Column 0 grows to 200 + 40 + 180.
        assert_eq!(position(&wide, "a2").x, 460.0);
        // Row 0 grows to the 172-unit grandchild stack.
        assert_eq!(position(&wide, "a3").y, 572.0);
        assert_eq!(position(&narrow, "b").x, 540.0);
        assert_eq!(position(&wide, "b").x, 760.0);
    }

    #[test]
    fn grandchild_expansion_is_ignored() {
        let phases = vec![node("a", vec![node("a1", vec![node("g1", Vec::new())])])];
        let without = run(&phases, &expanded(&["a", "a1"]));
        let with = run(&phases, &expanded(&["a", "a1", "g1"]));
        assert_eq!(without, with);
        assert!(!with.node("g1").expect("visible").hints.expanded);
        assert!(!with.node("g1").expect("visible").hints.expandable);
    }

    #[test]
    fn childless_phase_never_reports_expanded() {
        let phases = vec![node("a", Vec::new()), node("b", Vec::new())];
        let output = run(&phases, &expanded(&["a"]));
        let hints = output.node("a").expect("phase").hints;
        assert!(!hints.expanded);
        assert!(!hints.expandable);
        assert_eq!(position(&output, "b").x, 340.0);
    }

    #[test]
    fn child_without_expanded_phase_is_hidden() {
        let phases = vec![node("a", vec![node("a1", vec![node("g1", Vec::new())])])];
        let output = run(&phases, &expanded(&["a1"]));
        let ids = output.nodes.iter().map(|n| n.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a"]);
        assert!(output.edges.is_empty());
    }

    #[test]
    fn dimming_uses_subtree_for_parents_and_direct_match_for_leaves() {
        let mut leaf = node("g1", Vec::new());
        leaf.key_details = vec!["needle".to_owned()];
        let phases = vec![
            node("a", vec![node("a1", vec![leaf, node("g2", Vec::new())])]),
            node("b", Vec::new()),
        ];
        let expanded_ids = expanded(&["a", "a1"]);
        let input = LayoutInput {
            expanded_ids: &expanded_ids,
            selected_id: Some("a1"),
            priority_filter: PriorityFilter::All,
            search_query: "needle",
        };
        let output = layout(&phases, &input, &LayoutConfig::default());

        let dimmed = |id: &str| output.node(id).expect("laid out").hints.dimmed;
        assert!(!dimmed("a"));
        assert!(!dimmed("a1"));
        assert!(!dimmed("g1"));
        assert!(dimmed("g2"));
        assert!(dimmed("b"));
        assert_eq!(output.nodes.len(), 5);
        assert!(output.node("a1").expect("child").hints.selected);
        assert!(!output.node("a").expect("phase").hints.selected);
    }

    #[test]
    fn edges_carry_endpoints_and_styles() {
        let phases = vec![
            node("a", vec![node("a1", vec![node("g1", Vec::new())])]),
            node("b", Vec::new()),
        ];
        let output = run(&phases, &expanded(&["a", "a1"]));
        let edges = output
            .edges
            .iter()
            .map(|edge| (edge.source.as_str(), edge.target.as_str(), edge.style))
            .collect::<Vec<_>>();
        assert_eq!(
            edges,
            vec![
                ("a", "a1", EdgeStyle::PhaseToChild),
                ("a1", "g1", EdgeStyle::ChildToGrandchild),
                ("a", "b", EdgeStyle::PhaseLink),
            ]
        );
    }

    #[test]
    fn hyphenated_ids_yield_distinct_edges() {
        let phases = vec![
            node("a", vec![node("b-c", Vec::new())]),
            node("a-b", vec![node("c", Vec::new())]),
        ];
        let output = run(&phases, &expanded(&["a", "a-b"]));
        let pairs = output
            .edges
            .iter()
            .map(|edge| (edge.source.as_str(), edge.target.as_str()))
            .collect::<BTreeSet<_>>();
        assert_eq!(output.edges.len(), 3);
        assert_eq!(
            pairs,
            BTreeSet::from([("a", "a-b"), ("a", "b-c"), ("a-b", "c")])
        );
    }

    #[test]
    fn dangling_selection_marks_nothing_selected() {
        let phases = vec![node("a", vec![node("a1", Vec::new())]), node("b", Vec::new())];
        let expanded_ids = expanded(&["a"]);
        let input = LayoutInput {
            expanded_ids: &expanded_ids,
            selected_id: Some("ghost"),
            priority_filter: PriorityFilter::All,
            search_query: "",
        };
        let output = layout(&phases, &input, &LayoutConfig::default());

        assert_eq!(output.nodes.len(), 3);
        assert!(output.nodes.iter().all(|node| !node.hints.selected));
        assert!(output.nodes.iter().all(|node| !node.hints.dimmed));
    }

    #[test]
    fn node_at_hits_node_rectangles() {
        let phases = vec![node("a", Vec::new()), node("b", Vec::new())];
        let output = run(&phases, &BTreeSet::new());
        let hit = output.node_at(Point { x: 350.0, y: 120.0 });
        assert_eq!(hit.map(|n| n.id.as_str()), Some("b"));
        assert!(output.node_at(Point { x: 300.0, y: 120.0 }).is_none());
    }

    #[test]
    fn config_validation_rejects_bad_values() {
        let mut config = LayoutConfig::default();
        assert_eq!(config.validate(), Ok(()));

        config.child_width = 0.0;
        assert_eq!(
            config.validate(),
            Err(LayoutConfigError::NonPositiveSize {
                field: "child_width",
                value: 0.0
            })
        );

        config = LayoutConfig {
            phase_gap: -1.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutConfigError::NegativeGap { field: "phase_gap", .. })
        ));

        config = LayoutConfig {
            children_per_row: 0,
            ..LayoutConfig::default()
        };
        assert_eq!(config.validate(), Err(LayoutConfigError::EmptyRow));
    }

    #[test]
    fn partial_config_json_keeps_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{ "children_per_row": 1, "phase_gap": 20.0 }"#)
                .expect("valid json");
        assert_eq!(config.children_per_row, 1);
        assert_eq!(config.phase_gap, 20.0);
        assert_eq!(config.phase_width, LayoutConfig::default().phase_width);
    }
}
