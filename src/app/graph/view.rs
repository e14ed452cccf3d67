use eframe::egui::{
    self, Align2, Color32, CornerRadius, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind,
    Ui, pos2, vec2,
};
use lifecycle_atlas::layout::{EdgeStyle, NodeKind, PositionedNode};
use lifecycle_atlas::util::{ellipsize, phase_label};

use super::super::ViewModel;
use super::super::highlight::build_highlight_state;
use super::super::render_utils::{
    ACCENT_COLOR, blend_color, category_color, dim_color, draw_background, edge_stroke,
    node_screen_rect, priority_color, priority_stroke_width, screen_to_world, to_point,
};

const CHEVRON_SIZE: f32 = 22.0;
const LABEL_MIN_ZOOM: f32 = 0.35;
const NAME_MAX_CHARS: usize = 72;

enum CanvasAction {
    Select(Option<String>),
    Toggle(String),
}

fn chevron_rect(node_rect: Rect, zoom: f32) -> Rect {
    let size = (CHEVRON_SIZE * zoom).max(10.0);
    Rect::from_min_max(
        node_rect.right_bottom() - vec2(size + 4.0 * zoom, size + 4.0 * zoom),
        node_rect.right_bottom() - vec2(4.0 * zoom, 4.0 * zoom),
    )
}

/// Orthogonal connector between two node rectangles, shaped by edge style.
fn edge_points(style: EdgeStyle, source: Rect, target: Rect) -> Vec<Pos2> {
    match style {
        EdgeStyle::PhaseLink => {
            let start = source.right_center();
            let end = target.left_center();
            let mid_x = (start.x + end.x) * 0.5;
            vec![start, pos2(mid_x, start.y), pos2(mid_x, end.y), end]
        }
        EdgeStyle::PhaseToChild => {
            let start = source.center_bottom();
            let end = target.center_top();
            let mid_y = end.y - (end.y - start.y).min(48.0) * 0.5;
            vec![start, pos2(start.x, mid_y), pos2(end.x, mid_y), end]
        }
        EdgeStyle::ChildToGrandchild => {
            let start = source.right_center();
            let end = target.left_center();
            let mid_x = (start.x + end.x) * 0.5;
            vec![start, pos2(mid_x, start.y), pos2(mid_x, end.y), end]
        }
    }
}

fn chevron_shape(rect: Rect, expanded: bool, color: Color32) -> Shape {
    let c = rect.center();
    let r = rect.width() * 0.28;
    let points = if expanded {
        vec![
            pos2(c.x - r, c.y - r * 0.5),
            pos2(c.x + r, c.y - r * 0.5),
            pos2(c.x, c.y + r * 0.7),
        ]
    } else {
        vec![
            pos2(c.x - r * 0.5, c.y - r),
            pos2(c.x + r * 0.7, c.y),
            pos2(c.x - r * 0.5, c.y + r),
        ]
    };
    Shape::convex_polygon(points, color, Stroke::NONE)
}

impl ViewModel {
    fn phase_ordinal(&self, id: &str) -> usize {
        self.store
            .phases()
            .iter()
            .position(|phase| phase.id == id)
            .unwrap_or_default()
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        self.ensure_layout();

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);
        self.apply_pending_view(rect);

        let pointer = ui.input(|input| input.pointer.hover_pos());
        let hovered = self.hovered_index(rect, pointer);
        let pan = self.pan;
        let zoom = self.zoom;

        let Some(cache) = self.layout_cache.as_ref() else {
            ui.label("Nothing to lay out.");
            return;
        };
        let output = &cache.output;

        let highlight = self
            .ui_state
            .selected_node_id()
            .map(|id| build_highlight_state(&self.store, &cache.index_by_id, id))
            .unwrap_or_default();

        for edge in &output.edges {
            let (Some(&source), Some(&target)) = (
                cache.index_by_id.get(&edge.source),
                cache.index_by_id.get(&edge.target),
            ) else {
                continue;
            };
            let source_node = &output.nodes[source];
            let target_node = &output.nodes[target];
            let points = edge_points(
                edge.style,
                node_screen_rect(rect, pan, zoom, source_node),
                node_screen_rect(rect, pan, zoom, target_node),
            );
            if !Rect::from_points(&points).expand(4.0).intersects(rect) {
                continue;
            }

            let faded = source_node.hints.dimmed || target_node.hints.dimmed;
            let stroke = if highlight.path_edges.contains(&(source, target)) {
                edge_stroke(3.0, ACCENT_COLOR, zoom)
            } else {
                let (width, base) = match edge.style {
                    EdgeStyle::PhaseLink => (2.4, Color32::from_rgb(110, 122, 140)),
                    EdgeStyle::PhaseToChild => (1.6, Color32::from_rgb(92, 104, 120)),
                    EdgeStyle::ChildToGrandchild => (1.2, Color32::from_rgb(84, 94, 108)),
                };
                let color = if faded || highlight.is_active() {
                    dim_color(base, 0.45)
                } else {
                    base
                };
                edge_stroke(width, color, zoom)
            };
            painter.add(Shape::line(points, stroke));
        }

        for (index, node) in output.nodes.iter().enumerate() {
            let node_rect = node_screen_rect(rect, pan, zoom, node);
            if !node_rect.intersects(rect) {
                continue;
            }
            self.draw_node(
                &painter,
                node,
                node_rect,
                hovered == Some(index),
                highlight.path_nodes.contains(&index),
            );
        }

        let mut action = None;
        if let Some(index) = hovered {
            let node = &output.nodes[index];
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });

            if let Some(content) = self.store.find(&node.id) {
                let mut panel_text = format!("{}  |  {}", content.name, content.priority.label());
                if !content.category.is_empty() {
                    panel_text.push_str(&format!("  |  {}", content.category));
                }
                if node.hints.child_count > 0 {
                    panel_text.push_str(&format!("  |  {} children", node.hints.child_count));
                }
                painter.text(
                    rect.left_top() + vec2(10.0, 10.0),
                    Align2::LEFT_TOP,
                    panel_text,
                    FontId::proportional(13.0),
                    Color32::from_gray(240),
                );
            }

            if response.clicked_by(egui::PointerButton::Primary) {
                let on_chevron = node.hints.expandable
                    && pointer.is_some_and(|pointer| {
                        chevron_rect(node_screen_rect(rect, pan, zoom, node), zoom)
                            .contains(pointer)
                    });
                action = Some(if on_chevron {
                    CanvasAction::Toggle(node.id.clone())
                } else {
                    CanvasAction::Select(Some(node.id.clone()))
                });
            }
        } else if response.clicked_by(egui::PointerButton::Primary)
            && pointer.is_some_and(|pointer| {
                let world = to_point(screen_to_world(rect, pan, zoom, pointer));
                output.node_at(world).is_none()
            })
        {
            action = Some(CanvasAction::Select(None));
        }

        match action {
            Some(CanvasAction::Select(id)) => self.ui_state.select(id),
            Some(CanvasAction::Toggle(id)) => self.ui_state.toggle_expand(&id),
            None => {}
        }
    }

    fn draw_node(
        &self,
        painter: &egui::Painter,
        node: &PositionedNode,
        node_rect: Rect,
        is_hovered: bool,
        on_path: bool,
    ) {
        let zoom = self.zoom;
        let content = self.store.find(&node.id);
        let category = content.map_or("", |content| content.category.as_str());

        let mut fill = category_color(category);
        if node.kind == NodeKind::Phase {
            fill = blend_color(fill, Color32::from_rgb(30, 36, 46), 0.35);
        }
        if is_hovered {
            fill = blend_color(fill, Color32::WHITE, 0.12);
        }

        let mut border = priority_color(node.priority);
        if on_path && !node.hints.selected {
            border = blend_color(border, ACCENT_COLOR, 0.6);
        }

        let (fill, border, text_color) = if node.hints.dimmed {
            (
                dim_color(fill, 0.4),
                dim_color(border, 0.4),
                Color32::from_gray(110),
            )
        } else {
            (fill, border, Color32::from_gray(236))
        };

        let radius = CornerRadius::same((8.0 * zoom).clamp(2.0, 12.0) as u8);
        painter.rect_filled(node_rect, radius, fill);
        let border_width = priority_stroke_width(node.priority) * zoom.sqrt();
        painter.rect_stroke(
            node_rect,
            radius,
            Stroke::new(border_width.max(0.8), border),
            StrokeKind::Inside,
        );

        if node.hints.selected {
            painter.rect_stroke(
                node_rect.expand(4.0 * zoom.sqrt()),
                radius,
                Stroke::new(2.0, ACCENT_COLOR),
                StrokeKind::Outside,
            );
        }

        if zoom < LABEL_MIN_ZOOM {
            return;
        }

        let padding = 10.0 * zoom;
        let mut cursor = node_rect.left_top() + vec2(padding, padding);
        let wrap_width = (node_rect.width() - padding * 2.0).max(8.0);

        if node.kind == NodeKind::Phase {
            let label = phase_label(
                content.and_then(|content| content.phase_number),
                self.phase_ordinal(&node.id),
            );
            let galley = painter.layout(
                label,
                FontId::proportional(11.0 * zoom),
                dim_color(text_color, 0.75),
                wrap_width,
            );
            let height = galley.size().y;
            painter.galley(cursor, galley, text_color);
            cursor.y += height + 4.0 * zoom;
        }

        let name = content.map_or(node.id.as_str(), |content| content.name.as_str());
        let font_size = match node.kind {
            NodeKind::Phase => 15.0,
            NodeKind::SubProcess if node.depth == 1 => 13.0,
            NodeKind::SubProcess => 12.0,
        } * zoom;
        let galley = painter.layout(
            ellipsize(name, NAME_MAX_CHARS).into_owned(),
            FontId::proportional(font_size),
            text_color,
            wrap_width,
        );
        painter.galley(cursor, galley, text_color);

        let footer_y = node_rect.bottom() - padding;
        painter.text(
            pos2(node_rect.left() + padding, footer_y),
            Align2::LEFT_BOTTOM,
            node.priority.label(),
            FontId::proportional(10.0 * zoom),
            dim_color(border, 0.9),
        );

        if node.hints.expandable {
            let chevron = chevron_rect(node_rect, zoom);
            painter.rect_filled(
                chevron,
                CornerRadius::same((4.0 * zoom).clamp(1.0, 6.0) as u8),
                Color32::from_rgba_unmultiplied(255, 255, 255, 24),
            );
            painter.add(chevron_shape(chevron, node.hints.expanded, text_color));
            painter.text(
                chevron.left_center() - vec2(4.0 * zoom, 0.0),
                Align2::RIGHT_CENTER,
                node.hints.child_count.to_string(),
                FontId::proportional(10.0 * zoom),
                dim_color(text_color, 0.8),
            );
        }
    }
}
