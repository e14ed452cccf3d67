use eframe::egui::{self, Pos2, Rect, Ui, vec2};

use super::super::ViewModel;
use super::super::render_utils::{fit_transform, screen_to_world, to_point};

const FIT_MARGIN: f32 = 48.0;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.1, 3.0);
        self.pan = pointer - rect.left_top() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// Topmost visible node under the pointer. Dimmed nodes are not
    /// interactive and never report as hovered.
    pub(in crate::app) fn hovered_index(&self, rect: Rect, pointer: Option<Pos2>) -> Option<usize> {
        let pointer = pointer.filter(|pointer| rect.contains(*pointer))?;
        let cache = self.layout_cache.as_ref()?;
        let world = to_point(screen_to_world(rect, self.pan, self.zoom, pointer));
        let node = cache.output.node_at(world)?;
        if node.hints.dimmed {
            return None;
        }
        cache.index_by_id.get(&node.id).copied()
    }

    pub(in crate::app) fn apply_pending_view(&mut self, rect: Rect) {
        if self.fit_requested {
            self.fit_requested = false;
            if let Some(output) = self.layout_output() {
                let (pan, zoom) = fit_transform(rect, output.width, output.height, FIT_MARGIN);
                self.pan = pan;
                self.zoom = zoom;
            }
        }

        if let Some(id) = self.focus_request.take()
            && let Some(node) = self.layout_output().and_then(|output| output.node(&id))
        {
            let center = vec2(
                node.position.x + node.size.width * 0.5,
                node.position.y + node.size.height * 0.5,
            );
            self.pan = rect.size() * 0.5 - center * self.zoom;
        }
    }

    pub(in crate::app) fn request_fit(&mut self) {
        self.fit_requested = true;
    }

    /// Centers the canvas on `id` once the next layout pass has placed it.
    pub(in crate::app) fn focus_on(&mut self, id: &str) {
        self.focus_request = Some(id.to_owned());
    }
}
