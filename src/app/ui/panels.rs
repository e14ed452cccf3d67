use eframe::egui::{self, Align, Context, Layout, Vec2};
use lifecycle_atlas::content::ContentStore;
use lifecycle_atlas::layout::LayoutConfig;
use lifecycle_atlas::state::UiState;
use lifecycle_atlas::workflow::WorkflowCursor;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(
        store: ContentStore,
        layout_config: LayoutConfig,
        expand_all: bool,
    ) -> Self {
        let mut ui_state = UiState::new();
        if expand_all {
            ui_state.expand_many(store.expandable_ids());
        }

        Self {
            store,
            layout_config,
            ui_state,
            jump_query: String::new(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            fit_requested: true,
            focus_request: None,
            layout_cache: None,
            workflow_open: false,
            workflow_cursor: WorkflowCursor::default(),
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_reloading: bool,
    ) {
        self.ensure_layout();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let meta = self.store.meta();
                    ui.heading(if meta.title.is_empty() {
                        "Lifecycle Atlas"
                    } else {
                        meta.title.as_str()
                    });
                    ui.separator();
                    if !meta.version.is_empty() {
                        ui.label(format!("v{}", meta.version));
                    }
                    if !meta.last_updated.is_empty() {
                        ui.label(format!("updated {}", meta.last_updated));
                    }
                    ui.label(format!("nodes: {}", self.store.node_count()));

                    if ui.button("Expand all").clicked() {
                        self.ui_state.expand_many(self.store.expandable_ids());
                        self.request_fit();
                    }
                    if ui.button("Collapse all").clicked() {
                        self.ui_state.collapse_all();
                        self.request_fit();
                    }
                    if ui.button("Reset view").clicked() {
                        self.request_fit();
                    }
                    let reload_button =
                        ui.add_enabled(!is_reloading, egui::Button::new("Reload content"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some((nodes, edges, dimmed)) = self.visible_counts() {
                            ui.label(format!(
                                "visible: {nodes} nodes, {edges} edges, {dimmed} dimmed"
                            ));
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| self.draw_details(ui));

        self.draw_workflow_window(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }
}
