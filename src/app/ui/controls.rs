use eframe::egui::{self, Key, RichText, Ui};
use lifecycle_atlas::filter::PriorityFilter;
use lifecycle_atlas::workflow::{WorkflowCursor, activate_key_process};

use super::super::ViewModel;
use super::super::render_utils::priority_color;

const JUMP_RESULTS: usize = 12;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Explore");
        ui.separator();
        ui.add_space(4.0);

        self.draw_search(ui);
        ui.separator();
        self.draw_priority_filter(ui);
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt("controls_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::CollapsingHeader::new("Key processes")
                    .default_open(true)
                    .show(ui, |ui| self.draw_key_processes(ui));

                egui::CollapsingHeader::new("Jump to node")
                    .default_open(true)
                    .show(ui, |ui| self.draw_jump_list(ui));

                egui::CollapsingHeader::new("Reference")
                    .default_open(false)
                    .show(ui, |ui| self.draw_reference(ui));
            });
    }

    fn draw_search(&mut self, ui: &mut Ui) {
        ui.label("Search")
            .on_hover_text("Dim nodes whose text does not contain the query.");

        let mut query = self.ui_state.search_query().to_owned();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("e.g. gclid, TLS, auction")
                .desired_width(f32::INFINITY),
        );
        let response = response
            .on_hover_text("Press Enter to expand every branch that contains a match.");

        if response.changed() {
            self.ui_state.set_search_query(query);
        }

        let submitted =
            response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));
        ui.horizontal(|ui| {
            let expand_clicked = ui
                .add_enabled(
                    !self.ui_state.search_query().trim().is_empty(),
                    egui::Button::new("Expand matches"),
                )
                .clicked();
            if submitted || expand_clicked {
                self.expand_search_matches();
            }
            if ui.button("Clear").clicked() {
                self.ui_state.set_search_query(String::new());
            }
        });
    }

    fn expand_search_matches(&mut self) {
        let ids = self.store.search_expansion_ids(self.ui_state.search_query());
        if ids.is_empty() {
            return;
        }
        tracing::debug!(
            query = self.ui_state.search_query(),
            expanded = ids.len(),
            "search-driven expansion"
        );
        self.ui_state.expand_many(ids);
        self.request_fit();
    }

    fn draw_priority_filter(&mut self, ui: &mut Ui) {
        ui.label("Priority");
        ui.horizontal_wrapped(|ui| {
            for filter in PriorityFilter::ALL {
                let selected = self.ui_state.priority_filter() == filter;
                if ui.selectable_label(selected, filter.label()).clicked() {
                    self.ui_state.set_priority_filter(filter);
                }
            }
        });
    }

    fn draw_key_processes(&mut self, ui: &mut Ui) {
        if self.store.key_processes().is_empty() {
            ui.label("No key processes in this document.");
            return;
        }

        let mut activated = None;
        for process in self.store.key_processes() {
            let selected = self.ui_state.selected_key_process() == Some(process.id.as_str());
            ui.horizontal(|ui| {
                ui.label(RichText::new("●").color(priority_color(process.criticality)));
                let label = if process.workflow.is_some() {
                    format!("{}  (guided)", process.name)
                } else {
                    process.name.clone()
                };
                let response = ui
                    .selectable_label(selected, label)
                    .on_hover_text(process.criticality.label());
                if response.clicked() {
                    activated = Some(process.id.clone());
                }
            });
        }

        if let Some(process_id) = activated {
            let focused = activate_key_process(&mut self.ui_state, &self.store, &process_id);
            self.workflow_open = self
                .store
                .key_process(&process_id)
                .is_some_and(|process| process.workflow.is_some());
            self.workflow_cursor = WorkflowCursor::default();
            match focused {
                Some(id) => self.focus_on(&id),
                None => self.request_fit(),
            }
        }

        if self.ui_state.selected_key_process().is_some() && ui.button("Clear focus").clicked() {
            self.ui_state.select_key_process(None);
            self.workflow_open = false;
        }
    }

    fn draw_jump_list(&mut self, ui: &mut Ui) {
        ui.add(
            egui::TextEdit::singleline(&mut self.jump_query)
                .hint_text("Fuzzy find by name")
                .desired_width(f32::INFINITY),
        );

        if self.jump_query.trim().is_empty() {
            return;
        }

        let matches = self.store.fuzzy_find(self.jump_query.trim(), JUMP_RESULTS);
        if matches.is_empty() {
            ui.label("No nodes match.");
            return;
        }

        let mut revealed = None;
        for found in &matches {
            let crumbs = self
                .store
                .breadcrumbs(&found.id)
                .iter()
                .map(|crumb| crumb.name.as_str())
                .collect::<Vec<_>>()
                .join(" / ");
            if ui.link(found.name.as_str()).on_hover_text(crumbs).clicked() {
                revealed = Some(found.id.clone());
            }
        }

        if let Some(id) = revealed {
            self.reveal_node(&id);
        }
    }

    /// Selects `id`, opens its ancestors, and centers the canvas on it.
    pub(in crate::app) fn reveal_node(&mut self, id: &str) {
        self.ui_state.reveal(&self.store, id);
        self.focus_on(id);
    }
}
