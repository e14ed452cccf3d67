use eframe::egui::{self, Context, RichText};

use super::super::ViewModel;
use super::super::render_utils::consideration_color;

impl ViewModel {
    pub(in crate::app) fn draw_workflow_window(&mut self, ctx: &Context) {
        if !self.workflow_open {
            return;
        }
        let Some(process) = self
            .ui_state
            .selected_key_process()
            .and_then(|id| self.store.key_process(id))
        else {
            self.workflow_open = false;
            return;
        };
        let Some(workflow) = process.workflow.as_ref() else {
            self.workflow_open = false;
            return;
        };

        let mut open = true;
        let mut cursor = self.workflow_cursor;
        let mut revealed = None;

        egui::Window::new(workflow.title.as_str())
            .id(egui::Id::new(("workflow", process.id.as_str())))
            .open(&mut open)
            .default_width(460.0)
            .resizable(true)
            .show(ctx, |ui| {
                if !workflow.subtitle.is_empty() {
                    ui.label(RichText::new(workflow.subtitle.as_str()).weak());
                    ui.add_space(4.0);
                }

                ui.horizontal_wrapped(|ui| {
                    for (index, step) in workflow.steps.iter().enumerate() {
                        let label = format!("{}. {}", index + 1, step.title);
                        if ui.selectable_label(cursor.index() == index, label).clicked() {
                            cursor.jump_to(workflow, index);
                        }
                    }
                });
                ui.separator();

                let Some(step) = cursor.current(workflow) else {
                    ui.label("This workflow has no steps.");
                    return;
                };

                ui.label(RichText::new(step.title.as_str()).heading());
                ui.label(step.description.as_str());

                for consideration in &step.considerations {
                    let color = consideration_color(consideration.kind);
                    ui.add_space(4.0);
                    egui::Frame::new()
                        .fill(color.linear_multiply(0.12))
                        .stroke(egui::Stroke::new(1.0, color))
                        .corner_radius(4.0)
                        .inner_margin(egui::Margin::same(6))
                        .show(ui, |ui| {
                            ui.label(
                                RichText::new(consideration.title.as_str())
                                    .strong()
                                    .color(color),
                            );
                            ui.label(consideration.content.as_str());
                        });
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!cursor.is_first(), egui::Button::new("Previous"))
                        .clicked()
                    {
                        cursor.previous();
                    }
                    ui.label(format!("{} / {}", cursor.index() + 1, workflow.steps.len()));
                    if ui
                        .add_enabled(!cursor.is_last(workflow), egui::Button::new("Next"))
                        .clicked()
                    {
                        cursor.next(workflow);
                    }
                });

                if !process.related_nodes.is_empty() {
                    ui.separator();
                    ui.label(RichText::new("Related nodes").strong());
                    ui.horizontal_wrapped(|ui| {
                        for id in &process.related_nodes {
                            let Some(node) = self.store.find(id) else {
                                continue;
                            };
                            if ui.link(node.name.as_str()).clicked() {
                                revealed = Some(node.id.clone());
                            }
                        }
                    });
                }
            });

        self.workflow_cursor = cursor;
        self.workflow_open = open;
        if let Some(id) = revealed {
            self.reveal_node(&id);
        }
    }
}
