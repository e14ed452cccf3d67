use eframe::egui::{self, RichText, Ui};
use lifecycle_atlas::content::{CauseProbability, KnowledgeNode, Troubleshooting};

use super::super::ViewModel;
use super::super::render_utils::{category_color, priority_color};

enum DetailAction {
    Reveal(String),
    Toggle(String),
}

fn text_section(ui: &mut Ui, title: &str, text: Option<&str>) {
    let Some(text) = text.filter(|text| !text.trim().is_empty()) else {
        return;
    };
    ui.add_space(6.0);
    ui.label(RichText::new(title).strong());
    ui.label(text);
}

fn list_section(ui: &mut Ui, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    ui.add_space(6.0);
    ui.label(RichText::new(title).strong());
    for item in items {
        ui.label(format!("• {item}"));
    }
}

fn probability_color(probability: CauseProbability) -> egui::Color32 {
    match probability {
        CauseProbability::High => egui::Color32::from_rgb(235, 87, 87),
        CauseProbability::Medium => egui::Color32::from_rgb(242, 168, 60),
        CauseProbability::Low => egui::Color32::from_rgb(96, 165, 250),
    }
}

fn troubleshooting_section(ui: &mut Ui, troubleshooting: &Troubleshooting) {
    if troubleshooting.is_empty() {
        return;
    }
    ui.separator();
    ui.label(RichText::new("Troubleshooting").strong());
    list_section(ui, "Symptoms", &troubleshooting.symptoms);

    if !troubleshooting.diagnostic_questions.is_empty() {
        ui.add_space(6.0);
        ui.label(RichText::new("Diagnostic questions").strong());
        for (index, question) in troubleshooting.diagnostic_questions.iter().enumerate() {
            ui.label(format!("{}. {question}", index + 1));
        }
    }

    if !troubleshooting.causes.is_empty() {
        ui.add_space(6.0);
        ui.label(RichText::new("Common causes").strong());
        for cause in &troubleshooting.causes {
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 8))
                .corner_radius(4.0)
                .inner_margin(egui::Margin::same(6))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new(cause.issue.as_str()).strong());
                        badge(
                            ui,
                            cause.probability.label(),
                            probability_color(cause.probability),
                        );
                    });
                    if !cause.resolution.is_empty() {
                        ui.label(format!("Resolution: {}", cause.resolution));
                    }
                    if !cause.verification.is_empty() {
                        ui.label(format!("Verify: {}", cause.verification));
                    }
                });
            ui.add_space(4.0);
        }
    }
}

fn badge(ui: &mut Ui, text: &str, color: egui::Color32) {
    egui::Frame::new()
        .fill(color.linear_multiply(0.25))
        .stroke(egui::Stroke::new(1.0, color))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().color(egui::Color32::from_gray(230)));
        });
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.ui_state.selected_node_id().map(str::to_owned) else {
            ui.label("Select a node on the canvas or from the jump list.");
            return;
        };

        let Some(node) = self.store.find(&selected_id) else {
            ui.label("The selected node is not part of the loaded content.");
            return;
        };

        let mut action = None;
        egui::ScrollArea::vertical()
            .id_salt("details_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                action = self.draw_node_details(ui, node);
            });

        match action {
            Some(DetailAction::Reveal(id)) => self.reveal_node(&id),
            Some(DetailAction::Toggle(id)) => self.ui_state.toggle_expand(&id),
            None => {}
        }
    }

    fn draw_node_details(&self, ui: &mut Ui, node: &KnowledgeNode) -> Option<DetailAction> {
        let mut action = None;

        let crumbs = self.store.breadcrumbs(&node.id);
        ui.horizontal_wrapped(|ui| {
            for (index, crumb) in crumbs.iter().enumerate() {
                if index > 0 {
                    ui.label("›");
                }
                if crumb.id == node.id {
                    ui.label(RichText::new(crumb.name.as_str()).weak());
                } else if ui.link(crumb.name.as_str()).clicked() {
                    action = Some(DetailAction::Reveal(crumb.id.clone()));
                }
            }
        });
        ui.add_space(4.0);

        ui.label(RichText::new(node.name.as_str()).heading().strong());
        ui.small(node.id.as_str());
        ui.add_space(4.0);

        ui.horizontal_wrapped(|ui| {
            badge(ui, node.priority.label(), priority_color(node.priority));
            if !node.category.is_empty() {
                badge(ui, &node.category, category_color(&node.category));
            }
            if let Some(stage) = node.funnel_stage.as_deref() {
                badge(ui, stage, egui::Color32::from_gray(140));
            }
        });

        if self.store.is_expandable(&node.id) {
            ui.add_space(6.0);
            let label = if self.ui_state.is_expanded(&node.id) {
                "Collapse on canvas"
            } else {
                "Expand on canvas"
            };
            if ui.button(label).clicked() {
                action = Some(DetailAction::Toggle(node.id.clone()));
            }
        }

        ui.separator();
        text_section(ui, "Summary", node.summary.as_deref());
        text_section(ui, "Definition", node.definition.as_deref());
        text_section(ui, "Ads context", node.ads_context.as_deref());
        text_section(ui, "Why it matters", node.relevance_note.as_deref());
        list_section(ui, "Key details", &node.key_details);
        list_section(ui, "Tools", &node.tools);

        if let Some(sql) = node.sql_connection.as_deref().filter(|sql| !sql.trim().is_empty()) {
            ui.add_space(6.0);
            ui.label(RichText::new("SQL connection").strong());
            ui.label(RichText::new(sql).monospace());
        }

        if node.data_flow_in.is_some() || node.data_flow_out.is_some() {
            ui.add_space(6.0);
            ui.label(RichText::new("Data flow").strong());
            if let Some(input) = node.data_flow_in.as_deref() {
                ui.label(format!("In: {input}"));
            }
            if let Some(output) = node.data_flow_out.as_deref() {
                ui.label(format!("Out: {output}"));
            }
        }

        if let Some(troubleshooting) = node.troubleshooting.as_ref() {
            troubleshooting_section(ui, troubleshooting);
        }

        list_section(ui, "Interview questions", &node.interview_questions);
        if !node.interview_qa.is_empty() {
            ui.add_space(6.0);
            ui.label(RichText::new("Interview practice").strong());
            for (index, qa) in node.interview_qa.iter().enumerate() {
                egui::CollapsingHeader::new(qa.question.as_str())
                    .id_salt(("interview-qa", node.id.as_str(), index))
                    .show(ui, |ui| {
                        ui.label(qa.answer.as_str());
                    });
            }
        }

        if node.has_children() {
            ui.separator();
            ui.label(RichText::new(format!("Children ({})", node.children.len())).strong());
            for child in &node.children {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("●").color(priority_color(child.priority)));
                    if ui.link(child.name.as_str()).clicked() {
                        action = Some(DetailAction::Reveal(child.id.clone()));
                    }
                });
            }
        }

        action
    }
}
