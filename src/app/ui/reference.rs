use eframe::egui::{self, RichText, Ui};
use lifecycle_atlas::content::ContentStore;

use super::super::ViewModel;

fn field(ui: &mut Ui, title: &str, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    ui.label(format!("{title}: {text}"));
}

fn phase_links(ui: &mut Ui, store: &ContentStore, title: &str, ids: &[String]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    let mut clicked = None;
    ui.horizontal_wrapped(|ui| {
        ui.label(format!("{title}:"));
        for id in ids {
            match store.find(id) {
                Some(node) => {
                    if ui.link(node.name.as_str()).on_hover_text(id.as_str()).clicked() {
                        clicked = Some(id.clone());
                    }
                }
                None => {
                    ui.label(RichText::new(id.as_str()).weak());
                }
            }
        }
    });
    clicked
}

impl ViewModel {
    pub(in crate::app) fn draw_reference(&mut self, ui: &mut Ui) {
        let cross = self.store.cross_cutting();
        if cross.is_empty() {
            ui.label("No cross-cutting reference in this document.");
            return;
        }

        let mut revealed = None;

        if !cross.google_ecosystem.is_empty() {
            ui.label(RichText::new("Google ecosystem").strong());
            for product in &cross.google_ecosystem {
                egui::CollapsingHeader::new(product.product.as_str())
                    .id_salt(("google-product", product.product.as_str()))
                    .show(ui, |ui| {
                        field(ui, "About", &product.description);
                        field(ui, "Sends", &product.data_sent);
                        field(ui, "Receives", &product.data_received);
                        for issue in &product.common_issues {
                            ui.label(format!("• {issue}"));
                        }
                        if let Some(id) =
                            phase_links(ui, &self.store, "Phases", &product.phases_involved)
                        {
                            revealed = Some(id);
                        }
                    });
            }
            ui.add_space(6.0);
        }

        if !cross.competitors.is_empty() {
            ui.label(RichText::new("Competitors").strong());
            for competitor in &cross.competitors {
                egui::CollapsingHeader::new(competitor.name.as_str())
                    .id_salt(("competitor", competitor.name.as_str()))
                    .show(ui, |ui| {
                        if !competitor.core_products.is_empty() {
                            field(ui, "Products", &competitor.core_products.join(", "));
                        }
                        field(ui, "Strength", &competitor.core_strength);
                        field(ui, "Threat", &competitor.threat_to_google);
                        field(ui, "Response", &competitor.google_response);
                    });
            }
            ui.add_space(6.0);
        }

        if !cross.privacy_consent.is_empty() {
            ui.label(RichText::new("Privacy & consent").strong());
            for concept in &cross.privacy_consent {
                egui::CollapsingHeader::new(concept.concept.as_str())
                    .id_salt(("privacy", concept.concept.as_str()))
                    .show(ui, |ui| {
                        field(ui, "Definition", &concept.definition);
                        field(ui, "Ads context", &concept.ads_context);
                        if let Some(id) =
                            phase_links(ui, &self.store, "Affects", &concept.affected_phases)
                        {
                            revealed = Some(id);
                        }
                    });
            }
        }

        if let Some(id) = revealed {
            self.reveal_node(&id);
        }
    }
}
