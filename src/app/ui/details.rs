use eframe::egui::{self, RichText, Ui};

use crate::corpus::Category;
use crate::graph::EntityKey;
use crate::util::{plain_text, source_label};

use super::super::ViewModel;
use super::super::render_utils::category_color;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Source Text");
        ui.add_space(6.0);

        let Some(details) = self.graph.details().cloned() else {
            ui.label("Click an entity to read the documents it appears in.");
            return;
        };

        ui.label(RichText::new(details.key.entity.as_str()).strong());
        ui.small(format!(
            "{} | {} document(s)",
            details.key.category.label(),
            details.files.len()
        ));
        ui.separator();

        let mut focus = None;
        egui::ScrollArea::vertical()
            .id_salt("source_text_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for file in &details.files {
                    ui.label(RichText::new(format!("Source: {}", source_label(file))).strong());

                    if let Some(record) = self.corpus.record_for(file) {
                        let mut meta = Vec::new();
                        if !record.source.is_empty() {
                            meta.push(record.source.as_str());
                        }
                        if !record.date.is_empty() {
                            meta.push(record.date.as_str());
                        }
                        if !meta.is_empty() {
                            ui.small(meta.join(" | "));
                        }
                    }

                    let mut rendered = false;
                    for fragment in self.corpus.renders_for(file) {
                        ui.label(plain_text(&fragment.render));
                        rendered = true;
                    }
                    if !rendered {
                        match self.corpus.record_for(file) {
                            Some(record) if !record.text.is_empty() => {
                                ui.label(record.text.as_str());
                            }
                            _ => {
                                ui.weak("No rendered text for this document.");
                            }
                        }
                    }

                    if let Some(key) = self.draw_file_entities(ui, file, &details.key) {
                        focus = Some(key);
                    }

                    if self.show_noun_phrases {
                        let phrases = self
                            .corpus
                            .noun_phrases_for(file)
                            .map(|phrase| phrase.phrase.as_str())
                            .collect::<Vec<_>>();
                        if !phrases.is_empty() {
                            ui.small(format!("Noun phrases: {}", phrases.join(", ")));
                        }
                    }

                    ui.separator();
                }
            });

        if let Some(key) = focus {
            self.focus_entity(key);
        }
    }

    /// Entities sharing this document, as links that select them.
    fn draw_file_entities(
        &self,
        ui: &mut Ui,
        file: &str,
        current: &EntityKey,
    ) -> Option<EntityKey> {
        let index = self.graph.index();
        let visibility = self.graph.visibility();
        let mut clicked = None;

        ui.horizontal_wrapped(|ui| {
            for category in Category::ALL {
                if !visibility.contains(category) {
                    continue;
                }
                let Some(entities) = index.lookup_entities(file, category) else {
                    continue;
                };
                for entity in entities {
                    if category == current.category && entity == &current.entity {
                        continue;
                    }
                    let text = RichText::new(entity.as_str()).color(category_color(category));
                    if ui.link(text).on_hover_text(category.label()).clicked() {
                        clicked = Some(EntityKey::new(category, entity.as_str()));
                    }
                }
            }
        });

        clicked
    }
}
