use eframe::egui::{self, RichText, Sense, Ui, vec2};

use crate::corpus::Category;
use crate::graph::{EntityKey, GraphEvent, Selection};

use super::super::ViewModel;
use super::super::render_utils::category_color;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Graph Controls");
        ui.separator();
        ui.add_space(4.0);

        let mut show_what = self.graph.visibility().show_what;
        if ui
            .checkbox(&mut show_what, "Show WHAT column")
            .on_hover_text("Include actions (verbs) as a fourth column linked to dates.")
            .changed()
        {
            self.dispatch(GraphEvent::ToggleWhat(show_what));
        }

        if ui
            .button("Reset")
            .on_hover_text("Clear the selection and the source text panel.")
            .clicked()
        {
            self.dispatch(GraphEvent::Reset);
        }

        ui.separator();

        ui.label("Search entities")
            .on_hover_text("Fuzzy-mark matching boxes without changing the selection.");
        ui.text_edit_singleline(&mut self.search);

        let mut pending_event = None;
        if let Some(matches) = self.cached_search_matches() {
            let index = self.graph.index();
            let mut ordered = matches.iter().collect::<Vec<_>>();
            ordered.sort_by_key(|key| (key.category, index.position(key.category, &key.entity)));

            ui.small(format!("{} matches", ordered.len()));
            egui::ScrollArea::vertical()
                .id_salt("search_matches_scroll")
                .max_height(260.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for key in ordered {
                        let label = format!("{}  {}", key.category.label(), key.entity);
                        if ui.link(label).clicked() {
                            pending_event = Some(GraphEvent::Click(key.clone()));
                        }
                    }
                });
        }
        if let Some(event) = pending_event {
            self.dispatch(event);
        }

        ui.separator();
        ui.label(RichText::new("Selection").strong());
        match self.graph.selection() {
            Selection::Selected { key, highlight } => {
                ui.label(format!("{}: {}", key.category.label(), key.entity));
                ui.small(format!(
                    "{} entities and {} links emphasized",
                    highlight.related_entities.len(),
                    highlight.related_edges.len()
                ));
            }
            Selection::Idle => {
                ui.label("Hover an entity to trace its links; click it to read its sources.");
            }
        }

        ui.separator();
        ui.checkbox(&mut self.show_noun_phrases, "Show noun phrases with sources");

        ui.separator();
        ui.label(RichText::new("Columns").strong());
        for category in Category::ALL {
            let visible = self.graph.visibility().contains(category);
            ui.horizontal(|ui| {
                let (rect, _response) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
                ui.painter().rect_filled(rect, 2.0, category_color(category));
                let text = format!(
                    "{}  {}",
                    category.label(),
                    Self::category_caption(category)
                );
                if visible {
                    ui.label(text);
                } else {
                    ui.label(RichText::new(text).weak());
                }
            });
        }
    }

    fn category_caption(category: Category) -> &'static str {
        match category {
            Category::Who => "people",
            Category::Where => "places",
            Category::When => "dates",
            Category::What => "actions",
        }
    }

    pub(in crate::app) fn focus_entity(&mut self, key: EntityKey) {
        self.dispatch(GraphEvent::Click(key));
    }
}
