use eframe::egui::{self, Align, Context, Layout};

use crate::corpus::{Category, Corpus, EntityIndex};
use crate::graph::{GraphEvent, GraphState};

use super::super::{ViewModel, ViewerOptions};

impl ViewModel {
    pub(in crate::app) fn new(corpus: Corpus, options: &ViewerOptions) -> Self {
        let index = EntityIndex::build(&corpus.mentions);
        let graph = GraphState::new(options.join, options.visibility)
            .handle_event(GraphEvent::DataLoaded(index));

        Self {
            corpus,
            graph,
            graph_revision: 0,
            search: String::new(),
            search_match_cache: None,
            show_noun_phrases: false,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        data_dir: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("entity-atlas");
                    ui.separator();
                    ui.label(format!("data: {data_dir}"));
                    ui.label(format!("documents: {}", self.corpus.records.len()));
                    ui.label(format!("mentions: {}", self.corpus.mentions.len()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload corpus"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.graph_summary_text());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading corpus tables...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }

    fn graph_summary_text(&self) -> String {
        let index = self.graph.index();
        let columns = self
            .graph
            .visibility()
            .chain()
            .iter()
            .map(|&category| format!("{} {}", category.label(), index.len(category)))
            .collect::<Vec<_>>()
            .join(" / ");
        let hidden = if self.graph.visibility().contains(Category::What) {
            ""
        } else {
            " (WHAT hidden)"
        };

        format!(
            "{columns}{hidden} | {} links | {}",
            self.graph.edges().len(),
            self.graph.join().label()
        )
    }
}
