use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::corpus::{Corpus, Visibility, load_corpus};
use crate::graph::{EntityKey, GraphEvent, GraphState, JoinStrategy};

mod graph;
mod render_utils;
mod ui;

#[derive(Clone, Debug)]
pub struct ViewerOptions {
    pub data_dir: PathBuf,
    pub join: JoinStrategy,
    pub visibility: Visibility,
}

pub struct EntityAtlasApp {
    options: ViewerOptions,
    state: AppState,
    reload_rx: Option<Receiver<Result<Corpus, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Corpus, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    corpus: Corpus,
    graph: GraphState,
    graph_revision: u64,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    show_noun_phrases: bool,
}

struct SearchMatchCache {
    query: String,
    graph_revision: u64,
    matches: Arc<HashSet<EntityKey>>,
}

impl EntityAtlasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: ViewerOptions) -> Self {
        let state = Self::start_load(options.data_dir.clone());
        Self {
            options,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(data_dir: PathBuf) -> Receiver<Result<Corpus, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_corpus(&data_dir).map_err(|error| format!("{error:#}"));
            if let Err(error) = &result {
                tracing::error!("corpus load failed: {error}");
            }
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_dir: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_dir),
        }
    }

    fn ready(&self, corpus: Corpus) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(corpus, &self.options)))
    }
}

impl eframe::App for EntityAtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let mut retry = false;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => {
                        transition = Some(result);
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading corpus tables...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the corpus");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(
                    ctx,
                    &self.options.data_dir.display().to_string(),
                    &mut reload_requested,
                    is_reloading,
                );

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.options.data_dir.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if retry {
            self.state = Self::start_load(self.options.data_dir.clone());
            return;
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = match result {
                Ok(corpus) => self.ready(corpus),
                Err(error) => AppState::Error(error),
            };
        }
    }
}

impl ViewModel {
    /// Runs one event through the graph state and invalidates view caches
    /// when the scene was rebuilt.
    pub(in crate::app) fn dispatch(&mut self, event: GraphEvent) {
        let rebuilds = matches!(
            event,
            GraphEvent::DataLoaded(_) | GraphEvent::ToggleWhat(_)
        );

        let graph = std::mem::take(&mut self.graph);
        self.graph = graph.handle_event(event);

        if rebuilds {
            self.graph_revision = self.graph_revision.wrapping_add(1);
            self.search_match_cache = None;
        }
    }
}
