use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::graph::{CANVAS_WIDTH, DrawCommand, Emphasis, EntityKey, RenderSink, render};
use crate::util::short_entity;

use super::super::render_utils::{
    SEARCH_MATCH_COLOR, blend_color, category_color, draw_background, horizontal_link,
    with_opacity,
};
use super::super::{SearchMatchCache, ViewModel};

const BOX_LABEL_CHARS: usize = 24;

fn fuzzy_match_score(
    matcher: &SkimMatcherV2,
    text: &str,
    query: &str,
) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Draws render commands with an egui painter and remembers where each
/// entity box landed so the pointer can be hit-tested afterwards.
struct PainterSink<'a> {
    painter: &'a Painter,
    origin: Pos2,
    selected: Option<&'a EntityKey>,
    search_matches: Option<&'a HashSet<EntityKey>>,
    hit_boxes: Vec<(Rect, EntityKey)>,
}

impl PainterSink<'_> {
    fn at(&self, x: f32, y: f32) -> Pos2 {
        self.origin + vec2(x, y)
    }
}

impl RenderSink for PainterSink<'_> {
    fn submit(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Canvas { width, height } => {
                let rect = Rect::from_min_size(self.origin, vec2(width, height));
                draw_background(self.painter, rect);
            }
            DrawCommand::ColumnLabel { category, origin } => {
                self.painter.text(
                    self.at(origin.x, origin.y),
                    Align2::LEFT_BOTTOM,
                    category.label(),
                    FontId::proportional(15.0),
                    Color32::from_gray(238),
                );
            }
            DrawCommand::EntityBox {
                key,
                origin,
                width,
                height,
                emphasis,
            } => {
                let rect = Rect::from_min_size(self.at(origin.x, origin.y), vec2(width, height));
                let is_search_match = self
                    .search_matches
                    .is_some_and(|matches| matches.contains(&key));
                let base = category_color(key.category);
                let fill = if is_search_match {
                    blend_color(base, SEARCH_MATCH_COLOR, 0.68)
                } else {
                    base
                };

                self.painter.rect_filled(rect, 2.0, with_opacity(fill, emphasis));
                if emphasis == Emphasis::Emphasized || self.selected == Some(&key) {
                    self.painter.rect_stroke(
                        rect,
                        2.0,
                        Stroke::new(1.0, Color32::from_gray(15)),
                        egui::StrokeKind::Inside,
                    );
                } else if is_search_match {
                    self.painter.rect_stroke(
                        rect,
                        2.0,
                        Stroke::new(1.4, SEARCH_MATCH_COLOR),
                        egui::StrokeKind::Outside,
                    );
                }

                self.painter.text(
                    rect.left_center() + vec2(5.0, 0.0),
                    Align2::LEFT_CENTER,
                    short_entity(&key.entity, BOX_LABEL_CHARS),
                    FontId::proportional(11.0),
                    with_opacity(Color32::from_gray(12), emphasis),
                );

                self.hit_boxes.push((rect, key));
            }
            DrawCommand::Link {
                from, to, emphasis, ..
            } => {
                let color = with_opacity(Color32::from_rgb(200, 200, 200), emphasis);
                let width = if emphasis == Emphasis::Emphasized {
                    1.6
                } else {
                    1.0
                };
                self.painter.add(horizontal_link(
                    self.at(from.x, from.y),
                    self.at(to.x, to.y),
                    Stroke::new(width, color),
                ));
            }
        }
    }
}

impl ViewModel {
    pub(in crate::app) fn cached_search_matches(&mut self) -> Option<Arc<HashSet<EntityKey>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.graph_revision == self.graph_revision
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let index = self.graph.index();
        let matches = self
            .graph
            .visibility()
            .chain()
            .iter()
            .flat_map(|&category| {
                index
                    .entities(category)
                    .map(move |entity| EntityKey::new(category, entity))
            })
            .filter(|key| fuzzy_match_score(&matcher, &key.entity, query).is_some())
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            graph_revision: self.graph_revision,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph.index().is_empty() {
            ui.label("The corpus has no PERSON, GPE, DATE or VERB mentions.");
            return;
        }

        let search_matches = self.cached_search_matches();
        let canvas_height = self.graph.layout().canvas_height();

        let pending_event = egui::ScrollArea::both()
            .id_salt("entity_graph_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(vec2(CANVAS_WIDTH, canvas_height), Sense::click());
                let painter = ui.painter_at(rect);

                let mut sink = PainterSink {
                    painter: &painter,
                    origin: rect.min,
                    selected: self.graph.selected_key(),
                    search_matches: search_matches.as_deref(),
                    hit_boxes: Vec::new(),
                };
                render(&self.graph, CANVAS_WIDTH, &mut sink);

                let hovered =
                    Self::hovered_entity(response.hover_pos(), ui.clip_rect(), &sink.hit_boxes);
                if hovered.is_some() {
                    ui.output_mut(|output| {
                        output.cursor_icon = egui::CursorIcon::PointingHand;
                    });
                }

                Self::pointer_event(&response, hovered, self.graph.selected_key())
            })
            .inner;

        if let Some(event) = pending_event {
            self.dispatch(event);
        }
    }
}
