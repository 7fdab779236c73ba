use eframe::egui::{self, Pos2, Rect};

use crate::graph::{EntityKey, GraphEvent};

use super::super::ViewModel;

impl ViewModel {
    /// Boxes scrolled out of `visible` are never hit, even when they lie
    /// under the pointer behind a side panel.
    pub(in crate::app) fn hovered_entity(
        pointer: Option<Pos2>,
        visible: Rect,
        hit_boxes: &[(Rect, EntityKey)],
    ) -> Option<EntityKey> {
        let pointer = pointer.filter(|pointer| visible.contains(*pointer))?;
        hit_boxes
            .iter()
            .find(|(rect, _key)| rect.contains(pointer))
            .map(|(_rect, key)| key.clone())
    }

    /// Hovering an entity selects it; clicking also opens its source text.
    /// Leaving an entity keeps the current selection until reset.
    pub(in crate::app) fn pointer_event(
        response: &egui::Response,
        hovered: Option<EntityKey>,
        selected: Option<&EntityKey>,
    ) -> Option<GraphEvent> {
        let key = hovered?;
        if response.clicked_by(egui::PointerButton::Primary) {
            Some(GraphEvent::Click(key))
        } else if selected != Some(&key) {
            Some(GraphEvent::Hover(key))
        } else {
            None
        }
    }
}
