use std::collections::HashSet;

use indexmap::IndexSet;

use crate::corpus::{Category, Direction, EntityIndex, Visibility};

use super::keys::{Edge, EntityKey};
use super::resolve::JoinStrategy;

/// Entities and links emphasized for one selection. Everything else dims.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
    pub related_entities: HashSet<EntityKey>,
    pub related_edges: HashSet<Edge>,
}

impl HighlightState {
    pub fn is_empty(&self) -> bool {
        self.related_entities.is_empty()
    }
}

/// Expands outward from `selected` along the visible tier chain.
///
/// Each direction is walked on its own until the end of the chain: the
/// entities reached by one hop seed the next hop in the same direction.
/// An unknown or hidden selection yields an empty state.
pub fn build_highlight_state(
    index: &EntityIndex,
    join: JoinStrategy,
    visibility: Visibility,
    selected: &EntityKey,
) -> HighlightState {
    let mut state = HighlightState::default();
    let known = index.contains(selected.category, &selected.entity);
    if !known || !visibility.contains(selected.category) {
        return state;
    }

    state.related_entities.insert(selected.clone());
    for direction in [Direction::Backward, Direction::Forward] {
        collect_related_paths(index, join, visibility, selected, direction, &mut state);
    }
    state
}

fn collect_related_paths(
    index: &EntityIndex,
    join: JoinStrategy,
    visibility: Visibility,
    selected: &EntityKey,
    direction: Direction,
    state: &mut HighlightState,
) {
    let mut category = selected.category;
    let mut frontier = vec![selected.entity.as_str()];

    while let Some(next) = step_visible(category, direction, visibility) {
        let mut reached = IndexSet::new();

        for &entity in &frontier {
            for related in join.related_entities(index, entity, category, next) {
                state.related_edges.insert(Edge::between(
                    EntityKey::new(category, entity),
                    EntityKey::new(next, related),
                ));
                state.related_entities.insert(EntityKey::new(next, related));
                reached.insert(related);
            }
        }

        if reached.is_empty() {
            break;
        }

        frontier = reached.into_iter().collect();
        category = next;
    }
}

fn step_visible(
    category: Category,
    direction: Direction,
    visibility: Visibility,
) -> Option<Category> {
    category
        .step(direction)
        .filter(|&next| visibility.contains(next))
}
