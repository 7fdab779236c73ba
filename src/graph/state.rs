use crate::corpus::{EntityIndex, Visibility};

use super::edges::build_edges;
use super::highlight::{HighlightState, build_highlight_state};
use super::keys::{Edge, EntityKey};
use super::layout::{LayoutPlan, plan_layout};
use super::resolve::JoinStrategy;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        key: EntityKey,
        highlight: HighlightState,
    },
}

/// Files whose source text the detail panel should show, in membership order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRequest {
    pub key: EntityKey,
    pub files: Vec<String>,
}

#[derive(Clone, Debug)]
pub enum GraphEvent {
    DataLoaded(EntityIndex),
    ToggleWhat(bool),
    Hover(EntityKey),
    Click(EntityKey),
    Reset,
}

/// Everything the graph view derives from the loaded data and user input.
///
/// Layout and edges are recomputed in full whenever the data or the WHAT
/// toggle changes; a selection never survives such a rebuild.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphState {
    index: EntityIndex,
    join: JoinStrategy,
    visibility: Visibility,
    layout: LayoutPlan,
    edges: Vec<Edge>,
    selection: Selection,
    details: Option<DetailRequest>,
}

impl GraphState {
    pub fn new(join: JoinStrategy, visibility: Visibility) -> Self {
        Self {
            join,
            visibility,
            ..Self::default()
        }
        .rebuild()
    }

    pub fn handle_event(self, event: GraphEvent) -> Self {
        match event {
            GraphEvent::DataLoaded(index) => Self { index, ..self }.rebuild(),
            GraphEvent::ToggleWhat(show_what) => {
                if self.visibility.show_what == show_what {
                    return self;
                }
                let visibility = Visibility { show_what };
                Self { visibility, ..self }.rebuild()
            }
            GraphEvent::Hover(key) => self.select(key),
            GraphEvent::Click(key) => self.select(key).open_details(),
            GraphEvent::Reset => Self {
                selection: Selection::Idle,
                details: None,
                ..self
            },
        }
    }

    fn rebuild(self) -> Self {
        let layout = plan_layout(&self.index, self.visibility);
        let edges = build_edges(&self.index, self.join, self.visibility);

        tracing::debug!(
            show_what = self.visibility.show_what,
            edges = edges.len(),
            canvas_height = layout.canvas_height(),
            "rebuilt entity graph"
        );

        Self {
            layout,
            edges,
            selection: Selection::Idle,
            details: None,
            ..self
        }
    }

    fn select(self, key: EntityKey) -> Self {
        if self.selected_key() == Some(&key) {
            return self;
        }

        let highlight = build_highlight_state(&self.index, self.join, self.visibility, &key);
        if highlight.is_empty() {
            tracing::debug!(?key, "ignoring selection outside the visible graph");
            return self;
        }

        tracing::trace!(
            ?key,
            entities = highlight.related_entities.len(),
            edges = highlight.related_edges.len(),
            "selected entity"
        );

        Self {
            selection: Selection::Selected { key, highlight },
            ..self
        }
    }

    fn open_details(self) -> Self {
        let Some(key) = self.selected_key().cloned() else {
            return self;
        };

        let files = self
            .index
            .lookup_files(&key.entity, key.category)
            .map(|files| files.iter().cloned().collect())
            .unwrap_or_default();

        Self {
            details: Some(DetailRequest { key, files }),
            ..self
        }
    }

    pub fn index(&self) -> &EntityIndex {
        &self.index
    }

    pub fn join(&self) -> JoinStrategy {
        self.join
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn layout(&self) -> &LayoutPlan {
        &self.layout
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_key(&self) -> Option<&EntityKey> {
        match &self.selection {
            Selection::Idle => None,
            Selection::Selected { key, .. } => Some(key),
        }
    }

    pub fn highlight(&self) -> Option<&HighlightState> {
        match &self.selection {
            Selection::Idle => None,
            Selection::Selected { highlight, .. } => Some(highlight),
        }
    }

    pub fn details(&self) -> Option<&DetailRequest> {
        self.details.as_ref()
    }
}
