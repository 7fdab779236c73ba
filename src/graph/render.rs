use serde::Serialize;

use crate::corpus::Category;

use super::keys::{Edge, EntityKey};
use super::layout::{BOX_HEIGHT, BOX_WIDTH, LABEL_BASELINE, Point, Side};
use super::state::GraphState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    /// Nothing is selected.
    Default,
    Emphasized,
    Dimmed,
}

impl Emphasis {
    pub fn opacity(self) -> f32 {
        match self {
            Self::Default => 0.7,
            Self::Emphasized => 1.0,
            Self::Dimmed => 0.1,
        }
    }

    fn of(selection_active: bool, emphasized: bool) -> Self {
        match (selection_active, emphasized) {
            (false, _) => Self::Default,
            (true, true) => Self::Emphasized,
            (true, false) => Self::Dimmed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Canvas {
        width: f32,
        height: f32,
    },
    ColumnLabel {
        category: Category,
        origin: Point,
    },
    EntityBox {
        key: EntityKey,
        origin: Point,
        width: f32,
        height: f32,
        emphasis: Emphasis,
    },
    Link {
        edge: Edge,
        from: Point,
        to: Point,
        emphasis: Emphasis,
    },
}

/// Write-only drawing surface.
pub trait RenderSink {
    fn submit(&mut self, command: DrawCommand);
}

impl RenderSink for Vec<DrawCommand> {
    fn submit(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

/// Issues the full scene for `state`: canvas, then each column with its
/// label and boxes, then every link.
pub fn render(state: &GraphState, width: f32, sink: &mut impl RenderSink) {
    let layout = state.layout();
    let highlight = state.highlight();
    let selection_active = highlight.is_some();

    sink.submit(DrawCommand::Canvas {
        width,
        height: layout.canvas_height(),
    });

    for &category in state.visibility().chain() {
        let Some(left) = layout.column_left(category, width) else {
            continue;
        };
        sink.submit(DrawCommand::ColumnLabel {
            category,
            origin: Point {
                x: left,
                y: LABEL_BASELINE,
            },
        });

        for entity in state.index().entities(category) {
            let key = EntityKey::new(category, entity);
            let Some(origin) = layout.box_origin(&key, width) else {
                continue;
            };
            let emphasized =
                highlight.is_some_and(|highlight| highlight.related_entities.contains(&key));
            sink.submit(DrawCommand::EntityBox {
                key,
                origin,
                width: BOX_WIDTH,
                height: BOX_HEIGHT,
                emphasis: Emphasis::of(selection_active, emphasized),
            });
        }
    }

    for edge in state.edges() {
        let (Some(from), Some(to)) = (
            layout.link_anchor(&edge.from, Side::Right, width),
            layout.link_anchor(&edge.to, Side::Left, width),
        ) else {
            continue;
        };
        let emphasized = highlight.is_some_and(|highlight| highlight.related_edges.contains(edge));
        sink.submit(DrawCommand::Link {
            edge: edge.clone(),
            from,
            to,
            emphasis: Emphasis::of(selection_active, emphasized),
        });
    }
}
