mod edges;
mod highlight;
mod keys;
mod layout;
mod render;
mod resolve;
mod state;

pub use keys::EntityKey;
pub use layout::CANVAS_WIDTH;
pub use render::{DrawCommand, Emphasis, RenderSink, render};
pub use resolve::JoinStrategy;
pub use state::{GraphEvent, GraphState, Selection};
