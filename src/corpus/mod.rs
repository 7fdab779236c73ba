mod category;
mod index;
mod load;
mod records;

pub use category::{Category, Direction, Visibility};
pub use index::EntityIndex;
pub use load::load_corpus;
pub use records::{Corpus, EntityMention};
