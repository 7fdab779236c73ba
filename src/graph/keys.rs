use serde::Serialize;

use crate::corpus::Category;

/// Stable identity of one entity box.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityKey {
    pub category: Category,
    pub entity: String,
}

impl EntityKey {
    pub fn new(category: Category, entity: impl Into<String>) -> Self {
        Self {
            category,
            entity: entity.into(),
        }
    }

    /// Parses `CATEGORY:entity`, e.g. `where:Paris` or `GPE:Paris`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (category, entity) = raw.split_once(':')?;
        let entity = entity.trim();
        if entity.is_empty() {
            return None;
        }
        Some(Self::new(Category::parse(category)?, entity))
    }
}

/// A co-occurrence link, always stored from the lower tier to the higher one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge {
    pub from: EntityKey,
    pub to: EntityKey,
}

impl Edge {
    pub fn between(a: EntityKey, b: EntityKey) -> Self {
        if a.category <= b.category {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }
}
