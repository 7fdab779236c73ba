use serde::Serialize;

/// The four entity tiers, in their fixed column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Who,
    Where,
    When,
    What,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Category {
    pub const ALL: [Category; 4] = [Self::Who, Self::Where, Self::When, Self::What];

    pub fn index(self) -> usize {
        match self {
            Self::Who => 0,
            Self::Where => 1,
            Self::When => 2,
            Self::What => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Who => "WHO",
            Self::Where => "WHERE",
            Self::When => "WHEN",
            Self::What => "WHAT",
        }
    }

    /// Maps an NER entity-type label onto its tier. Unknown labels have no tier.
    pub fn from_entity_type(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PERSON" => Some(Self::Who),
            "GPE" | "PLACE" => Some(Self::Where),
            "DATE" => Some(Self::When),
            "VERB" | "ACTION" => Some(Self::What),
            _ => None,
        }
    }

    /// Accepts either a column label (`where`) or an entity-type label (`GPE`).
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|category| category.label() == upper)
            .or_else(|| Self::from_entity_type(&upper))
    }

    pub fn step(self, direction: Direction) -> Option<Self> {
        let index = match direction {
            Direction::Backward => self.index().checked_sub(1)?,
            Direction::Forward => self.index() + 1,
        };
        Self::ALL.get(index).copied()
    }

    pub fn is_adjacent(self, other: Self) -> bool {
        self.index().abs_diff(other.index()) == 1
    }
}

/// Which tiers are currently drawn. Only WHAT can be switched off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visibility {
    pub show_what: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self { show_what: true }
    }
}

impl Visibility {
    pub fn chain(self) -> &'static [Category] {
        if self.show_what {
            &Category::ALL
        } else {
            &Category::ALL[..3]
        }
    }

    pub fn contains(self, category: Category) -> bool {
        self.chain().contains(&category)
    }
}
