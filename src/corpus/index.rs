use indexmap::{IndexMap, IndexSet};

use super::category::Category;
use super::records::EntityMention;

/// Per-tier entity lists plus the file membership that joins them.
///
/// Entities keep first-seen order, which fixes their row in the column.
/// `membership[c]` maps an entity of tier `c` to the files mentioning it;
/// `by_file` is the inverse, split by tier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityIndex {
    membership: [IndexMap<String, IndexSet<String>>; 4],
    by_file: IndexMap<String, [IndexSet<String>; 4]>,
}

impl EntityIndex {
    pub fn build<'a>(mentions: impl IntoIterator<Item = &'a EntityMention>) -> Self {
        let mut index = Self::default();
        let mut skipped = 0usize;

        for mention in mentions {
            let Some(category) = mention.category() else {
                skipped += 1;
                continue;
            };
            if mention.entity.is_empty() || mention.file.is_empty() {
                skipped += 1;
                continue;
            }

            index.membership[category.index()]
                .entry(mention.entity.clone())
                .or_default()
                .insert(mention.file.clone());
            index.by_file.entry(mention.file.clone()).or_default()[category.index()]
                .insert(mention.entity.clone());
        }

        tracing::debug!(
            people = index.len(Category::Who),
            places = index.len(Category::Where),
            dates = index.len(Category::When),
            actions = index.len(Category::What),
            files = index.by_file.len(),
            skipped,
            "built entity index"
        );

        index
    }

    pub fn entities(&self, category: Category) -> impl ExactSizeIterator<Item = &str> {
        self.membership[category.index()].keys().map(String::as_str)
    }

    pub fn len(&self, category: Category) -> usize {
        self.membership[category.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.membership.iter().all(IndexMap::is_empty)
    }

    pub fn contains(&self, category: Category, entity: &str) -> bool {
        self.membership[category.index()].contains_key(entity)
    }

    /// Row position of an entity within its column.
    pub fn position(&self, category: Category, entity: &str) -> Option<usize> {
        self.membership[category.index()].get_index_of(entity)
    }

    /// Files mentioning `entity` as `category`. `None` means no files.
    pub fn lookup_files(&self, entity: &str, category: Category) -> Option<&IndexSet<String>> {
        self.membership[category.index()].get(entity)
    }

    /// Entities of `category` mentioned in `file`. `None` means none.
    pub fn lookup_entities(&self, file: &str, category: Category) -> Option<&IndexSet<String>> {
        self.by_file
            .get(file)
            .map(|tiers| &tiers[category.index()])
            .filter(|entities| !entities.is_empty())
    }
}
