use indexmap::IndexSet;

use crate::corpus::{Category, EntityIndex};

/// How co-occurrence between adjacent tiers is computed.
///
/// Both strategies return the same set, ordered by row position in the
/// target tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum JoinStrategy {
    /// Walk the file -> entities map built with the index.
    #[default]
    Indexed,
    /// Compare the file sets of every entity in the target tier.
    Scan,
}

impl JoinStrategy {
    pub fn label(self) -> &'static str {
        match self {
            Self::Indexed => "indexed join",
            Self::Scan => "scan join",
        }
    }

    /// Entities of `to` sharing at least one file with `entity` of `from`.
    ///
    /// `to` must be adjacent to `from`; any other pair is empty.
    pub fn related_entities<'a>(
        self,
        index: &'a EntityIndex,
        entity: &str,
        from: Category,
        to: Category,
    ) -> IndexSet<&'a str> {
        if !from.is_adjacent(to) {
            return IndexSet::new();
        }

        let Some(files) = index.lookup_files(entity, from) else {
            return IndexSet::new();
        };

        match self {
            Self::Indexed => indexed_join(index, files, to),
            Self::Scan => scan_join(index, files, to),
        }
    }
}

fn indexed_join<'a>(
    index: &'a EntityIndex,
    files: &IndexSet<String>,
    to: Category,
) -> IndexSet<&'a str> {
    let mut hits = files
        .iter()
        .filter_map(|file| index.lookup_entities(file, to))
        .flatten()
        .filter_map(|entity| {
            index
                .position(to, entity)
                .map(|position| (position, entity.as_str()))
        })
        .collect::<Vec<_>>();

    hits.sort_unstable();
    hits.dedup();
    hits.into_iter().map(|(_position, entity)| entity).collect()
}

fn scan_join<'a>(
    index: &'a EntityIndex,
    files: &IndexSet<String>,
    to: Category,
) -> IndexSet<&'a str> {
    index
        .entities(to)
        .filter(|candidate| {
            index
                .lookup_files(candidate, to)
                .is_some_and(|candidate_files| {
                    candidate_files.iter().any(|file| files.contains(file))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::EntityMention;

    const STRATEGIES: [JoinStrategy; 2] = [JoinStrategy::Indexed, JoinStrategy::Scan];

    fn corpus_index() -> EntityIndex {
        EntityIndex::build(&[
            EntityMention::new("f1", "Alice", "PERSON"),
            EntityMention::new("f1", "Paris", "GPE"),
            EntityMention::new("f1", "2020", "DATE"),
            EntityMention::new("f2", "Bob", "PERSON"),
            EntityMention::new("f2", "Berlin", "GPE"),
            EntityMention::new("f2", "Paris", "GPE"),
            EntityMention::new("f3", "Berlin", "GPE"),
            EntityMention::new("f3", "2021", "DATE"),
            EntityMention::new("f3", "signed", "VERB"),
            EntityMention::new("f4", "Carol", "PERSON"),
            EntityMention::new("f5", "Rome", "GPE"),
        ])
    }

    #[test]
    fn finds_entities_sharing_a_file() {
        let index = corpus_index();

        for join in STRATEGIES {
            let related = join.related_entities(&index, "Alice", Category::Who, Category::Where);
            assert_eq!(related.into_iter().collect::<Vec<_>>(), ["Paris"], "{join:?}");

            let related = join.related_entities(&index, "Berlin", Category::Where, Category::Who);
            assert_eq!(related.into_iter().collect::<Vec<_>>(), ["Bob"], "{join:?}");
        }
    }

    #[test]
    fn results_follow_target_row_order() {
        let index = corpus_index();

        for join in STRATEGIES {
            let related = join.related_entities(&index, "Bob", Category::Who, Category::Where);
            assert_eq!(
                related.into_iter().collect::<Vec<_>>(),
                ["Paris", "Berlin"],
                "{join:?}"
            );
        }
    }

    #[test]
    fn relation_is_symmetric() {
        let index = corpus_index();

        for join in STRATEGIES {
            for pair in Category::ALL.windows(2) {
                let (low, high) = (pair[0], pair[1]);
                for a in index.entities(low) {
                    for b in index.entities(high) {
                        let forward = join.related_entities(&index, a, low, high).contains(b);
                        let backward = join.related_entities(&index, b, high, low).contains(a);
                        assert_eq!(forward, backward, "{join:?} {a} <-> {b}");
                    }
                }
            }
        }
    }

    #[test]
    fn strategies_agree() {
        let index = corpus_index();

        for category in Category::ALL {
            for neighbor in Category::ALL {
                for entity in index.entities(category) {
                    assert_eq!(
                        JoinStrategy::Indexed.related_entities(&index, entity, category, neighbor),
                        JoinStrategy::Scan.related_entities(&index, entity, category, neighbor),
                    );
                }
            }
        }
    }

    #[test]
    fn disjoint_membership_yields_nothing() {
        let index = corpus_index();

        for join in STRATEGIES {
            assert!(join
                .related_entities(&index, "Carol", Category::Who, Category::Where)
                .is_empty());
            assert!(join
                .related_entities(&index, "Rome", Category::Where, Category::When)
                .is_empty());
            assert!(join
                .related_entities(&index, "Nobody", Category::Who, Category::Where)
                .is_empty());
        }
    }

    #[test]
    fn non_adjacent_tiers_are_never_related() {
        let index = corpus_index();

        for join in STRATEGIES {
            assert!(join
                .related_entities(&index, "Alice", Category::Who, Category::When)
                .is_empty());
            assert!(join
                .related_entities(&index, "Paris", Category::Where, Category::Where)
                .is_empty());
        }
    }
}
