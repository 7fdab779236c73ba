use crate::corpus::{Category, EntityIndex, Visibility};

use super::keys::{Edge, EntityKey};
use super::resolve::JoinStrategy;

/// Every co-occurrence link between adjacent visible tiers.
///
/// Edges are grouped by tier pair, then by source entity in row order, then
/// by target entity in row order.
pub fn build_edges(index: &EntityIndex, join: JoinStrategy, visibility: Visibility) -> Vec<Edge> {
    visibility
        .chain()
        .windows(2)
        .flat_map(|pair| pair_edges(index, join, pair[0], pair[1]))
        .collect()
}

fn pair_edges(index: &EntityIndex, join: JoinStrategy, low: Category, high: Category) -> Vec<Edge> {
    let mut edges = Vec::new();
    for entity in index.entities(low) {
        for related in join.related_entities(index, entity, low, high) {
            edges.push(Edge {
                from: EntityKey::new(low, entity),
                to: EntityKey::new(high, related),
            });
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::EntityMention;

    fn scenario() -> EntityIndex {
        EntityIndex::build(&[
            EntityMention::new("f1", "Alice", "PERSON"),
            EntityMention::new("f1", "Paris", "GPE"),
            EntityMention::new("f1", "2020", "DATE"),
            EntityMention::new("f1", "visited", "VERB"),
            EntityMention::new("f2", "Bob", "PERSON"),
            EntityMention::new("f2", "Paris", "GPE"),
            EntityMention::new("f3", "Carol", "PERSON"),
        ])
    }

    fn edge(from: (Category, &str), to: (Category, &str)) -> Edge {
        Edge {
            from: EntityKey::new(from.0, from.1),
            to: EntityKey::new(to.0, to.1),
        }
    }

    #[test]
    fn links_each_adjacent_pair_in_row_order() {
        let edges = build_edges(&scenario(), JoinStrategy::Indexed, Visibility::default());

        assert_eq!(
            edges,
            [
                edge((Category::Who, "Alice"), (Category::Where, "Paris")),
                edge((Category::Who, "Bob"), (Category::Where, "Paris")),
                edge((Category::Where, "Paris"), (Category::When, "2020")),
                edge((Category::When, "2020"), (Category::What, "visited")),
            ]
        );
    }

    #[test]
    fn hidden_what_contributes_no_edges() {
        let edges = build_edges(
            &scenario(),
            JoinStrategy::Indexed,
            Visibility { show_what: false },
        );

        assert_eq!(edges.len(), 3);
        assert!(edges.iter().all(|edge| edge.to.category != Category::What));
    }

    #[test]
    fn never_links_within_a_tier() {
        for join in [JoinStrategy::Indexed, JoinStrategy::Scan] {
            let edges = build_edges(&scenario(), join, Visibility::default());
            assert!(edges
                .iter()
                .all(|edge| edge.from.category.is_adjacent(edge.to.category)
                    && edge.from.category < edge.to.category));
        }
    }

    #[test]
    fn isolated_entities_have_no_edges() {
        let edges = build_edges(&scenario(), JoinStrategy::Scan, Visibility::default());

        assert!(!edges
            .iter()
            .any(|edge| edge.from.entity == "Carol" || edge.to.entity == "Carol"));
    }

    #[test]
    fn rebuilding_gives_identical_edges() {
        let first = build_edges(&scenario(), JoinStrategy::Indexed, Visibility::default());
        let second = build_edges(&scenario(), JoinStrategy::Indexed, Visibility::default());
        let scanned = build_edges(&scenario(), JoinStrategy::Scan, Visibility::default());

        assert_eq!(first, second);
        assert_eq!(first, scanned);
    }
}
