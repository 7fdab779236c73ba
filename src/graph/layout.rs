use std::collections::HashMap;

use serde::Serialize;

use crate::corpus::{Category, EntityIndex, Visibility};

use super::keys::EntityKey;

pub const CANVAS_WIDTH: f32 = 960.0;
pub const ROW_PITCH: f32 = 20.0;
/// Room above the first row for the column label.
pub const ROW_BASE_OFFSET: f32 = 10.0;
pub const CANVAS_PADDING: f32 = 40.0;
pub const COLUMN_MARGIN: f32 = 10.0;
pub const BOX_WIDTH: f32 = 150.0;
pub const BOX_HEIGHT: f32 = 15.0;
pub const LABEL_BASELINE: f32 = 12.0;
pub const LINK_Y_OFFSET: f32 = 5.0;

const FOUR_COLUMNS: [f32; 4] = [0.0, 0.28, 0.55, 0.83];
const THREE_COLUMNS: [f32; 3] = [0.0, 0.41, 0.82];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Column and row placement for every visible entity.
///
/// Columns are stored as fractions of the canvas width so the same plan can
/// be drawn at any width; rows are absolute pixels with a fixed pitch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutPlan {
    column_x: HashMap<Category, f32>,
    row_y: HashMap<Category, HashMap<String, f32>>,
    canvas_height: f32,
}

pub fn plan_layout(index: &EntityIndex, visibility: Visibility) -> LayoutPlan {
    let chain = visibility.chain();
    let fractions: &[f32] = if chain.len() == FOUR_COLUMNS.len() {
        &FOUR_COLUMNS
    } else {
        &THREE_COLUMNS
    };

    let column_x = chain
        .iter()
        .copied()
        .zip(fractions.iter().copied())
        .collect::<HashMap<_, _>>();

    let row_y = chain
        .iter()
        .map(|&category| {
            let rows = index
                .entities(category)
                .enumerate()
                .map(|(position, entity)| (entity.to_owned(), row_offset(position)))
                .collect::<HashMap<_, _>>();
            (category, rows)
        })
        .collect::<HashMap<_, _>>();

    let tallest = chain
        .iter()
        .map(|&category| index.len(category))
        .max()
        .unwrap_or(0);

    LayoutPlan {
        column_x,
        row_y,
        canvas_height: tallest as f32 * ROW_PITCH + CANVAS_PADDING,
    }
}

fn row_offset(position: usize) -> f32 {
    ROW_BASE_OFFSET + (position + 1) as f32 * ROW_PITCH
}

impl LayoutPlan {
    pub fn canvas_height(&self) -> f32 {
        self.canvas_height
    }

    pub fn column_fraction(&self, category: Category) -> Option<f32> {
        self.column_x.get(&category).copied()
    }

    pub fn column_left(&self, category: Category, width: f32) -> Option<f32> {
        self.column_fraction(category)
            .map(|fraction| width * fraction + COLUMN_MARGIN)
    }

    pub fn row_y(&self, key: &EntityKey) -> Option<f32> {
        self.row_y
            .get(&key.category)
            .and_then(|rows| rows.get(&key.entity))
            .copied()
    }

    /// Top-left corner of the entity box.
    pub fn box_origin(&self, key: &EntityKey, width: f32) -> Option<Point> {
        Some(Point {
            x: self.column_left(key.category, width)?,
            y: self.row_y(key)?,
        })
    }

    /// Where a link attaches to an entity box.
    pub fn link_anchor(&self, key: &EntityKey, side: Side, width: f32) -> Option<Point> {
        let origin = self.box_origin(key, width)?;
        let x = match side {
            Side::Left => origin.x,
            Side::Right => origin.x + BOX_WIDTH,
        };
        Some(Point {
            x,
            y: origin.y + LINK_Y_OFFSET,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::EntityMention;

    fn index() -> EntityIndex {
        EntityIndex::build(&[
            EntityMention::new("f1", "Alice", "PERSON"),
            EntityMention::new("f1", "Bob", "PERSON"),
            EntityMention::new("f1", "Paris", "GPE"),
            EntityMention::new("f1", "2020", "DATE"),
            EntityMention::new("f1", "met", "VERB"),
            EntityMention::new("f1", "talked", "VERB"),
            EntityMention::new("f1", "left", "VERB"),
        ])
    }

    #[test]
    fn four_visible_columns_use_four_breakpoints() {
        let plan = plan_layout(&index(), Visibility { show_what: true });

        let fractions = Category::ALL.map(|category| plan.column_fraction(category));
        assert_eq!(fractions, [Some(0.0), Some(0.28), Some(0.55), Some(0.83)]);
        assert_eq!(plan.column_left(Category::Where, CANVAS_WIDTH), Some(960.0 * 0.28 + 10.0));
    }

    #[test]
    fn three_visible_columns_use_three_breakpoints() {
        let plan = plan_layout(&index(), Visibility { show_what: false });

        let fractions = Category::ALL.map(|category| plan.column_fraction(category));
        assert_eq!(fractions, [Some(0.0), Some(0.41), Some(0.82), None]);
        assert_eq!(plan.row_y(&EntityKey::new(Category::What, "met")), None);
    }

    #[test]
    fn rows_use_a_fixed_one_indexed_pitch() {
        let plan = plan_layout(&index(), Visibility::default());

        assert_eq!(plan.row_y(&EntityKey::new(Category::Who, "Alice")), Some(30.0));
        assert_eq!(plan.row_y(&EntityKey::new(Category::Who, "Bob")), Some(50.0));
        assert_eq!(plan.row_y(&EntityKey::new(Category::What, "left")), Some(70.0));
        assert_eq!(plan.row_y(&EntityKey::new(Category::Who, "Nobody")), None);
    }

    #[test]
    fn canvas_height_counts_only_visible_columns() {
        let index = index();

        assert_eq!(plan_layout(&index, Visibility { show_what: true }).canvas_height(), 100.0);
        assert_eq!(plan_layout(&index, Visibility { show_what: false }).canvas_height(), 80.0);
    }

    #[test]
    fn link_anchors_align_with_box_rows() {
        let plan = plan_layout(&index(), Visibility::default());
        let alice = EntityKey::new(Category::Who, "Alice");

        let origin = plan.box_origin(&alice, CANVAS_WIDTH).unwrap();
        let right = plan.link_anchor(&alice, Side::Right, CANVAS_WIDTH).unwrap();
        let left = plan.link_anchor(&alice, Side::Left, CANVAS_WIDTH).unwrap();

        assert_eq!(origin, Point { x: 10.0, y: 30.0 });
        assert_eq!(right, Point { x: 160.0, y: 35.0 });
        assert_eq!(left.y, right.y);
    }

    #[test]
    fn empty_index_still_has_label_room() {
        let plan = plan_layout(&EntityIndex::default(), Visibility::default());

        assert_eq!(plan.canvas_height(), CANVAS_PADDING);
    }
}
