use eframe::egui::epaint::CubicBezierShape;
use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, pos2};

use crate::corpus::Category;
use crate::graph::Emphasis;

pub(super) const SEARCH_MATCH_COLOR: Color32 = Color32::from_rgb(103, 196, 255);

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn with_opacity(color: Color32, emphasis: Emphasis) -> Color32 {
    let alpha = (color.a() as f32 * emphasis.opacity()).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub(super) fn category_color(category: Category) -> Color32 {
    match category {
        Category::Who => Color32::from_rgb(241, 146, 94),
        Category::Where => Color32::from_rgb(106, 198, 255),
        Category::When => Color32::from_rgb(246, 206, 104),
        Category::What => Color32::from_rgb(150, 214, 135),
    }
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));
}

/// Horizontal cubic link whose tangents are flat at both ends.
pub(super) fn horizontal_link(from: Pos2, to: Pos2, stroke: Stroke) -> CubicBezierShape {
    let mid_x = (from.x + to.x) * 0.5;
    CubicBezierShape::from_points_stroke(
        [from, pos2(mid_x, from.y), pos2(mid_x, to.y), to],
        false,
        Color32::TRANSPARENT,
        stroke,
    )
}
