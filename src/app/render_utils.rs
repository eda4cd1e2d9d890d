use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2, pos2, vec2};

use crate::data::NodeKind;

/// Variance color: a deliberate 5-bucket step function rather than a
/// gradient, so increases and decreases read at a glance. Boundaries
/// are exclusive on the high side (exactly 10 is the orange bucket).
pub fn variance_color(variance: f64) -> Color32 {
    if variance > 10.0 {
        Color32::from_rgb(239, 68, 68)
    } else if variance > 5.0 {
        Color32::from_rgb(249, 115, 22)
    } else if variance > 0.0 {
        Color32::from_rgb(234, 179, 8)
    } else if variance > -5.0 {
        Color32::from_rgb(96, 165, 250)
    } else {
        Color32::from_rgb(59, 130, 246)
    }
}

/// Render radius in content units: half the kind's base size, scaled
/// mildly by variance magnitude and capped at 1.5x.
pub fn node_radius(kind: NodeKind, variance: f64) -> f32 {
    let scale = 1.0 + (variance.abs() / 40.0).min(0.5) as f32;
    kind.base_size() * scale / 2.0
}

/// Deeper edges fade out and thin down so the periphery stays readable.
pub fn edge_opacity(level: usize) -> f32 {
    (0.45 - level as f32 * 0.05).max(0.12)
}

pub fn edge_width(level: usize) -> f32 {
    (2.8 - level as f32 * 0.3).max(1.0)
}

pub fn edge_label_size(level: usize) -> f32 {
    (11.0 - level as f32 * 0.6).max(7.0)
}

pub fn node_stroke_width(level: usize) -> f32 {
    (3.0 - level as f32 * 0.2).max(1.5)
}

pub fn circle_visible(rect: Rect, center: Pos2, radius: f32) -> bool {
    rect.expand(radius).contains(center)
}

/// Point on a circle's boundary along the line toward `toward`.
pub fn clip_to_circle(center: Pos2, radius: f32, toward: Pos2) -> Pos2 {
    let delta = toward - center;
    let length = delta.length();
    if length < f32::EPSILON {
        return center;
    }
    center + delta * (radius / length)
}

/// Intersection of the segment center->toward with an axis-aligned
/// rectangle boundary of the given half extents around `center`.
pub fn clip_to_rect(center: Pos2, half: Vec2, toward: Pos2) -> Pos2 {
    let delta = toward - center;
    let scale_x = half.x / delta.x.abs().max(0.001);
    let scale_y = half.y / delta.y.abs().max(0.001);
    let scale = scale_x.min(scale_y);
    center + delta * scale
}

/// Filled triangular arrowhead with its tip at `tip`, pointing away
/// from `from`.
pub fn draw_arrowhead(painter: &Painter, tip: Pos2, from: Pos2, length: f32, color: Color32) {
    let angle = (tip.y - from.y).atan2(tip.x - from.x);
    let wing = std::f32::consts::PI / 7.0;
    let left = pos2(
        tip.x - length * (angle - wing).cos(),
        tip.y - length * (angle - wing).sin(),
    );
    let right = pos2(
        tip.x - length * (angle + wing).cos(),
        tip.y - length * (angle + wing).sin(),
    );
    painter.add(eframe::egui::Shape::convex_polygon(
        vec![tip, left, right],
        color,
        Stroke::NONE,
    ));
}

pub fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

/// Subtle reference grid behind the graph, tracking pan and zoom.
pub fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(250, 251, 252));

    let step = (56.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + pan;
    let grid = Stroke::new(1.0, Color32::from_rgba_unmultiplied(148, 163, 184, 40));

    let mut x = origin.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([pos2(x, rect.top()), pos2(x, rect.bottom())], grid);
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], grid);
        y += step;
    }
}

/// Per-kind palette for the force-directed view: background, border,
/// text. Keyed on the wire type string with a neutral fallback.
pub fn force_palette(kind: &str) -> (Color32, Color32, Color32) {
    match kind {
        "root" | "product" => (
            Color32::from_rgb(219, 234, 254),
            Color32::from_rgb(30, 64, 175),
            Color32::from_rgb(30, 58, 95),
        ),
        "element" | "cost_element" => (
            Color32::from_rgb(254, 243, 199),
            Color32::from_rgb(217, 119, 6),
            Color32::from_rgb(120, 53, 15),
        ),
        "driver" | "sub_var" => (
            Color32::from_rgb(237, 233, 254),
            Color32::from_rgb(124, 58, 237),
            Color32::from_rgb(76, 29, 149),
        ),
        "detail" => (
            Color32::from_rgb(207, 250, 254),
            Color32::from_rgb(8, 145, 178),
            Color32::from_rgb(22, 78, 99),
        ),
        "micro" | "event" => (
            Color32::from_rgb(254, 226, 226),
            Color32::from_rgb(220, 38, 38),
            Color32::from_rgb(127, 29, 29),
        ),
        "sub_detail" | "spread" => (
            Color32::from_rgb(252, 231, 243),
            Color32::from_rgb(219, 39, 119),
            Color32::from_rgb(131, 24, 67),
        ),
        _ => (
            Color32::from_rgb(241, 245, 249),
            Color32::from_rgb(71, 85, 105),
            Color32::from_rgb(30, 41, 59),
        ),
    }
}

/// Per-relation edge color in the force-directed view.
pub fn force_link_color(label: Option<&str>) -> Color32 {
    match label {
        Some("비용분해") => Color32::from_rgb(217, 119, 6),
        Some("분해") => Color32::from_rgb(124, 58, 237),
        Some("원인") => Color32::from_rgb(8, 145, 178),
        Some("근거") => Color32::from_rgb(220, 38, 38),
        Some("파급(SPREADS_TO)") => Color32::from_rgb(219, 39, 119),
        _ => Color32::from_rgb(148, 163, 184),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variance_buckets_match_the_step_boundaries() {
        let strong_increase = variance_color(23.0);
        let orange = variance_color(7.0);
        let yellow = variance_color(2.0);
        let light_blue = variance_color(-3.0);
        let blue = variance_color(-8.0);

        assert_eq!(strong_increase, Color32::from_rgb(239, 68, 68));
        assert_eq!(orange, Color32::from_rgb(249, 115, 22));
        assert_eq!(yellow, Color32::from_rgb(234, 179, 8));
        assert_eq!(light_blue, Color32::from_rgb(96, 165, 250));
        assert_eq!(blue, Color32::from_rgb(59, 130, 246));

        // Exactly 10 is not ">10"; exactly 0 and -5 fall downward too.
        assert_eq!(variance_color(10.0), orange);
        assert_eq!(variance_color(5.0), yellow);
        assert_eq!(variance_color(0.0), light_blue);
        assert_eq!(variance_color(-5.0), blue);
    }

    #[test]
    fn node_radius_caps_at_one_and_a_half_base() {
        let base = NodeKind::Driver.base_size();
        assert_eq!(node_radius(NodeKind::Driver, 0.0), base / 2.0);
        assert_eq!(node_radius(NodeKind::Driver, 20.0), base * 1.5 / 2.0);
        assert_eq!(node_radius(NodeKind::Driver, 1000.0), base * 1.5 / 2.0);
        // Magnitude, not sign.
        assert_eq!(
            node_radius(NodeKind::Driver, -20.0),
            node_radius(NodeKind::Driver, 20.0)
        );
    }

    #[test]
    fn edge_styles_decay_with_depth_down_to_their_floors() {
        assert!(edge_opacity(1) > edge_opacity(4));
        assert_eq!(edge_opacity(30), 0.12);
        assert!(edge_width(1) > edge_width(4));
        assert_eq!(edge_width(30), 1.0);
        assert_eq!(edge_label_size(30), 7.0);
        assert_eq!(node_stroke_width(30), 1.5);
    }

    #[test]
    fn circle_clip_lands_on_the_boundary() {
        let point = clip_to_circle(pos2(0.0, 0.0), 10.0, pos2(100.0, 0.0));
        assert!((point - pos2(10.0, 0.0)).length() < 1e-4);
        // Degenerate direction stays put.
        assert_eq!(
            clip_to_circle(pos2(3.0, 4.0), 10.0, pos2(3.0, 4.0)),
            pos2(3.0, 4.0)
        );
    }

    #[test]
    fn rect_clip_picks_the_nearer_face() {
        let half = vec2(10.0, 5.0);
        let east = clip_to_rect(pos2(0.0, 0.0), half, pos2(100.0, 0.0));
        assert!((east - pos2(10.0, 0.0)).length() < 0.1);

        let south = clip_to_rect(pos2(0.0, 0.0), half, pos2(0.0, 100.0));
        assert!((south - pos2(0.0, 5.0)).length() < 0.1);

        // 45 degrees: the shorter half extent wins.
        let corner = clip_to_rect(pos2(0.0, 0.0), half, pos2(100.0, 100.0));
        assert!((corner - pos2(5.0, 5.0)).length() < 0.1);
    }
}
