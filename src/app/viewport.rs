//! Zoom/pan state and the content-to-screen coordinate pipeline. The
//! viewport never looks at the tree; it only composes a content
//! bounding box with zoom and pan into a visible window.

use eframe::egui::{self, Pos2, Rect, Ui, Vec2, pos2, vec2};

pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 6.0;
pub const BUTTON_ZOOM_IN: f32 = 1.3;
pub const BUTTON_ZOOM_OUT: f32 = 0.7;
pub const WHEEL_ZOOM_IN: f32 = 1.12;
pub const WHEEL_ZOOM_OUT: f32 = 0.88;
pub const CONTENT_PADDING: f32 = 200.0;
/// Pointer travel in screen pixels before a gesture counts as a pan
/// instead of a click.
pub const DRAG_THRESHOLD: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub zoom: f32,
    pub pan: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * BUTTON_ZOOM_IN).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom * BUTTON_ZOOM_OUT).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn wheel(&mut self, scroll_delta: f32) {
        if scroll_delta == 0.0 {
            return;
        }
        let factor = if scroll_delta > 0.0 {
            WHEEL_ZOOM_IN
        } else {
            WHEEL_ZOOM_OUT
        };
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Restores zoom 1 / pan 0. Expansion state is someone else's job.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The content-space window currently visible: bounding box center
    /// shifted by -pan, size divided by zoom.
    pub fn window(&self, bounds: Rect) -> Rect {
        let center = bounds.center() - self.pan;
        Rect::from_center_size(center, bounds.size() / self.zoom)
    }
}

/// Axis-aligned bounding box of all positions plus padding; a fixed
/// default window when only the root (or nothing) is placed.
pub fn content_bounds<I: IntoIterator<Item = Vec2>>(positions: I) -> Rect {
    let mut count = 0usize;
    let mut min = vec2(f32::INFINITY, f32::INFINITY);
    let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for pos in positions {
        count += 1;
        min = min.min(pos);
        max = max.max(pos);
    }

    if count <= 1 {
        return Rect::from_min_size(pos2(-500.0, -500.0), vec2(1000.0, 1000.0));
    }

    Rect::from_min_max(
        pos2(min.x - CONTENT_PADDING, min.y - CONTENT_PADDING),
        pos2(max.x + CONTENT_PADDING, max.y + CONTENT_PADDING),
    )
}

/// Uniform scale mapping the visible window onto the screen rect.
pub fn window_scale(window: Rect, rect: Rect) -> f32 {
    let sx = rect.width() / window.width().max(f32::EPSILON);
    let sy = rect.height() / window.height().max(f32::EPSILON);
    sx.min(sy)
}

pub fn world_to_screen(window: Rect, rect: Rect, world: Vec2) -> Pos2 {
    let scale = window_scale(window, rect);
    rect.center() + (world - window.center().to_vec2()) * scale
}

pub fn screen_to_world(window: Rect, rect: Rect, screen: Pos2) -> Vec2 {
    let scale = window_scale(window, rect);
    window.center().to_vec2() + (screen - rect.center()) / scale
}

/// Applies one frame of wheel zoom and primary-button panning to a
/// canvas response, returning the resolved window and scale.
pub fn handle_canvas_gestures(
    viewport: &mut Viewport,
    drag: &mut DragState,
    ui: &Ui,
    rect: Rect,
    response: &egui::Response,
    bounds: Rect,
) -> (Rect, f32) {
    if response.hovered() {
        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() > f32::EPSILON {
            viewport.wheel(scroll);
        }
    }

    let scale = window_scale(viewport.window(bounds), rect);
    if response.drag_started_by(egui::PointerButton::Primary) {
        drag.begin();
    }
    if response.dragged_by(egui::PointerButton::Primary)
        && let Some(delta) = drag.update(response.drag_delta(), 1.0 / scale.max(f32::EPSILON))
    {
        viewport.pan += delta;
    }
    if response.drag_stopped() {
        drag.finish();
    }

    let window = viewport.window(bounds);
    (window, window_scale(window, rect))
}

/// Click-vs-pan disambiguation for a pointer gesture. Movement is
/// accumulated; only once it crosses [`DRAG_THRESHOLD`] does the
/// gesture start panning (and stop being a click).
#[derive(Clone, Copy, Debug, Default)]
pub struct DragState {
    pub active: bool,
    pub did_drag: bool,
    travelled: f32,
}

impl DragState {
    pub fn begin(&mut self) {
        *self = Self {
            active: true,
            ..Self::default()
        };
    }

    /// Feeds one frame of pointer movement (screen pixels). Returns the
    /// pan delta in content units once the gesture is a recognized
    /// drag, `None` while it is still a potential click.
    pub fn update(&mut self, screen_delta: Vec2, world_per_pixel: f32) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        self.travelled += screen_delta.length();
        if !self.did_drag && self.travelled > DRAG_THRESHOLD {
            self.did_drag = true;
        }
        self.did_drag.then(|| screen_delta * world_per_pixel)
    }

    pub fn finish(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_viewport_window_matches_bounds() {
        let bounds = content_bounds([vec2(-100.0, -50.0), vec2(300.0, 150.0)]);
        let vp = Viewport::default();
        let window = vp.window(bounds);
        assert_eq!(window.center(), bounds.center());
        assert_eq!(window.size(), bounds.size());
    }

    #[test]
    fn doubling_zoom_halves_the_window() {
        let bounds = content_bounds([vec2(-100.0, -100.0), vec2(100.0, 100.0)]);
        let vp = Viewport {
            zoom: 2.0,
            pan: Vec2::ZERO,
        };
        let window = vp.window(bounds);
        assert_eq!(window.center(), bounds.center());
        assert_eq!(window.width(), bounds.width() / 2.0);
        assert_eq!(window.height(), bounds.height() / 2.0);
    }

    #[test]
    fn pan_shifts_the_window_against_the_offset() {
        let bounds = content_bounds([vec2(0.0, 0.0), vec2(200.0, 200.0)]);
        let vp = Viewport {
            zoom: 1.0,
            pan: vec2(30.0, -40.0),
        };
        let window = vp.window(bounds);
        assert_eq!(
            window.center(),
            bounds.center() - vec2(30.0, -40.0)
        );
    }

    #[test]
    fn reset_is_idempotent() {
        let mut vp = Viewport {
            zoom: 3.7,
            pan: vec2(12.0, -9.0),
        };
        vp.reset();
        let once = vp;
        vp.reset();
        assert_eq!(once, vp);
        assert_eq!(vp.zoom, 1.0);
        assert_eq!(vp.pan, Vec2::ZERO);
    }

    #[test]
    fn zoom_operations_respect_the_clamp_range() {
        let mut vp = Viewport::default();
        for _ in 0..32 {
            vp.zoom_in();
        }
        assert_eq!(vp.zoom, MAX_ZOOM);
        for _ in 0..64 {
            vp.wheel(-1.0);
        }
        assert_eq!(vp.zoom, MIN_ZOOM);
    }

    #[test]
    fn degenerate_content_uses_the_default_window() {
        let bounds = content_bounds([Vec2::ZERO]);
        assert_eq!(bounds.min, pos2(-500.0, -500.0));
        assert_eq!(bounds.size(), vec2(1000.0, 1000.0));
    }

    #[test]
    fn world_screen_round_trip() {
        let window = Rect::from_min_size(pos2(-200.0, -100.0), vec2(400.0, 200.0));
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 400.0));
        let world = vec2(37.0, -12.0);
        let screen = world_to_screen(window, rect, world);
        let back = screen_to_world(window, rect, screen);
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn drag_below_threshold_stays_a_click() {
        let mut drag = DragState::default();
        drag.begin();
        assert!(drag.update(vec2(1.0, 1.0), 1.0).is_none());
        assert!(!drag.did_drag);

        // Crossing the threshold flips it into a pan for good.
        assert!(drag.update(vec2(5.0, 0.0), 2.0).is_some());
        assert!(drag.did_drag);
        let delta = drag.update(vec2(3.0, 0.0), 2.0).expect("still dragging");
        assert_eq!(delta, vec2(6.0, 0.0));
    }
}
