//! Coordinate math shared by every part of the canvas.
//!
//! Three spaces are involved:
//! - *screen space*: pixel coordinates of the viewport, y pointing down;
//! - *grid space*: the infinite world the objects live in, mapped to the
//!   screen by a [`GridView`] (`screen = grid * scale + offset`);
//! - *local space*: an object's own unrotated pixel grid, see [`crate::eraser`].
//!
//! Everything here is stateless apart from the plain-data [`GridView`].

use std::f32::consts::{PI, TAU};

use egui::{Pos2, Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

pub const MIN_GRID_SCALE: f32 = 0.1;
pub const MAX_GRID_SCALE: f32 = 10.0;

/// Pan/zoom state of the whole canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridView {
    /// Screen position of the grid origin.
    pub offset: Vec2,
    /// Screen pixels per grid unit.
    pub scale: f32,
}

impl Default for GridView {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl GridView {
    pub fn new(offset: Vec2, scale: f32) -> Self {
        Self {
            offset,
            scale: scale.clamp(MIN_GRID_SCALE, MAX_GRID_SCALE),
        }
    }

    pub fn screen_to_grid(&self, screen: Pos2) -> Pos2 {
        screen_to_grid(screen, self.offset, self.scale)
    }

    pub fn grid_to_screen(&self, grid: Pos2) -> Pos2 {
        grid_to_screen(grid, self.offset, self.scale)
    }

    /// Converts a screen-space displacement (e.g. a drag delta) to grid units.
    pub fn screen_delta_to_grid(&self, delta: Vec2) -> Vec2 {
        delta / self.scale
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Range of zoom factors that keeps the grid scale within its limits.
    pub fn factor_bounds(&self) -> (f32, f32) {
        (MIN_GRID_SCALE / self.scale, MAX_GRID_SCALE / self.scale)
    }

    /// Scales the grid by `factor` so that the grid point under `anchor`
    /// stays under `anchor`.
    ///
    /// The caller is responsible for keeping `factor` inside
    /// [`GridView::factor_bounds`].
    pub fn zoom_about(&mut self, anchor: Pos2, factor: f32) {
        self.offset = scale_about(self.offset.to_pos2(), anchor, factor).to_vec2();
        self.scale *= factor;
    }
}

/// `(screen - offset) / scale`
pub fn screen_to_grid(screen: Pos2, offset: Vec2, scale: f32) -> Pos2 {
    ((screen - offset).to_vec2() / scale).to_pos2()
}

/// `grid * scale + offset`
pub fn grid_to_screen(grid: Pos2, offset: Vec2, scale: f32) -> Pos2 {
    (grid.to_vec2() * scale + offset).to_pos2()
}

/// Moves `point` away from (or toward) `anchor` by `factor`.
///
/// This is the single anchor-preserving zoom formula: `anchor` maps to itself
/// for any factor. Grid zoom applies it to the grid offset, corner zoom to the
/// object's top-left corner.
pub fn scale_about(point: Pos2, anchor: Pos2, factor: f32) -> Pos2 {
    anchor + (point - anchor) * factor
}

/// Rotates `point` about `center` by `degrees` (clockwise on screen, y down).
pub fn rotate_about(point: Pos2, center: Pos2, degrees: f32) -> Pos2 {
    center + rotate_vec(point - center, degrees)
}

pub fn rotate_vec(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Corners of `rect` rotated about its center, in the order
/// top-left, top-right, bottom-right, bottom-left.
pub fn rotated_corners(rect: Rect, degrees: f32) -> [Pos2; 4] {
    let center = rect.center();
    [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ]
    .map(|corner| rotate_about(corner, center, degrees))
}

/// Axis-aligned box around a set of points.
pub fn bounding_box(points: &[Pos2]) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min = points[0];
    let mut max = points[0];
    for point in &points[1..] {
        min = pos2(min.x.min(point.x), min.y.min(point.y));
        max = pos2(max.x.max(point.x), max.y.max(point.y));
    }
    Rect::from_min_max(min, max)
}

/// Bounding box of `rect` after rotating it about its center.
pub fn rotated_bounding_box(rect: Rect, degrees: f32) -> Rect {
    bounding_box(&rotated_corners(rect, degrees))
}

/// Maps any angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed representation of an angle, in `(-π, π]`.
pub fn wrap_radians(radians: f32) -> f32 {
    let wrapped = (radians + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Angle of `point` as seen from `center`, in radians.
pub fn pointer_angle(center: Pos2, point: Pos2) -> f32 {
    let v = point - center;
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    const EPSILON: f32 = 1e-3;

    fn approx_pos(a: Pos2, b: Pos2) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
    }

    #[test]
    fn test_round_trip_screen_grid() {
        let view = GridView::new(vec2(-37.5, 112.25), 2.5);
        for p in [pos2(0.0, 0.0), pos2(640.0, 360.0), pos2(-20.0, 999.0), pos2(13.3, -7.7)] {
            let back = view.grid_to_screen(view.screen_to_grid(p));
            assert!(approx_pos(back, p), "{p:?} came back as {back:?}");
        }
    }

    #[test]
    fn test_grid_to_screen_formula() {
        let view = GridView::new(vec2(10.0, 20.0), 2.0);
        assert_eq!(view.grid_to_screen(pos2(5.0, 5.0)), pos2(20.0, 30.0));
        assert_eq!(view.screen_to_grid(pos2(20.0, 30.0)), pos2(5.0, 5.0));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut view = GridView::new(vec2(30.0, -15.0), 1.5);
        let anchor = pos2(200.0, 140.0);
        let grid_under_anchor = view.screen_to_grid(anchor);

        view.zoom_about(anchor, 1.8);

        assert!((view.scale - 2.7).abs() < EPSILON);
        assert!(approx_pos(view.grid_to_screen(grid_under_anchor), anchor));
    }

    #[test]
    fn test_zoom_offset_formula() {
        let mut view = GridView::default();
        view.zoom_about(pos2(50.0, 50.0), 2.0);
        assert_eq!(view.offset, vec2(-50.0, -50.0));
    }

    #[test]
    fn test_unrotated_bounding_box_matches_rect() {
        let rect = Rect::from_min_size(pos2(10.0, 20.0), vec2(100.0, 50.0));
        let bbox = rotated_bounding_box(rect, 0.0);
        assert!(approx_pos(bbox.min, rect.min));
        assert!(approx_pos(bbox.max, rect.max));
    }

    #[test]
    fn test_rotated_bounding_box_grows() {
        let rect = Rect::from_center_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let bbox = rotated_bounding_box(rect, 45.0);
        let half_diagonal = 50.0 * std::f32::consts::SQRT_2;
        assert!(approx_pos(bbox.min, pos2(-half_diagonal, -half_diagonal)));
        assert!(approx_pos(bbox.max, pos2(half_diagonal, half_diagonal)));
        assert!(bbox.width() > rect.width());
    }

    #[test]
    fn test_quarter_turn_swaps_extent() {
        let rect = Rect::from_center_size(pos2(50.0, 50.0), vec2(100.0, 40.0));
        let bbox = rotated_bounding_box(rect, 90.0);
        assert!((bbox.width() - 40.0).abs() < EPSILON);
        assert!((bbox.height() - 100.0).abs() < EPSILON);
        assert!(approx_pos(bbox.center(), rect.center()));
    }

    #[test]
    fn test_rotation_is_clockwise_on_screen() {
        let rotated = rotate_about(pos2(1.0, 0.0), Pos2::ZERO, 90.0);
        assert!(approx_pos(rotated, pos2(0.0, 1.0)));
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-30.0) - 330.0).abs() < EPSILON);
        assert!((normalize_degrees(725.0) - 5.0).abs() < EPSILON);
        let tiny = normalize_degrees(-1e-7);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_wrap_radians_takes_short_way() {
        let just_past = wrap_radians(PI + 0.1);
        assert!((just_past - (-PI + 0.1)).abs() < EPSILON);
        let back = wrap_radians(-PI - 0.1);
        assert!((back - (PI - 0.1)).abs() < EPSILON);
        assert!((wrap_radians(0.25) - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_bounding_box_of_nothing() {
        assert_eq!(bounding_box(&[]), Rect::NOTHING);
    }
}
