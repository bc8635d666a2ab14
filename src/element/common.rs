use egui::{Pos2, Vec2};

// Common constants for all element types
pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 5.0;
pub const MIN_TEXT_SIZE: f32 = 5.0;
pub const MAX_TEXT_SIZE: f32 = 1000.0;
pub const MIN_ERASER_RADIUS: u32 = 1;
pub const MAX_ERASER_RADIUS: u32 = 50;
pub const DEFAULT_ERASER_RADIUS: u32 = 5;
pub const MAX_OUTLINE_WIDTH: f32 = 5.0;

/// Selection box padding around text, as a fraction of the font size.
pub const TEXT_PADDING_RATIO: f32 = 0.25;

/// Font size text is measured at; other sizes scale linearly from it.
pub const MEASURE_REFERENCE_SIZE: f32 = 100.0;

/// Default share of the remaining distance covered per eased frame.
pub const DEFAULT_EASING: f32 = 0.1;

/// Below this distance (grid units) easing snaps onto the target.
pub const EASING_SNAP: f32 = 0.01;

/// Where an object sits and how it is transformed.
///
/// `position` and `target_position` are in grid space and name the top-left
/// corner of the unrotated rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Pos2,
    pub target_position: Pos2,
    /// Degrees, kept in `[0, 360)`.
    pub rotation: f32,
    pub mirrored: bool,
}

impl Placement {
    pub fn at(position: Pos2) -> Self {
        Self {
            position,
            target_position: position,
            rotation: 0.0,
            mirrored: false,
        }
    }

    /// Moves both the displayed and the target position.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        self.target_position += delta;
    }

    /// Sets both positions, skipping the easing.
    pub fn jump_to(&mut self, position: Pos2) {
        self.position = position;
        self.target_position = position;
    }

    /// One easing step toward the target. Returns true while still moving.
    pub fn ease(&mut self, factor: f32) -> bool {
        if self.position == self.target_position {
            return false;
        }

        let remaining = self.target_position - self.position;
        if remaining.length() < EASING_SNAP {
            self.position = self.target_position;
            return false;
        }

        let factor = factor.clamp(0.0, 1.0);
        self.position = self.position + remaining * factor;
        true
    }
}

/// Bookkeeping shared by every object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectMeta {
    pub z_order: i64,
    pub selected: bool,
    /// False once the object is deleted; compaction drops it.
    pub open: bool,
}

impl ObjectMeta {
    pub fn new(z_order: i64) -> Self {
        Self {
            z_order,
            selected: false,
            open: true,
        }
    }
}

pub fn clamp_scale(scale: f32) -> f32 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

pub fn clamp_text_size(size: f32) -> f32 {
    size.clamp(MIN_TEXT_SIZE, MAX_TEXT_SIZE)
}

pub fn clamp_eraser_radius(radius: u32) -> u32 {
    radius.clamp(MIN_ERASER_RADIUS, MAX_ERASER_RADIUS)
}

pub fn clamp_outline_width(width: f32) -> f32 {
    width.clamp(0.0, MAX_OUTLINE_WIDTH)
}
