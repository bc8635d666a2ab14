use egui::Pos2;

use crate::object_table::ObjectId;
use crate::transform;
use crate::widgets::Corner;

/// The gesture in progress between pointer press and release.
///
/// Each variant carries what the gesture needs to turn the next pointer
/// position into a document change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress; waiting for the next press.
    #[default]
    Idle,
    /// Moving an object 1:1 with the pointer.
    Dragging {
        id: ObjectId,
        /// Screen position at the previous tick.
        last_pointer: Pos2,
    },
    /// Scaling an object from one of its corner handles.
    ZoomingFromCorner {
        id: ObjectId,
        corner: Corner,
        start_pointer: Pos2,
        /// Image scale or font size when the handle was grabbed.
        start_level: f32,
        /// Screen position of the object's top-left corner at the start.
        start_screen_pos: Pos2,
        /// Opposite bounding-box corner; stays fixed on screen.
        anchor: Pos2,
    },
    /// Turning an object around its center to follow the pointer.
    Rotating {
        id: ObjectId,
        center: Pos2,
        /// Pointer angle (radians) seen from `center` at the previous tick.
        last_angle: f32,
    },
    /// Stamping the eraser into the selected image.
    Erasing { id: ObjectId },
    /// Moving the grid; objects follow because they live in grid space.
    Panning { last_pointer: Pos2 },
}

impl InteractionState {
    /// The object the gesture acts on, if any.
    pub fn target(&self) -> Option<ObjectId> {
        match *self {
            InteractionState::Dragging { id, .. }
            | InteractionState::ZoomingFromCorner { id, .. }
            | InteractionState::Rotating { id, .. }
            | InteractionState::Erasing { id } => Some(id),
            InteractionState::Idle | InteractionState::Panning { .. } => None,
        }
    }

    /// Moves the screen-space points the gesture remembers along with a grid
    /// zoom of `factor` about `anchor`, so the gesture carries on where the
    /// object now is. `pointer` is where the pointer is now.
    pub fn follow_grid_zoom(&mut self, anchor: Pos2, factor: f32, pointer: Pos2) {
        match self {
            InteractionState::ZoomingFromCorner {
                start_level,
                start_screen_pos,
                anchor: fixed_corner,
                ..
            } => {
                *start_level *= factor;
                *start_screen_pos = transform::scale_about(*start_screen_pos, anchor, factor);
                *fixed_corner = transform::scale_about(*fixed_corner, anchor, factor);
            }
            InteractionState::Rotating {
                center, last_angle, ..
            } => {
                *center = transform::scale_about(*center, anchor, factor);
                *last_angle = transform::pointer_angle(*center, pointer);
            }
            InteractionState::Idle
            | InteractionState::Dragging { .. }
            | InteractionState::Erasing { .. }
            | InteractionState::Panning { .. } => {}
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Dragging { .. } => "dragging",
            InteractionState::ZoomingFromCorner { .. } => "zooming",
            InteractionState::Rotating { .. } => "rotating",
            InteractionState::Erasing { .. } => "erasing",
            InteractionState::Panning { .. } => "panning",
        }
    }
}
