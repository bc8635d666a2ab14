use egui::{Context, Key, Pos2, Response};

/// Wheel delta egui reports for one notch of a line-based mouse wheel.
pub const POINTS_PER_WHEEL_NOTCH: f32 = 50.0;

/// Everything the canvas needs to know about one frame of input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub pointer_pos: Option<Pos2>,
    /// Primary button went down this frame
    pub pressed: bool,
    /// Primary button is held
    pub down: bool,
    /// Primary button went up this frame
    pub released: bool,
    /// The pointer is over the canvas and not over a window or toolbar on top of it
    pub over_canvas: bool,
    /// Positive when scrolling up (zoom in)
    pub wheel_notches: f32,
    pub delete: bool,
    pub undo: bool,
    pub redo: bool,
    pub duplicate: bool,
}

impl FrameInput {
    /// Samples egui input for a canvas allocated as `canvas`.
    pub fn from_egui(ctx: &Context, canvas: &Response) -> Self {
        let over_canvas = canvas.hovered();
        let keyboard_free = !ctx.wants_keyboard_input();

        ctx.input(|i| {
            let command = i.modifiers.command;
            let shift = i.modifiers.shift;

            Self {
                pointer_pos: i.pointer.latest_pos(),
                pressed: i.pointer.primary_pressed(),
                down: i.pointer.primary_down(),
                released: i.pointer.primary_released(),
                over_canvas,
                wheel_notches: if over_canvas {
                    i.raw_scroll_delta.y / POINTS_PER_WHEEL_NOTCH
                } else {
                    0.0
                },
                delete: keyboard_free && i.key_pressed(Key::Delete),
                undo: keyboard_free && command && !shift && i.key_pressed(Key::Z),
                redo: keyboard_free
                    && command
                    && ((shift && i.key_pressed(Key::Z)) || i.key_pressed(Key::Y)),
                duplicate: keyboard_free && command && i.key_pressed(Key::D),
            }
        })
    }

    /// Pointer hovering over the canvas with no button activity.
    pub fn hover(pos: Pos2) -> Self {
        Self {
            pointer_pos: Some(pos),
            over_canvas: true,
            ..Self::default()
        }
    }

    /// Primary button pressed at `pos`.
    pub fn press(pos: Pos2) -> Self {
        Self {
            pressed: true,
            down: true,
            ..Self::hover(pos)
        }
    }

    /// Primary button held while the pointer is at `pos`.
    pub fn drag(pos: Pos2) -> Self {
        Self {
            down: true,
            ..Self::hover(pos)
        }
    }

    /// Primary button released at `pos`.
    pub fn release(pos: Pos2) -> Self {
        Self {
            released: true,
            ..Self::hover(pos)
        }
    }

    pub fn wheel(pos: Pos2, notches: f32) -> Self {
        Self {
            wheel_notches: notches,
            ..Self::hover(pos)
        }
    }

    pub fn has_shortcut(&self) -> bool {
        self.delete || self.undo || self.redo || self.duplicate
    }
}
