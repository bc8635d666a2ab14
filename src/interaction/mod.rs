//! Pointer and keyboard handling for the canvas.
//!
//! [`InteractionController`] owns an explicit [`InteractionState`] and steps
//! it once per frame from a [`crate::input::FrameInput`].

mod controller;
mod state;

pub use controller::InteractionController;
pub use state::InteractionState;
