//! Input: device-independent actions folded into the latest input snapshot.
//!
//! # Invariants
//! - Input is last-value-wins; nothing is queued or replayed.
//! - Pointer rays are unprojected with the same view-projection the frame
//!   was drawn with, so picks match what is on screen.

mod action;
mod state;
mod unproject;

pub use action::Action;
pub use state::InputState;
pub use unproject::{InputError, Viewport, screen_to_ndc, unproject, unproject_with};

pub fn crate_info() -> &'static str {
    "cubescene-input v0.1.0"
}
