use glam::Vec3;

/// A high-level action produced by whatever input device is attached.
///
/// The core consumes actions, never raw events, so keyboard, pointer and
/// scripted input all drive the same state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Set the avatar's movement per second.
    Move(Vec3),
    /// Set the heading, in degrees about +Y.
    Turn(f32),
    /// Place the camera.
    SetCamera(Vec3),
    /// Pointer pressed at window pixel coordinates (origin top-left).
    PointerDown { x: f32, y: f32 },
    /// Pointer released; clears the pending pick.
    PointerUp,
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}
