use cubescene_common::InputSnapshot;
use glam::Mat4;

use crate::{Action, InputError, Viewport, screen_to_ndc, unproject_with};

/// Accumulates actions into the latest [`InputSnapshot`].
///
/// Every field is last-value-wins: applying `Turn(10)` then `Turn(20)`
/// leaves 20, not 30. The simulation only ever sees the newest snapshot.
#[derive(Debug, Clone)]
pub struct InputState {
    snapshot: InputSnapshot,
    viewport: Viewport,
    view_projection: Mat4,
}

impl InputState {
    pub fn new(viewport: Viewport, view_projection: Mat4) -> Self {
        Self {
            snapshot: InputSnapshot::default(),
            viewport,
            view_projection,
        }
    }

    pub fn snapshot(&self) -> InputSnapshot {
        self.snapshot
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Track window resizes and camera changes so pointer rays match what
    /// is on screen.
    pub fn set_view(&mut self, viewport: Viewport, view_projection: Mat4) {
        self.viewport = viewport;
        self.view_projection = view_projection;
    }

    /// Fold one action into the snapshot. On error the snapshot is left
    /// untouched.
    pub fn apply(&mut self, action: Action) -> Result<InputSnapshot, InputError> {
        match action {
            Action::Move(movement) => self.snapshot.movement = movement,
            Action::Turn(deg) => self.snapshot.turn_deg = deg,
            Action::SetCamera(position) => self.snapshot.camera_position = position,
            Action::PointerDown { x, y } => {
                let ndc = screen_to_ndc(x, y, &self.viewport);
                let ray = unproject_with(ndc, &self.view_projection)?;
                tracing::debug!(x, y, ?ray, "pointer ray");
                self.snapshot.pick_ray = Some(ray);
            }
            Action::PointerUp => self.snapshot.pick_ray = None,
            Action::Noop => {}
        }
        Ok(self.snapshot)
    }

    /// Apply actions in order, stopping at the first failure.
    pub fn apply_all(
        &mut self,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<InputSnapshot, InputError> {
        for action in actions {
            self.apply(action)?;
        }
        Ok(self.snapshot)
    }
}
