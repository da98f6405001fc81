use std::f32::consts::TAU;

use cubescene_common::Trs;
use cubescene_tree::Tree;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::Model;

/// How a node moves, fixed when the scene is built.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationRole {
    #[default]
    Static,
    /// Oscillates about the x axis through the pivot.
    Swing {
        amplitude_deg: f32,
        frequency_hz: f32,
        /// Radians; limbs on opposite sides differ by pi.
        phase_offset: f32,
    },
    /// Oscillates along y.
    Bob { amplitude: f32, frequency_hz: f32 },
    /// Constant rotation about y.
    Spin { deg_per_sec: f32 },
    /// Oscillates about the z axis.
    Sway { amplitude_deg: f32, frequency_hz: f32 },
    /// Follows the avatar input: heading and accumulated movement.
    Walker,
}

/// Everything animation reads besides the definition tree.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationParams {
    /// Simulated seconds since tick 0.
    pub phase_seconds: f32,
    pub turn_deg: f32,
    pub walker_offset: Vec3,
}

impl AnimationRole {
    /// The animated transform. Absolute in `params`, so the result never
    /// depends on previous ticks.
    pub fn apply(&self, trs: Trs, params: &AnimationParams) -> Trs {
        let t = params.phase_seconds;
        let wave = |frequency_hz: f32, offset: f32| (TAU * frequency_hz * t + offset).sin();
        let mut out = trs;
        match *self {
            Self::Static => {}
            Self::Swing {
                amplitude_deg,
                frequency_hz,
                phase_offset,
            } => out.rotation_deg.x += amplitude_deg * wave(frequency_hz, phase_offset),
            Self::Bob {
                amplitude,
                frequency_hz,
            } => out.translation.y += amplitude * wave(frequency_hz, 0.0),
            Self::Spin { deg_per_sec } => {
                out.rotation_deg.y = (out.rotation_deg.y + deg_per_sec * t).rem_euclid(360.0)
            }
            Self::Sway {
                amplitude_deg,
                frequency_hz,
            } => out.rotation_deg.z += amplitude_deg * wave(frequency_hz, 0.0),
            Self::Walker => {
                out.rotation_deg.y += params.turn_deg;
                out.translation += params.walker_offset;
            }
        }
        out
    }
}

/// A new tree with every node's TRS animated for `params`. The definition
/// tree is left untouched; `Static` nodes come through unchanged.
pub fn animate(definition: &Tree<Model>, params: &AnimationParams) -> Tree<Model> {
    definition.map(|model| {
        let mut model = model.clone();
        model.trs = model.role.apply(model.trs, params);
        model
    })
}
