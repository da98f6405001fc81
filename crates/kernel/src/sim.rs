use std::time::Duration;

use cubescene_common::{Hit, InputSnapshot, Ray};
use cubescene_tree::Tree;
use glam::{Mat4, Vec3};

use crate::{
    AnimationParams, Model, SimConfig, animate, closest, update_world, with_bounds,
    with_cube_counts,
};

/// Fixed-step driver for one scene.
///
/// Wall-clock time fed to [`Simulation::advance`] accumulates as lag; every
/// whole `fixed_step` of lag runs one tick that rebuilds the scene from the
/// immutable definition tree. The result depends only on the number of ticks
/// and the inputs seen at each tick, never on how the elapsed time was
/// sliced into frames.
#[derive(Debug, Clone)]
pub struct Simulation {
    definition: Tree<Model>,
    current: Tree<Model>,
    config: SimConfig,
    input: InputSnapshot,
    walker_offset: Vec3,
    tick: u64,
    lag: Duration,
}

impl Simulation {
    /// Tick-0 state: the definition animated at phase 0, placed and bounded.
    pub fn new(definition: Tree<Model>, config: SimConfig) -> Self {
        let mut sim = Self {
            current: definition.clone(),
            definition,
            config,
            input: InputSnapshot::default(),
            walker_offset: Vec3::ZERO,
            tick: 0,
            lag: Duration::ZERO,
        };
        sim.current = sim.rebuild();
        sim
    }

    /// Feed elapsed wall-clock time and run every tick that fits. Returns
    /// the number of ticks run.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let step = self.config.fixed_step;
        if step.is_zero() {
            tracing::warn!("fixed step is zero, not advancing");
            return 0;
        }

        self.lag += elapsed;
        let mut ticks = 0u32;
        while self.lag >= step {
            if self.config.max_ticks_per_advance.is_some_and(|max| ticks >= max) {
                tracing::warn!(dropped = ?self.lag, ticks, "tick budget exhausted, dropping lag");
                self.lag = Duration::ZERO;
                break;
            }
            self.step();
            self.lag -= step;
            ticks += 1;
        }
        tracing::trace!(ticks, lag = ?self.lag, "advanced");
        ticks
    }

    /// Run exactly one tick.
    pub fn step(&mut self) {
        let _span = tracing::info_span!("sim_step", tick = self.tick + 1).entered();
        self.tick += 1;
        self.walker_offset += self.input.movement * self.config.fixed_step.as_secs_f32();
        self.current = self.rebuild();
        tracing::debug!(models = self.current.len(), "tick complete");
    }

    /// Latest input wins; it takes effect on the next tick.
    pub fn set_input(&mut self, input: &InputSnapshot) {
        self.input = *input;
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    /// The scene as of the last tick, with world matrices, boxes and cube
    /// counts filled in.
    pub fn tree(&self) -> &Tree<Model> {
        &self.current
    }

    pub fn definition(&self) -> &Tree<Model> {
        &self.definition
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds since tick 0.
    pub fn phase(&self) -> f32 {
        (self.tick as f64 * self.config.fixed_step.as_secs_f64()) as f32
    }

    /// Time carried over to the next `advance`.
    pub fn lag(&self) -> Duration {
        self.lag
    }

    /// Closest model under `ray` in the current scene.
    pub fn pick(&self, ray: &Ray) -> Option<Hit> {
        closest(&self.current, ray)
    }

    /// [`Simulation::pick`] with the ray from the latest input, if any.
    pub fn pick_pending(&self) -> Option<Hit> {
        self.input.pick_ray.and_then(|ray| self.pick(&ray))
    }

    /// Deterministic FNV-1a hash over tick, ids, world matrices and boxes
    /// in pre-order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        for model in self.current.iter() {
            mix(&mut h, model.id.as_str().as_bytes());
            for f in model.world.to_cols_array() {
                mix(&mut h, &f.to_le_bytes());
            }
            if let Some(aabb) = model.aabb {
                for f in aabb.min.to_array().into_iter().chain(aabb.max.to_array()) {
                    mix(&mut h, &f.to_le_bytes());
                }
            }
        }
        h
    }

    fn rebuild(&self) -> Tree<Model> {
        let params = AnimationParams {
            phase_seconds: self.phase(),
            turn_deg: self.input.turn_deg,
            walker_offset: self.walker_offset,
        };
        let animated = animate(&self.definition, &params);
        let placed = update_world(animated, Mat4::IDENTITY);
        with_cube_counts(with_bounds(placed, self.config.bounds_policy))
    }
}
