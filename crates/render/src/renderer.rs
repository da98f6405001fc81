use std::collections::BTreeSet;

use cubescene_common::ModelId;
use cubescene_kernel::{Model, with_cube_counts};
use cubescene_tree::Tree;

use crate::{DrawBuffers, FrameUniforms, RenderView, flatten};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a placed, bounded scene and a view, then produces
/// output. It never mutates the scene; the simulation owns it.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `scene` at animation time `phase`.
    fn render(&self, scene: &Tree<Model>, view: &RenderView, phase: f32) -> Self::Output;
}

/// Human-readable dump of the scene hierarchy.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    max_depth: Option<usize>,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Omit nodes deeper than `depth` (the root is depth 0).
    pub fn with_max_depth(depth: usize) -> Self {
        Self {
            max_depth: Some(depth),
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Tree<Model>, view: &RenderView, phase: f32) -> String {
        let links = scene.links();
        let renderable = scene.iter().filter(|m| m.renderable).count();

        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene (models={}, renderable={}, depth={}, phase={:.3}) ===\n",
            links.len(),
            renderable,
            scene.depth(),
            phase
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z, view.fov_degrees
        ));

        let mut depths = vec![0usize; links.len()];
        for (link, model) in links.iter().zip(scene.iter()) {
            let depth = link.parent.map_or(0, |p| depths[p] + 1);
            depths[link.index] = depth;
            if self.max_depth.is_some_and(|max| depth > max) {
                continue;
            }

            let p = model.world.w_axis;
            let marker = if model.renderable { '*' } else { '-' };
            out.push_str(&format!(
                "{:indent$}{marker} {} pos=({:.2}, {:.2}, {:.2}) cubes={}",
                "",
                model.id,
                p.x,
                p.y,
                p.z,
                model.cube_count,
                indent = depth * 2
            ));
            if let Some(b) = model.aabb {
                out.push_str(&format!(
                    " box=[({:.2}, {:.2}, {:.2}) .. ({:.2}, {:.2}, {:.2})]",
                    b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
                ));
            }
            out.push('\n');
        }
        out
    }
}

/// One frame of upload-ready data.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub buffers: DrawBuffers,
    pub uniforms: FrameUniforms,
}

/// Produces draw buffers and uniforms for a GPU backend.
///
/// Hidden subtrees are pruned before flattening. Returns `None` when the
/// root itself is hidden: there is nothing to draw this frame.
#[derive(Debug, Default)]
pub struct BufferRenderer {
    hidden: BTreeSet<ModelId>,
}

impl BufferRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop drawing the subtree rooted at `id`.
    pub fn hide(&mut self, id: ModelId) {
        self.hidden.insert(id);
    }

    pub fn show(&mut self, id: &ModelId) {
        self.hidden.remove(id);
    }
}

impl Renderer for BufferRenderer {
    type Output = Option<Frame>;

    fn render(&self, scene: &Tree<Model>, view: &RenderView, phase: f32) -> Option<Frame> {
        let uniforms = FrameUniforms::new(view.view_projection(), phase, view.aspect);
        if self.hidden.is_empty() {
            return Some(Frame {
                buffers: flatten(scene),
                uniforms,
            });
        }
        let Some(visible) = scene.filter(|m| !self.hidden.contains(&m.id)) else {
            tracing::debug!("scene root hidden, skipping frame");
            return None;
        };
        // Pruning leaves the surviving ancestors' counts stale
        let visible = with_cube_counts(visible);
        Some(Frame {
            buffers: flatten(&visible),
            uniforms,
        })
    }
}
