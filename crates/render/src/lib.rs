//! Rendering adapter: renderer-agnostic interface.
//!
//! Turns a placed, bounded scene tree into flat, upload-ready arrays plus
//! per-frame uniforms. No GPU API is touched here; a backend implements
//! [`Renderer`] or consumes [`Frame`] directly.
//!
//! # Invariants
//! - Renderers never mutate the scene.
//! - Model indices follow pre-order over renderable models; each index owns
//!   one contiguous vertex range with no gaps or overlaps.
//! - Matrices are column-major.

mod flatten;
mod renderer;
mod uniforms;
mod view;

pub use flatten::{DrawBuffers, FlattenPlan, flatten};
pub use renderer::{BufferRenderer, DebugTextRenderer, Frame, Renderer};
pub use uniforms::FrameUniforms;
pub use view::RenderView;

pub fn crate_info() -> &'static str {
    "cubescene-render v0.1.0"
}
