//! Static geometry and materials.
//!
//! Meshes arrive already parsed: flat `vec4` position and normal lists for
//! non-indexed triangles. Materials are per-vertex base colors aligned with
//! a mesh's vertex order. The registry is content-addressed and can be
//! persisted to disk as JSON for inspection.
//!
//! # Invariants
//! - A `Mesh` always has as many normals as positions, a whole number of
//!   triangles, and at least one vertex; deserialization revalidates.
//! - Registering identical content twice yields the same `AssetId`.

mod material;
mod mesh;
mod store;

pub use material::{Material, Rgba, palette, rgb, rgba};
pub use mesh::{CUBE_VERTICES, CUBE_VERTICES_PER_FACE, Mesh, VERTICES_PER_TRIANGLE, unit_cube};
pub use store::{Asset, AssetId, AssetStore};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("asset not found: {0:?}")]
    NotFound(AssetId),
    #[error("no asset named {0:?}")]
    UnknownName(String),
    #[error("malformed mesh {name:?}: {reason}")]
    MalformedMesh { name: String, reason: String },
}

pub fn crate_info() -> &'static str {
    "cubescene-assets v0.1.0"
}
