use std::sync::Arc;

use cubescene_assets::{Material, Mesh};
use cubescene_common::{Aabb, ModelId, Trs};
use glam::Mat4;

use crate::AnimationRole;

/// Payload of every scene-tree node.
///
/// `world`, `aabb` and `cube_count` are derived fields: they are rewritten by
/// each pipeline pass and never carried over from a previous tick. Mesh and
/// material are shared handles, so cloning a model is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub id: ModelId,
    pub mesh: Arc<Mesh>,
    pub trs: Trs,
    /// Local-to-root transform: parent world times local TRS matrix.
    pub world: Mat4,
    pub material: Arc<Material>,
    /// World-space box of the whole subtree rooted here.
    pub aabb: Option<Aabb>,
    /// Anchors are traversed and bounded but never drawn.
    pub renderable: bool,
    /// Renderable models in the subtree rooted here, this one included.
    pub cube_count: u32,
    pub role: AnimationRole,
}

impl Model {
    /// A drawable model at the parent's origin.
    pub fn new(id: impl Into<ModelId>, mesh: Arc<Mesh>, material: Arc<Material>) -> Self {
        Self {
            id: id.into(),
            mesh,
            trs: Trs::default(),
            world: Mat4::IDENTITY,
            material,
            aabb: None,
            renderable: true,
            cube_count: 1,
            role: AnimationRole::Static,
        }
    }

    /// An organizational node. It keeps a mesh so a childless anchor still
    /// has a box.
    pub fn anchor(id: impl Into<ModelId>, mesh: Arc<Mesh>) -> Self {
        Self {
            renderable: false,
            cube_count: 0,
            ..Self::new(id, mesh, Arc::new(Material::none()))
        }
    }

    pub fn with_trs(mut self, trs: Trs) -> Self {
        self.trs = trs;
        self
    }

    pub fn with_role(mut self, role: AnimationRole) -> Self {
        self.role = role;
        self
    }

    /// This node's own mesh extents under its current world matrix.
    pub fn world_bounds(&self) -> Aabb {
        self.mesh.local_bounds().transformed(&self.world)
    }

    /// 1 for a drawable model, 0 for an anchor.
    pub fn own_cube_count(&self) -> u32 {
        u32::from(self.renderable)
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }
}
