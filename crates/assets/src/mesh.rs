use cubescene_common::Aabb;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::AssetError;

/// Vertices per triangle for every mesh in the engine (non-indexed lists).
pub const VERTICES_PER_TRIANGLE: usize = 3;

/// Vertex count of [`unit_cube`]: 6 faces, 2 triangles each.
pub const CUBE_VERTICES: usize = 36;

/// Vertices per cube face.
pub const CUBE_VERTICES_PER_FACE: usize = 6;

/// Static, already-parsed triangle geometry.
///
/// Positions are `vec4` with `w = 1`, normals `vec4` with `w = 0`, one entry
/// per vertex of a non-indexed triangle list. The local bounding box is
/// computed once at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeshData", into = "MeshData")]
pub struct Mesh {
    name: String,
    positions: Vec<[f32; 4]>,
    normals: Vec<[f32; 4]>,
    bounds: Aabb,
}

/// Serialized form of a mesh; validated through [`Mesh::new`] on load.
#[derive(Serialize, Deserialize)]
struct MeshData {
    name: String,
    positions: Vec<[f32; 4]>,
    normals: Vec<[f32; 4]>,
}

impl TryFrom<MeshData> for Mesh {
    type Error = AssetError;

    fn try_from(data: MeshData) -> Result<Self, Self::Error> {
        Self::new(data.name, data.positions, data.normals)
    }
}

impl From<Mesh> for MeshData {
    fn from(mesh: Mesh) -> Self {
        Self {
            name: mesh.name,
            positions: mesh.positions,
            normals: mesh.normals,
        }
    }
}

impl Mesh {
    pub fn new(
        name: impl Into<String>,
        positions: Vec<[f32; 4]>,
        normals: Vec<[f32; 4]>,
    ) -> Result<Self, AssetError> {
        let name = name.into();
        let malformed = |reason: String| AssetError::MalformedMesh {
            name: name.clone(),
            reason,
        };

        if positions.len() != normals.len() {
            return Err(malformed(format!(
                "{} positions but {} normals",
                positions.len(),
                normals.len()
            )));
        }
        if positions.len() % VERTICES_PER_TRIANGLE != 0 {
            return Err(malformed(format!(
                "{} vertices do not form whole triangles",
                positions.len()
            )));
        }
        let bounds = Aabb::from_points(positions.iter().map(|p| Vec3::new(p[0], p[1], p[2])))
            .ok_or_else(|| malformed("no vertices".into()))?;

        Ok(Self {
            name,
            positions,
            normals,
            bounds,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[[f32; 4]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 4]] {
        &self.normals
    }

    /// Number of vertices (not floats).
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / VERTICES_PER_TRIANGLE
    }

    /// Extents of the geometry in its own local space.
    pub fn local_bounds(&self) -> Aabb {
        self.bounds
    }
}

/// The unit cube centered on the origin, spanning [-0.5, 0.5] on each axis.
///
/// Faces come in the order front (+z), back (-z), left (-x), right (+x),
/// top (+y), bottom (-y); per-face materials rely on that order.
pub fn unit_cube() -> Mesh {
    const H: f32 = 0.5;
    #[rustfmt::skip]
    let corners: [[[f32; 3]; 6]; 6] = [
        // front
        [[-H, -H,  H], [ H, -H,  H], [ H,  H,  H], [-H, -H,  H], [ H,  H,  H], [-H,  H,  H]],
        // back
        [[ H, -H, -H], [-H, -H, -H], [-H,  H, -H], [ H, -H, -H], [-H,  H, -H], [ H,  H, -H]],
        // left
        [[-H, -H, -H], [-H, -H,  H], [-H,  H,  H], [-H, -H, -H], [-H,  H,  H], [-H,  H, -H]],
        // right
        [[ H, -H,  H], [ H, -H, -H], [ H,  H, -H], [ H, -H,  H], [ H,  H, -H], [ H,  H,  H]],
        // top
        [[-H,  H,  H], [ H,  H,  H], [ H,  H, -H], [-H,  H,  H], [-H,  H, -H], [ H,  H, -H]],
        // bottom
        [[-H, -H, -H], [ H, -H,  H], [ H, -H, -H], [-H, -H, -H], [-H, -H,  H], [ H, -H,  H]],
    ];
    let face_normals: [[f32; 4]; 6] = [
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
        [-1.0, 0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, -1.0, 0.0, 0.0],
    ];

    let mut positions = Vec::with_capacity(CUBE_VERTICES);
    let mut normals = Vec::with_capacity(CUBE_VERTICES);
    for (face, normal) in corners.iter().zip(face_normals) {
        for [x, y, z] in face {
            positions.push([*x, *y, *z, 1.0]);
            normals.push(normal);
        }
    }

    Mesh {
        name: "unit-cube".into(),
        positions,
        normals,
        bounds: Aabb::UNIT,
    }
}
