use serde::{Deserialize, Serialize};

use crate::mesh::{CUBE_VERTICES, CUBE_VERTICES_PER_FACE};

/// Linear RGBA color, each channel in 0..=1.
pub type Rgba = [f32; 4];

/// Color from 0..=255 channels with alpha already in 0..=1.
pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Rgba {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

/// Opaque color from 0..=255 channels.
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    rgba(r, g, b, 1.0)
}

pub mod palette {
    use super::{Rgba, rgb};

    pub const CARROT: Rgba = rgb(243, 156, 18);
    pub const WISTERIA: Rgba = rgb(142, 68, 173);
    pub const GREEN_SEA: Rgba = rgb(22, 160, 133);
    pub const BELIZE_HOLE: Rgba = rgb(41, 128, 185);
    pub const SUNFLOWER: Rgba = rgb(241, 196, 15);
    pub const POMEGRANATE: Rgba = rgb(192, 57, 43);
    pub const NEPHRITIS: Rgba = rgb(39, 174, 96);
    pub const CONCRETE: Rgba = rgb(149, 165, 166);
    pub const BLACK: Rgba = rgb(0, 0, 0);

    /// Substituted for missing per-vertex colors at flatten time.
    pub const NEUTRAL: Rgba = rgb(204, 204, 204);
}

/// Per-vertex base colors, aligned with the vertex order of the mesh they
/// are drawn with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub base_color: Vec<Rgba>,
}

impl Material {
    /// One color for every vertex.
    pub fn solid(name: impl Into<String>, color: Rgba, vertex_count: usize) -> Self {
        Self {
            name: name.into(),
            base_color: vec![color; vertex_count],
        }
    }

    /// One color per face, in cube face order (front, back, left, right,
    /// top, bottom).
    pub fn per_face(name: impl Into<String>, faces: [Rgba; 6], vertices_per_face: usize) -> Self {
        Self {
            name: name.into(),
            base_color: faces
                .iter()
                .flat_map(|c| std::iter::repeat_n(*c, vertices_per_face))
                .collect(),
        }
    }

    /// A material with no colors, for nodes that are never drawn.
    pub fn none() -> Self {
        Self {
            name: "none".into(),
            base_color: Vec::new(),
        }
    }

    pub fn debug_faces() -> Self {
        use palette::*;
        Self::per_face(
            "debug-faces",
            [CARROT, WISTERIA, GREEN_SEA, BELIZE_HOLE, SUNFLOWER, POMEGRANATE],
            CUBE_VERTICES_PER_FACE,
        )
    }

    /// Concrete sides and bottom, grass on top.
    pub fn terrain() -> Self {
        use palette::*;
        Self::per_face(
            "terrain",
            [CONCRETE, CONCRETE, CONCRETE, CONCRETE, NEPHRITIS, CONCRETE],
            CUBE_VERTICES_PER_FACE,
        )
    }

    pub fn carrot_body() -> Self {
        Self::solid("carrot-body", palette::CARROT, CUBE_VERTICES)
    }

    pub fn carrot_leaves() -> Self {
        Self::solid("carrot-leaves", palette::NEPHRITIS, CUBE_VERTICES)
    }

    pub fn black() -> Self {
        Self::solid("black", palette::BLACK, CUBE_VERTICES)
    }

    pub fn len(&self) -> usize {
        self.base_color.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_color.is_empty()
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::solid("default", palette::NEUTRAL, CUBE_VERTICES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_scales_channels() {
        assert_eq!(rgba(255, 0, 51, 0.5), [1.0, 0.0, 0.2, 0.5]);
        assert_eq!(rgb(0, 0, 0), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn palettes_cover_the_unit_cube() {
        for m in [
            Material::debug_faces(),
            Material::terrain(),
            Material::carrot_body(),
            Material::carrot_leaves(),
            Material::black(),
            Material::default(),
        ] {
            assert_eq!(m.len(), CUBE_VERTICES, "{}", m.name);
        }
    }

    #[test]
    fn per_face_keeps_face_order() {
        let m = Material::terrain();
        let top = &m.base_color[4 * CUBE_VERTICES_PER_FACE..5 * CUBE_VERTICES_PER_FACE];
        assert!(top.iter().all(|c| *c == palette::NEPHRITIS));
        assert_eq!(m.base_color[0], palette::CONCRETE);
        assert_eq!(m.base_color[CUBE_VERTICES - 1], palette::CONCRETE);
    }

    #[test]
    fn debug_faces_front_is_carrot() {
        let m = Material::debug_faces();
        assert_eq!(m.base_color[0], palette::CARROT);
        assert_eq!(m.base_color[CUBE_VERTICES - 1], palette::POMEGRANATE);
    }

    #[test]
    fn none_is_empty() {
        assert!(Material::none().is_empty());
    }
}
