use std::ops::Range;

use cubescene_assets::palette;
use cubescene_common::ModelId;
use cubescene_kernel::{Model, cube_count};
use cubescene_tree::Tree;

/// Buffer sizes for one flatten pass, computed before any push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlattenPlan {
    pub models: usize,
    pub vertices: usize,
}

impl FlattenPlan {
    /// Model count comes from the root's aggregated `cube_count`, so the
    /// tree must have been through `with_cube_counts`.
    pub fn of(tree: &Tree<Model>) -> Self {
        let models = tree.value().cube_count as usize;
        debug_assert_eq!(
            models,
            cube_count(tree) as usize,
            "cube counts are stale, run with_cube_counts before flattening"
        );
        let vertices = tree.reduce(0, |n, model| {
            if model.renderable { n + model.vertex_count() } else { n }
        });
        Self { models, vertices }
    }
}

/// Parallel arrays ready for upload.
///
/// Per vertex: `positions` (local space, `w = 1`), `normals` (`w = 0`),
/// `colors` (RGBA) and `model_indices`. Per model: `matrices`, `aabb_min`,
/// `aabb_max` and `ids`, all indexed by the model index. Matrices are
/// column-major (`matrices[m][col][row]`), the layout WGSL `mat4x4<f32>`
/// expects. Box corners are padded to `vec4` with `w = 0` for a 16-byte
/// array stride.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawBuffers {
    pub positions: Vec<[f32; 4]>,
    pub normals: Vec<[f32; 4]>,
    pub colors: Vec<[f32; 4]>,
    pub model_indices: Vec<u32>,
    pub matrices: Vec<[[f32; 4]; 4]>,
    pub aabb_min: Vec<[f32; 4]>,
    pub aabb_max: Vec<[f32; 4]>,
    pub ids: Vec<ModelId>,
}

impl DrawBuffers {
    pub fn with_capacity(plan: FlattenPlan) -> Self {
        Self {
            positions: Vec::with_capacity(plan.vertices),
            normals: Vec::with_capacity(plan.vertices),
            colors: Vec::with_capacity(plan.vertices),
            model_indices: Vec::with_capacity(plan.vertices),
            matrices: Vec::with_capacity(plan.models),
            aabb_min: Vec::with_capacity(plan.models),
            aabb_max: Vec::with_capacity(plan.models),
            ids: Vec::with_capacity(plan.models),
        }
    }

    pub fn model_count(&self) -> usize {
        self.ids.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Index of `id` in the per-model arrays.
    pub fn model_index(&self, id: &ModelId) -> Option<u32> {
        self.ids.iter().position(|i| i == id).map(|i| i as u32)
    }

    /// Vertices belonging to model `index`. Models occupy contiguous,
    /// ascending ranges, so this is a pair of binary searches.
    pub fn vertex_range(&self, index: u32) -> Range<usize> {
        let start = self.model_indices.partition_point(|&m| m < index);
        let end = self.model_indices.partition_point(|&m| m <= index);
        start..end
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn model_index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.model_indices)
    }

    pub fn matrix_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.matrices)
    }

    fn push_model(&mut self, model: &Model) {
        let index = self.ids.len() as u32;
        let mesh = &model.mesh;
        let colors = &model.material.base_color;
        if colors.len() != mesh.vertex_count() {
            tracing::warn!(
                id = %model.id,
                colors = colors.len(),
                vertices = mesh.vertex_count(),
                "material length differs from mesh, fitting colors to vertices"
            );
        }

        self.positions.extend_from_slice(mesh.positions());
        self.normals.extend_from_slice(mesh.normals());
        self.colors.extend(
            (0..mesh.vertex_count()).map(|i| colors.get(i).copied().unwrap_or(palette::NEUTRAL)),
        );
        self.model_indices
            .extend(std::iter::repeat_n(index, mesh.vertex_count()));

        let aabb = model.aabb.unwrap_or_else(|| {
            tracing::debug!(id = %model.id, "no bounds yet, using own mesh box");
            model.world_bounds()
        });
        self.matrices.push(model.world.to_cols_array_2d());
        self.aabb_min.push(aabb.min.extend(0.0).to_array());
        self.aabb_max.push(aabb.max.extend(0.0).to_array());
        self.ids.push(model.id.clone());
    }
}

/// Flatten a placed and bounded scene into draw buffers with one pre-order
/// reduce. Anchors are walked but emit nothing.
pub fn flatten(tree: &Tree<Model>) -> DrawBuffers {
    let _span = tracing::info_span!("flatten").entered();
    let plan = FlattenPlan::of(tree);
    let buffers = tree.reduce(DrawBuffers::with_capacity(plan), |mut buffers, model| {
        if model.renderable {
            buffers.push_model(model);
        }
        buffers
    });
    tracing::debug!(
        models = buffers.model_count(),
        vertices = buffers.vertex_count(),
        "flattened"
    );
    buffers
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use cubescene_assets::{CUBE_VERTICES, Material, unit_cube};
    use cubescene_common::Trs;
    use cubescene_kernel::{
        BoundsPolicy, SceneAssets, SceneConfig, demo_world, update_world_from_root, with_bounds,
        with_cube_counts,
    };
    use glam::{Mat4, Vec3};

    fn prepared(tree: Tree<Model>) -> Tree<Model> {
        with_cube_counts(with_bounds(update_world_from_root(tree), BoundsPolicy::ChildUnion))
    }

    fn cube(id: &str, x: f32) -> Model {
        Model::new(id, Arc::new(unit_cube()), Arc::new(Material::black()))
            .with_trs(Trs::from_translation(Vec3::new(x, 0.0, 0.0)))
    }

    #[test]
    fn anchors_emit_nothing() {
        let t = prepared(Tree::node(
            Model::anchor("root", Arc::new(unit_cube())),
            vec![Tree::leaf(cube("a", 1.0)), Tree::leaf(cube("b", 2.0))],
        ));
        let b = flatten(&t);
        assert_eq!(b.model_count(), 2);
        assert_eq!(b.vertex_count(), 2 * CUBE_VERTICES);
        assert_eq!(b.ids, [ModelId::from("a"), ModelId::from("b")]);
    }

    #[test]
    fn matrices_are_column_major() {
        let t = prepared(Tree::leaf(cube("a", 3.0)));
        let b = flatten(&t);
        assert_eq!(b.matrices[0][3], [3.0, 0.0, 0.0, 1.0]);
        assert_eq!(Mat4::from_cols_array_2d(&b.matrices[0]), t.value().world);
    }

    #[test]
    fn model_ids_span_contiguous_vertex_ranges() {
        let world = prepared(demo_world(&SceneAssets::default(), &SceneConfig::default()));
        let b = flatten(&world);

        assert_eq!(b.model_count(), cube_count(&world) as usize);
        let mut next_start = 0;
        for index in 0..b.model_count() as u32 {
            let range = b.vertex_range(index);
            assert_eq!(range.start, next_start, "gap or overlap before model {index}");
            assert_eq!(range.len(), CUBE_VERTICES);
            assert!(b.model_indices[range.clone()].iter().all(|&m| m == index));
            next_start = range.end;
        }
        assert_eq!(next_start, b.vertex_count());
    }

    #[test]
    fn buffers_are_presized_from_plan() {
        let world = prepared(demo_world(&SceneAssets::default(), &SceneConfig::default()));
        let plan = FlattenPlan::of(&world);
        let b = flatten(&world);
        assert_eq!(plan.models, world.value().cube_count as usize);
        assert_eq!(plan.models, b.model_count());
        assert_eq!(plan.vertices, b.vertex_count());
        assert_eq!(b.positions.capacity(), plan.vertices);
        assert_eq!(b.matrices.capacity(), plan.models);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cube counts are stale")]
    fn stale_cube_counts_are_caught() {
        let t = with_bounds(
            update_world_from_root(Tree::node(
                Model::anchor("root", Arc::new(unit_cube())),
                vec![Tree::leaf(cube("a", 1.0))],
            )),
            BoundsPolicy::ChildUnion,
        );
        FlattenPlan::of(&t);
    }

    #[test]
    fn pre_order_model_indices() {
        let t = prepared(Tree::node(
            cube("parent", 0.0),
            vec![
                Tree::node(cube("child", 1.0), vec![Tree::leaf(cube("grandchild", 2.0))]),
                Tree::leaf(cube("sibling", 3.0)),
            ],
        ));
        let b = flatten(&t);
        let ids: Vec<&str> = b.ids.iter().map(ModelId::as_str).collect();
        assert_eq!(ids, ["parent", "child", "grandchild", "sibling"]);
        assert_eq!(b.model_index(&ModelId::from("sibling")), Some(3));
    }

    #[test]
    fn short_material_is_padded() {
        let mut m = cube("odd", 0.0);
        m.material = Arc::new(Material::solid("short", palette::BLACK, 6));
        let b = flatten(&prepared(Tree::leaf(m)));
        assert_eq!(b.colors.len(), CUBE_VERTICES);
        assert_eq!(b.colors[5], palette::BLACK);
        assert_eq!(b.colors[6], palette::NEUTRAL);
    }

    #[test]
    fn boxes_travel_with_models() {
        let t = prepared(Tree::leaf(cube("a", 2.0)));
        let b = flatten(&t);
        assert_eq!(b.aabb_min[0], [1.5, -0.5, -0.5, 0.0]);
        assert_eq!(b.aabb_max[0], [2.5, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn byte_views_cover_buffers() {
        let b = flatten(&prepared(Tree::leaf(cube("a", 0.0))));
        assert_eq!(b.position_bytes().len(), CUBE_VERTICES * 16);
        assert_eq!(b.normal_bytes().len(), CUBE_VERTICES * 16);
        assert_eq!(b.color_bytes().len(), CUBE_VERTICES * 16);
        assert_eq!(b.model_index_bytes().len(), CUBE_VERTICES * 4);
        assert_eq!(b.matrix_bytes().len(), 64);
    }
}
