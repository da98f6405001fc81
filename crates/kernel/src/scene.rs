use std::f32::consts::PI;
use std::sync::Arc;

use cubescene_assets::{AssetError, AssetStore, Material, Mesh, unit_cube};
use cubescene_common::{ModelId, Trs};
use cubescene_tree::Tree;
use glam::Vec3;

use crate::{AnimationRole, Model, SceneConfig};

/// Shared mesh and material handles used by the scene builders.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub cube: Arc<Mesh>,
    pub debug: Arc<Material>,
    pub terrain: Arc<Material>,
    pub carrot_body: Arc<Material>,
    pub carrot_leaves: Arc<Material>,
}

impl SceneAssets {
    /// Resolve the builder assets from a registry by name.
    pub fn from_store(store: &AssetStore) -> Result<Self, AssetError> {
        Ok(Self {
            cube: store.mesh_by_name("unit-cube")?,
            debug: store.material_by_name("debug-faces")?,
            terrain: store.material_by_name("terrain")?,
            carrot_body: store.material_by_name("carrot-body")?,
            carrot_leaves: store.material_by_name("carrot-leaves")?,
        })
    }

    fn cube(&self, id: ModelId, material: &Arc<Material>, trs: Trs) -> Model {
        Model::new(id, Arc::clone(&self.cube), Arc::clone(material)).with_trs(trs)
    }

    fn anchor(&self, id: ModelId, trs: Trs) -> Model {
        Model::anchor(id, Arc::clone(&self.cube)).with_trs(trs)
    }
}

impl Default for SceneAssets {
    fn default() -> Self {
        Self {
            cube: Arc::new(unit_cube()),
            debug: Arc::new(Material::debug_faces()),
            terrain: Arc::new(Material::terrain()),
            carrot_body: Arc::new(Material::carrot_body()),
            carrot_leaves: Arc::new(Material::carrot_leaves()),
        }
    }
}

const LIMB_SWING_DEG: f32 = 30.0;
const LIMB_SWING_HZ: f32 = 1.0;

const CARROT_OFFSET: f32 = 1.0;
/// Center height of the widest body cube: half of it plus the two cubes below.
const CARROT_BODY_HEIGHT: f32 = 0.5 + 0.7 + 0.4 + CARROT_OFFSET;
const CARROT_LEAF_HEIGHT: f32 = 0.2 + 0.7 + CARROT_BODY_HEIGHT;

fn limb_swing(phase_offset: f32) -> AnimationRole {
    AnimationRole::Swing {
        amplitude_deg: LIMB_SWING_DEG,
        frequency_hz: LIMB_SWING_HZ,
        phase_offset,
    }
}

/// A walking figure: trunk with head, ears, arms and legs. Limbs pivot at
/// their top face; arms and legs on the same side swing in opposition.
pub fn cuberman(assets: &SceneAssets, parent: &ModelId, index: u32) -> Tree<Model> {
    let id = parent.child(&format!("cuberman-{index}"));
    let head_id = id.child("head");
    let mat = &assets.debug;

    let head = Tree::node(
        assets
            .cube(
                head_id.clone(),
                mat,
                Trs::from_translation(Vec3::new(0.0, 0.9, 0.0)).with_uniform_scale(0.7),
            )
            .with_role(AnimationRole::Bob {
                amplitude: 0.05,
                frequency_hz: 2.0,
            }),
        vec![
            Tree::leaf(assets.cube(
                head_id.child("left-ear"),
                mat,
                Trs::from_translation(Vec3::new(1.0, 1.0, 0.0))
                    .with_pivot(Vec3::new(-0.5, -0.5, 0.0))
                    .with_rotation_deg(0.0, 0.0, -25.0)
                    .with_uniform_scale(0.5),
            )),
            Tree::leaf(assets.cube(
                head_id.child("right-ear"),
                mat,
                Trs::from_translation(Vec3::new(-1.0, 1.0, 0.0))
                    .with_pivot(Vec3::new(0.5, -0.5, 0.0))
                    .with_rotation_deg(0.0, 0.0, -25.0)
                    .with_uniform_scale(0.5),
            )),
        ],
    );

    let limb = |name: &str, x: f32, y: f32, phase: f32| {
        Tree::leaf(
            assets
                .cube(
                    id.child(name),
                    mat,
                    Trs::from_translation(Vec3::new(x, y, 0.0))
                        .with_pivot(Vec3::new(0.0, 0.5, 0.0))
                        .with_uniform_scale(0.5),
                )
                .with_role(limb_swing(phase)),
        )
    };

    Tree::node(
        assets
            .cube(id.clone(), mat, Trs::from_translation(Vec3::new(1.0, 1.0, 0.0)))
            .with_role(AnimationRole::Walker),
        vec![
            head,
            limb("left-arm", 0.8, -0.3, 0.0),
            limb("right-arm", -0.8, -0.3, PI),
            limb("left-leg", 0.3, -1.1, PI),
            limb("right-leg", -0.3, -1.1, 0.0),
        ],
    )
}

/// `rows` x `cols` unit tiles centered on the origin, spaced `1 + gap`.
pub fn terrain(assets: &SceneAssets, parent: &ModelId, rows: u32, cols: u32, gap: f32) -> Tree<Model> {
    let id = parent.child("terrain");
    let centered = |i: u32, n: u32| (i as f32 - (n as f32 - 1.0) / 2.0) * (1.0 + gap);

    let tiles = (0..rows)
        .flat_map(|i| (0..cols).map(move |j| (i, j)))
        .map(|(i, j)| {
            Tree::leaf(assets.cube(
                id.child(&format!("tile-{i}-{j}")),
                &assets.terrain,
                Trs::from_translation(Vec3::new(centered(i, rows), 0.0, centered(j, cols))),
            ))
        })
        .collect();

    Tree::node(assets.anchor(id, Trs::default()), tiles)
}

/// A spinning carrot: three stacked body cubes, a stalk and four swaying
/// leaves. The anchor pivots one unit up so the spin axis runs through the
/// body.
pub fn carrot(assets: &SceneAssets, parent: &ModelId, tag: &str, translation: Vec3) -> Tree<Model> {
    let id = parent.child(tag);
    let body = |name: &str, y: f32, scale: f32| {
        Tree::leaf(assets.cube(
            id.child(name),
            &assets.carrot_body,
            Trs::from_translation(Vec3::new(0.0, y, 0.0)).with_uniform_scale(scale),
        ))
    };
    let leaf = |name: &str, x: f32, z: f32| {
        Tree::leaf(
            assets
                .cube(
                    id.child(name),
                    &assets.carrot_leaves,
                    Trs::from_translation(Vec3::new(x, CARROT_LEAF_HEIGHT, z))
                        .with_uniform_scale(0.4),
                )
                .with_role(AnimationRole::Sway {
                    amplitude_deg: 10.0,
                    frequency_hz: 0.5,
                }),
        )
    };

    Tree::node(
        assets
            .anchor(
                id.clone(),
                Trs::from_translation(translation).with_pivot(Vec3::new(0.0, 1.0, 0.0)),
            )
            .with_role(AnimationRole::Spin { deg_per_sec: 45.0 }),
        vec![
            body("body-1", 0.2 + CARROT_OFFSET, 0.4),
            body("body-2", 0.35 + 0.4 + CARROT_OFFSET, 0.7),
            body("body-3", CARROT_BODY_HEIGHT, 1.0),
            Tree::leaf(assets.cube(
                id.child("stalk"),
                &assets.carrot_leaves,
                Trs::from_translation(Vec3::new(0.0, 0.7 + CARROT_BODY_HEIGHT, 0.0))
                    .with_uniform_scale(0.4),
            )),
            leaf("leaf-1", 0.0, 0.4),
            leaf("leaf-2", 0.4, 0.0),
            leaf("leaf-3", -0.4, 0.0),
            leaf("leaf-4", 0.0, -0.4),
        ],
    )
}

/// One fence pole: three full cubes stacked from y = 1 and a half-size cap.
fn fence_pole(assets: &SceneAssets, parent: &ModelId, index: u32, x: f32) -> Tree<Model> {
    let id = parent.child(&format!("pole-{index}"));
    let segment = |n: u32, y: f32, scale: f32| {
        Tree::leaf(assets.cube(
            id.child(&format!("segment-{n}")),
            &assets.carrot_body,
            Trs::from_translation(Vec3::new(0.0, y, 0.0)).with_uniform_scale(scale),
        ))
    };
    Tree::node(
        assets.anchor(id.clone(), Trs::from_translation(Vec3::new(x, 0.0, 0.0))),
        vec![
            segment(0, 1.0, 1.0),
            segment(1, 2.0, 1.0),
            segment(2, 3.0, 1.0),
            segment(3, 3.75, 0.5),
        ],
    )
}

/// `count` poles centered along the row's local x axis, `spacing` apart.
#[allow(clippy::too_many_arguments)]
pub fn fence_row(
    assets: &SceneAssets,
    parent: &ModelId,
    name: &str,
    count: u32,
    translation: Vec3,
    ry_deg: f32,
    scale: f32,
    spacing: f32,
) -> Tree<Model> {
    let id = parent.child(name);
    let poles = (0..count)
        .map(|i| {
            let x = (i as f32 - (count as f32 - 1.0) / 2.0) * spacing;
            fence_pole(assets, &id, i, x)
        })
        .collect();
    Tree::node(
        assets.anchor(
            id.clone(),
            Trs::from_translation(translation)
                .with_rotation_deg(0.0, ry_deg, 0.0)
                .with_uniform_scale(scale),
        ),
        poles,
    )
}

/// The full demo scene under a `world` anchor: cubermen, terrain, carrots
/// in a row along x, and four fence rows boxing in the terrain.
pub fn demo_world(assets: &SceneAssets, config: &SceneConfig) -> Tree<Model> {
    let root = ModelId::from("world");
    let d = config.fence_distance;
    let fence = |name: &str, translation: Vec3, ry_deg: f32| {
        fence_row(
            assets,
            &root,
            name,
            config.fence_poles_per_row,
            translation,
            ry_deg,
            config.fence_scale,
            config.fence_spacing,
        )
    };

    let mut children: Vec<Tree<Model>> = (0..config.cuberman_count)
        .map(|i| cuberman(assets, &root, i))
        .collect();
    children.push(terrain(
        assets,
        &root,
        config.terrain_rows,
        config.terrain_cols,
        config.terrain_gap,
    ));
    children.extend(
        (0..config.carrot_count)
            .map(|i| carrot(assets, &root, &format!("carrot-{i}"), Vec3::new(i as f32, 0.0, 0.0))),
    );
    children.push(fence("fence-left", Vec3::new(d, 0.0, 0.0), 90.0));
    children.push(fence("fence-right", Vec3::new(-d, 0.0, 0.0), 90.0));
    children.push(fence("fence-front", Vec3::new(0.0, 0.0, d), 0.0));
    children.push(fence("fence-back", Vec3::new(0.0, 0.0, -d), 0.0));

    let world = Tree::node(assets.anchor(root, Trs::default()), children);
    tracing::debug!(models = world.len(), depth = world.depth(), "built demo world");
    world
}
