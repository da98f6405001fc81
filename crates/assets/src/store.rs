use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AssetError, Material, Mesh, unit_cube};

/// Content-addressed asset ID computed from the asset data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// An asset entry in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Asset {
    Mesh(Arc<Mesh>),
    Material(Arc<Material>),
}

/// Content-addressed registry of meshes and materials.
///
/// Identical content registers once. Scene builders hand out the stored
/// `Arc`s, so every cube in a scene shares one mesh allocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetStore {
    assets: BTreeMap<AssetId, Asset>,
    mesh_names: BTreeMap<String, AssetId>,
    material_names: BTreeMap<String, AssetId>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the unit cube and every built-in material.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.register_mesh(unit_cube());
        for material in [
            Material::default(),
            Material::none(),
            Material::debug_faces(),
            Material::terrain(),
            Material::carrot_body(),
            Material::carrot_leaves(),
            Material::black(),
        ] {
            store.register_material(material);
        }
        tracing::debug!(assets = store.len(), "asset store seeded with defaults");
        store
    }

    /// Register a mesh and return its asset ID. A later mesh with the same
    /// name replaces the name binding but not earlier content.
    pub fn register_mesh(&mut self, mesh: Mesh) -> AssetId {
        let id = mesh_hash(&mesh);
        self.mesh_names.insert(mesh.name().to_owned(), id);
        self.assets
            .entry(id)
            .or_insert_with(|| Asset::Mesh(Arc::new(mesh)));
        id
    }

    /// Register a material and return its asset ID.
    pub fn register_material(&mut self, material: Material) -> AssetId {
        let id = material_hash(&material);
        self.material_names.insert(material.name.clone(), id);
        self.assets
            .entry(id)
            .or_insert_with(|| Asset::Material(Arc::new(material)));
        id
    }

    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(&id)
    }

    pub fn mesh(&self, id: AssetId) -> Result<Arc<Mesh>, AssetError> {
        match self.assets.get(&id) {
            Some(Asset::Mesh(m)) => Ok(Arc::clone(m)),
            _ => Err(AssetError::NotFound(id)),
        }
    }

    pub fn material(&self, id: AssetId) -> Result<Arc<Material>, AssetError> {
        match self.assets.get(&id) {
            Some(Asset::Material(m)) => Ok(Arc::clone(m)),
            _ => Err(AssetError::NotFound(id)),
        }
    }

    pub fn mesh_by_name(&self, name: &str) -> Result<Arc<Mesh>, AssetError> {
        let id = self
            .mesh_names
            .get(name)
            .ok_or_else(|| AssetError::UnknownName(name.to_owned()))?;
        self.mesh(*id)
    }

    pub fn material_by_name(&self, name: &str) -> Result<Arc<Material>, AssetError> {
        let id = self
            .material_names
            .get(name)
            .ok_or_else(|| AssetError::UnknownName(name.to_owned()))?;
        self.material(*id)
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Save the asset registry to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path.as_ref())?;
        serde_json::to_writer_pretty(file, self)?;
        tracing::debug!(path = %path.as_ref().display(), assets = self.len(), "saved asset store");
        Ok(())
    }

    /// Load an asset registry from a JSON file. Meshes are revalidated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path.as_ref())?;
        let store: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        tracing::debug!(path = %path.as_ref().display(), assets = store.len(), "loaded asset store");
        Ok(store)
    }
}

fn mesh_hash(mesh: &Mesh) -> AssetId {
    let mut hasher = Sha256::new();
    hasher.update(b"mesh");
    hasher.update(mesh.name().as_bytes());
    for v in mesh.positions().iter().chain(mesh.normals()) {
        for c in v {
            hasher.update(c.to_le_bytes());
        }
    }
    truncate(hasher)
}

fn material_hash(material: &Material) -> AssetId {
    let mut hasher = Sha256::new();
    hasher.update(b"material");
    hasher.update(material.name.as_bytes());
    for color in &material.base_color {
        for c in color {
            hasher.update(c.to_le_bytes());
        }
    }
    truncate(hasher)
}

fn truncate(hasher: Sha256) -> AssetId {
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    AssetId(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CUBE_VERTICES, palette};

    #[test]
    fn register_mesh() {
        let mut store = AssetStore::new();
        let id = store.register_mesh(unit_cube());
        assert_eq!(store.mesh(id).unwrap().vertex_count(), CUBE_VERTICES);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn content_addressed_dedup() {
        let mut store = AssetStore::new();
        let id1 = store.register_mesh(unit_cube());
        let id2 = store.register_mesh(unit_cube());
        assert_eq!(id1, id2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn shared_handles() {
        let store = AssetStore::with_defaults();
        let a = store.mesh_by_name("unit-cube").unwrap();
        let b = store.mesh_by_name("unit-cube").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn different_colors_get_different_ids() {
        let mut store = AssetStore::new();
        let a = store.register_material(Material::solid("m", palette::CARROT, 3));
        let b = store.register_material(Material::solid("m", palette::BLACK, 3));
        assert_ne!(a, b);
        assert_eq!(store.material_by_name("m").unwrap().base_color[0], palette::BLACK);
    }

    #[test]
    fn wrong_kind_is_not_found() {
        let mut store = AssetStore::new();
        let id = store.register_material(Material::black());
        assert!(matches!(store.mesh(id), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn unknown_name() {
        let store = AssetStore::with_defaults();
        assert!(matches!(
            store.mesh_by_name("teapot"),
            Err(AssetError::UnknownName(n)) if n == "teapot"
        ));
        assert!(store.material_by_name("terrain").is_ok());
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let store = AssetStore::with_defaults();
        store.save(tmp.path()).unwrap();

        let loaded = AssetStore::load(tmp.path()).unwrap();
        assert_eq!(loaded.len(), store.len());
        assert_eq!(*loaded.mesh_by_name("unit-cube").unwrap(), unit_cube());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AssetStore::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }
}
