use hashbrown::HashMap;

use loam_mesh_cpu::{BakeResult, BakeStrategy, bake};
use loam_voxel::{Palette, VoxelMap, VoxelType};

/// One named editing layer. While a layer holds a baked result it is frozen:
/// voxel edits are refused until `unbake` drops the geometry, so buffers on
/// the rendering side never drift from the map they were built from.
pub struct Layer {
    pub name: String,
    pub voxels: VoxelMap,
    baked: Option<BakeResult>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            voxels: VoxelMap::new(),
            baked: None,
        }
    }

    #[allow(dead_code)]
    #[inline]
    pub fn is_baked(&self) -> bool {
        self.baked.is_some()
    }

    #[inline]
    pub fn baked(&self) -> Option<&BakeResult> {
        self.baked.as_ref()
    }

    /// Set a voxel, returning whether the edit was applied. Edits against a
    /// baked layer are dropped with a warning rather than silently mutating
    /// a map that no longer matches its geometry.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, t: VoxelType) -> bool {
        if self.baked.is_some() {
            log::warn!(
                "layer '{}' is baked; ignoring edit at ({}, {}, {})",
                self.name,
                x,
                y,
                z
            );
            return false;
        }
        self.voxels.set(x, y, z, t);
        true
    }

    /// Bake the layer's current voxels and freeze it. Re-baking a baked layer
    /// just replaces the stored result; the voxels have not changed.
    pub fn bake(&mut self, palette: &Palette, strategy: BakeStrategy, voxel_size: f32) {
        let result = bake(&self.voxels, palette, strategy, voxel_size);
        log::info!(
            "baked layer '{}' ({:?}): {} faces from {} voxels",
            self.name,
            strategy,
            result.metadata.face_count,
            result.metadata.voxel_count
        );
        self.baked = Some(result);
    }

    /// Drop the baked result and return the layer to its editable state. The
    /// voxel map is untouched, so bake-unbake-bake reproduces the same faces.
    #[allow(dead_code)]
    pub fn unbake(&mut self) -> Option<BakeResult> {
        self.baked.take()
    }
}

/// Ordered collection of layers with name lookup. Draw order is insertion
/// order; names are unique.
#[derive(Default)]
pub struct LayerSet {
    layers: Vec<Layer>,
    by_name: HashMap<String, usize>,
}

impl LayerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer, returning its index, or `None` if the name is taken.
    pub fn add(&mut self, layer: Layer) -> Option<usize> {
        if self.by_name.contains_key(&layer.name) {
            log::warn!("duplicate layer name '{}'", layer.name);
            return None;
        }
        let idx = self.layers.len();
        self.by_name.insert(layer.name.clone(), idx);
        self.layers.push(layer);
        Some(idx)
    }

    #[allow(dead_code)]
    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.by_name.get(name).map(|&i| &self.layers[i])
    }

    #[allow(dead_code)]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.by_name.get(name).map(|&i| &mut self.layers[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    #[allow(dead_code)]
    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[allow(dead_code)]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_are_refused_while_baked() {
        let mut layer = Layer::new("terrain");
        assert!(layer.set_voxel(0, 0, 0, VoxelType(1)));
        layer.bake(&Palette::new(), BakeStrategy::Greedy, 1.0);
        assert!(layer.is_baked());
        assert!(!layer.set_voxel(1, 0, 0, VoxelType(1)));
        assert_eq!(layer.voxels.len(), 1);
    }

    #[test]
    fn unbake_restores_editing_and_rebake_matches() {
        let mut layer = Layer::new("props");
        layer.set_voxel(0, 0, 0, VoxelType(1));
        layer.set_voxel(0, 1, 0, VoxelType(2));
        let palette = Palette::new();
        layer.bake(&palette, BakeStrategy::Greedy, 1.0);
        let first = layer.unbake().unwrap();
        assert!(!layer.is_baked());
        assert!(layer.set_voxel(5, 5, 5, VoxelType(1)));
        layer.voxels.remove(5, 5, 5);
        layer.bake(&palette, BakeStrategy::Greedy, 1.0);
        assert_eq!(layer.baked().unwrap().faces, first.faces);
    }

    #[test]
    fn layer_set_rejects_duplicate_names() {
        let mut set = LayerSet::new();
        assert_eq!(set.add(Layer::new("a")), Some(0));
        assert_eq!(set.add(Layer::new("b")), Some(1));
        assert_eq!(set.add(Layer::new("a")), None);
        assert_eq!(set.len(), 2);
        assert!(set.get("b").is_some());
    }
}
