//! Sparse voxel map, bounds, and the color palette registry.
#![forbid(unsafe_code)]

use hashbrown::HashMap;

pub mod palette;

pub use palette::{Palette, Rgba};

/// Identifies the substance of a voxel. `VoxelType::AIR` (slot 0) is the
/// reserved empty value; every other slot is assigned by the [`Palette`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct VoxelType(pub u16);

impl VoxelType {
    pub const AIR: VoxelType = VoxelType(0);

    #[inline]
    pub fn is_air(self) -> bool {
        self == VoxelType::AIR
    }
}

/// Inclusive integer bounding box of the non-empty voxels in a map.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GridBounds {
    pub min: [i32; 3],
    pub max: [i32; 3],
}

impl GridBounds {
    /// Number of voxel cells spanned along `axis`, inclusive of both ends.
    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        (self.max[axis] - self.min[axis] + 1) as usize
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= self.min[0]
            && x <= self.max[0]
            && y >= self.min[1]
            && y <= self.max[1]
            && z >= self.min[2]
            && z <= self.max[2]
    }
}

/// Sparse coordinate -> type mapping. A coordinate that is absent means "no
/// voxel there"; storing `VoxelType::AIR` removes the entry so the two states
/// stay indistinguishable.
#[derive(Default, Clone, Debug)]
pub struct VoxelMap {
    cells: HashMap<(i32, i32, i32), VoxelType>,
}

impl VoxelMap {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> VoxelType {
        self.cells
            .get(&(x, y, z))
            .copied()
            .unwrap_or(VoxelType::AIR)
    }

    #[inline]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.cells.contains_key(&(x, y, z))
    }

    pub fn set(&mut self, x: i32, y: i32, z: i32, t: VoxelType) {
        if t.is_air() {
            self.cells.remove(&(x, y, z));
        } else {
            self.cells.insert((x, y, z), t);
        }
    }

    pub fn remove(&mut self, x: i32, y: i32, z: i32) {
        self.cells.remove(&(x, y, z));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32, i32), VoxelType)> + '_ {
        self.cells.iter().map(|(k, v)| (*k, *v))
    }

    /// One-pass componentwise min/max over all non-empty entries. `None` for
    /// an empty map; callers must treat that as "nothing to bake".
    pub fn bounds(&self) -> Option<GridBounds> {
        let mut out: Option<GridBounds> = None;
        for (&(x, y, z), &t) in self.cells.iter() {
            if t.is_air() {
                continue;
            }
            match &mut out {
                None => {
                    out = Some(GridBounds {
                        min: [x, y, z],
                        max: [x, y, z],
                    });
                }
                Some(b) => {
                    b.min[0] = b.min[0].min(x);
                    b.min[1] = b.min[1].min(y);
                    b.min[2] = b.min[2].min(z);
                    b.max[0] = b.max[0].max(x);
                    b.max[1] = b.max[1].max(y);
                    b.max[2] = b.max[2].max(z);
                }
            }
        }
        out
    }
}
