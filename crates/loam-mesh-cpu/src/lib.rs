//! CPU voxel baking crate: greedy and face-culling mesh generation.
//!
//! Both strategies turn a sparse [`VoxelMap`] snapshot into a face list; the
//! assembler then builds renderable buffers from it. Baking is a synchronous,
//! stateless batch transform: nothing is cached between calls and the map is
//! only read.
#![forbid(unsafe_code)]

use loam_geom::{Aabb, Vec3};
use loam_voxel::{Palette, VoxelMap, VoxelType};

pub mod build;
pub mod culled;
pub mod face;
pub mod greedy;
pub mod mask;
pub mod merge;

pub use build::{BakedGeometry, MeshBuild, assemble_geometry};
pub use culled::culled_faces;
pub use face::Face;
pub use greedy::greedy_faces;

/// One emitted quad in voxel-grid units. `(x,y,z)` is the min corner on the
/// face plane; `w`/`h` span the face's u/v axes (see [`face::uv_axes`]).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BakedFace {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub w: i32,
    pub h: i32,
    pub face: Face,
    pub voxel: VoxelType,
}

impl BakedFace {
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.face.normal()
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum BakeStrategy {
    /// Merged rectangles, minimal quad count. The default for baked layers.
    #[default]
    Greedy,
    /// One unit quad per exposed voxel face; keeps per-voxel granularity for
    /// layers that must stay editable after baking.
    Culled,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BakeMetadata {
    pub face_count: usize,
    pub vertex_count: usize,
    pub voxel_count: usize,
}

/// Result of one bake call: the face list, summary metadata, assembled
/// geometry, and the world-space bounding box (when the map was non-empty).
#[derive(Clone, Debug)]
pub struct BakeResult {
    pub strategy: BakeStrategy,
    pub faces: Vec<BakedFace>,
    pub metadata: BakeMetadata,
    pub geometry: BakedGeometry,
    pub aabb: Option<Aabb>,
}

/// Bake a voxel map snapshot. Empty input is not an error: the result simply
/// has zero faces and empty buffers.
pub fn bake(
    map: &VoxelMap,
    palette: &Palette,
    strategy: BakeStrategy,
    voxel_size: f32,
) -> BakeResult {
    let faces = match strategy {
        BakeStrategy::Greedy => greedy_faces(map),
        BakeStrategy::Culled => culled_faces(map),
    };
    let geometry = assemble_geometry(&faces, palette, voxel_size);
    let metadata = BakeMetadata {
        face_count: faces.len(),
        vertex_count: geometry.vertex_count(),
        voxel_count: map.len(),
    };
    let aabb = map.bounds().map(|b| {
        Aabb::new(
            Vec3::new(b.min[0] as f32, b.min[1] as f32, b.min[2] as f32) * voxel_size,
            Vec3::new(
                (b.max[0] + 1) as f32,
                (b.max[1] + 1) as f32,
                (b.max[2] + 1) as f32,
            ) * voxel_size,
        )
    });
    log::debug!(
        "bake ({:?}): {} voxels -> {} faces, {} vertices",
        strategy,
        metadata.voxel_count,
        metadata.face_count,
        metadata.vertex_count
    );
    BakeResult {
        strategy,
        faces,
        metadata,
        geometry,
        aabb,
    }
}
