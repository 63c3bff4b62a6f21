use loam_voxel::VoxelMap;

use crate::BakedFace;
use crate::face::Face;

/// Face-culling bake: one unit quad per voxel per exposed direction, no
/// merging. Keeps per-voxel face granularity for layers that stay editable
/// while still dropping every interior face, so the output is O(surface)
/// rather than 6 quads per voxel.
pub fn culled_faces(map: &VoxelMap) -> Vec<BakedFace> {
    // Map iteration order is nondeterministic; sort coordinates so the face
    // list is stable across bakes of the same snapshot.
    let mut coords: Vec<(i32, i32, i32)> = map.iter().map(|(c, _)| c).collect();
    coords.sort_unstable();
    let mut faces: Vec<BakedFace> = Vec::new();
    for (x, y, z) in coords {
        let voxel = map.get(x, y, z);
        for face in Face::ALL {
            let (dx, dy, dz) = face.delta();
            if map.is_solid(x + dx, y + dy, z + dz) {
                continue;
            }
            // Positive faces sit on the far boundary of their voxel.
            let mut origin = [x, y, z];
            if face.is_positive() {
                origin[face.primary_axis()] += 1;
            }
            faces.push(BakedFace {
                x: origin[0],
                y: origin[1],
                z: origin[2],
                w: 1,
                h: 1,
                face,
                voxel,
            });
        }
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_voxel::VoxelType;

    #[test]
    fn single_voxel_six_faces() {
        let mut map = VoxelMap::new();
        map.set(7, -1, 0, VoxelType(2));
        let faces = culled_faces(&map);
        assert_eq!(faces.len(), 6);
        assert!(faces.iter().all(|f| f.w == 1 && f.h == 1));
    }

    #[test]
    fn two_by_two_by_two_culls_interior_only() {
        let mut map = VoxelMap::new();
        for z in 0..2 {
            for y in 0..2 {
                for x in 0..2 {
                    map.set(x, y, z, VoxelType(1));
                }
            }
        }
        let faces = culled_faces(&map);
        // 6 outer 2x2 faces' worth of unit quads; interior faces culled.
        assert_eq!(faces.len(), 24);
    }

    #[test]
    fn different_types_still_occlude() {
        let mut map = VoxelMap::new();
        map.set(0, 0, 0, VoxelType(1));
        map.set(1, 0, 0, VoxelType(2));
        let faces = culled_faces(&map);
        assert_eq!(faces.len(), 10);
        // Nothing on the shared plane at x=1 (the +X/-X pair between them).
        assert!(
            !faces
                .iter()
                .any(|f| f.face.primary_axis() == 0 && f.x == 1)
        );
    }

    #[test]
    fn output_order_is_sorted_by_coordinate() {
        let mut map = VoxelMap::new();
        map.set(5, 0, 0, VoxelType(1));
        map.set(-5, 0, 0, VoxelType(1));
        let faces = culled_faces(&map);
        assert_eq!(faces.len(), 12);
        // All faces of the (-5,0,0) voxel come first.
        assert!(faces[..6].iter().all(|f| f.x <= -4));
    }
}
