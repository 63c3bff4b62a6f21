use loam_voxel::VoxelMap;

use crate::BakedFace;
use crate::face::{Face, uv_axes};
use crate::mask::{boundary_masks, slice_types};
use crate::merge::merge_rects;

/// Full greedy bake: one pass per axis over every slice boundary from `min`
/// to `max+1`, comparing adjacent slices, merging each directional mask into
/// maximal rectangles, and mapping those back into grid space.
///
/// Deterministic: axes in x,y,z order, boundaries ascending, the negative
/// mask merged before the positive one, and the merger's fixed row-major
/// scan. Baking the same map twice yields an identical face list.
pub fn greedy_faces(map: &VoxelMap) -> Vec<BakedFace> {
    let Some(bounds) = map.bounds() else {
        return Vec::new();
    };
    let mut faces: Vec<BakedFace> = Vec::new();
    for axis in 0..3 {
        let (ua, va) = uv_axes(axis);
        let width = bounds.extent(ua);
        let height = bounds.extent(va);
        let axis_start = faces.len();
        // The slice just below min is outside the bounds, hence empty; that is
        // what turns every voxel on the min plane into a boundary face.
        let mut prev = vec![None; width * height];
        for s in bounds.min[axis]..=bounds.max[axis] + 1 {
            let cur = if s > bounds.max[axis] {
                vec![None; width * height]
            } else {
                slice_types(map, &bounds, axis, s)
            };
            let (neg, pos) = boundary_masks(&prev, &cur, width, height);
            for (mask, positive) in [(&neg, false), (&pos, true)] {
                let face = Face::from_axis(axis, positive);
                merge_rects(mask.width, mask.height, mask.cells(), |r| {
                    let mut origin = [0i32; 3];
                    origin[axis] = s;
                    origin[ua] = bounds.min[ua] + r.u as i32;
                    origin[va] = bounds.min[va] + r.v as i32;
                    faces.push(BakedFace {
                        x: origin[0],
                        y: origin[1],
                        z: origin[2],
                        w: r.w as i32,
                        h: r.h as i32,
                        face,
                        voxel: r.voxel,
                    });
                });
            }
            prev = cur;
        }
        log::debug!(
            "greedy bake axis {}: {} faces over {} boundaries",
            axis,
            faces.len() - axis_start,
            bounds.extent(axis) + 1
        );
    }
    faces
}
