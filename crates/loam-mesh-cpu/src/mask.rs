use loam_voxel::{GridBounds, VoxelMap, VoxelType};

use crate::face::uv_axes;

/// 2D face mask over the secondary axes of one slice boundary. A `Some` cell
/// means a face of that type must be emitted there; `None` means no face.
/// Cells are row-major with `u` fastest, matching the merger's scan order.
#[derive(Clone, Debug)]
pub struct SliceMask {
    pub width: usize,
    pub height: usize,
    cells: Vec<Option<VoxelType>>,
}

impl SliceMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    #[inline]
    pub fn get(&self, u: usize, v: usize) -> Option<VoxelType> {
        self.cells[v * self.width + u]
    }

    #[inline]
    pub fn set(&mut self, u: usize, v: usize, t: Option<VoxelType>) {
        self.cells[v * self.width + u] = t;
    }

    #[inline]
    pub fn cells(&self) -> &[Option<VoxelType>] {
        &self.cells
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Voxel types present on one slice of the map: `cell[v*width+u]` is the type
/// at `coord[axis] = s`, `coord[u_axis] = min_u + u`, `coord[v_axis] = min_v + v`.
pub fn slice_types(
    map: &VoxelMap,
    bounds: &GridBounds,
    axis: usize,
    s: i32,
) -> Vec<Option<VoxelType>> {
    let (ua, va) = uv_axes(axis);
    let width = bounds.extent(ua);
    let height = bounds.extent(va);
    let mut cells = vec![None; width * height];
    let mut coord = [0i32; 3];
    coord[axis] = s;
    for v in 0..height {
        coord[va] = bounds.min[va] + v as i32;
        for u in 0..width {
            coord[ua] = bounds.min[ua] + u as i32;
            let t = map.get(coord[0], coord[1], coord[2]);
            if !t.is_air() {
                cells[v * width + u] = Some(t);
            }
        }
    }
    cells
}

/// Compare the slice below a boundary (`prev`, at `s-1`) with the slice above
/// it (`cur`, at `s`) and produce the two directional face masks for that
/// boundary plane. Only empty-vs-nonempty transitions need a face; two solid
/// cells occlude each other regardless of type.
pub fn boundary_masks(
    prev: &[Option<VoxelType>],
    cur: &[Option<VoxelType>],
    width: usize,
    height: usize,
) -> (SliceMask, SliceMask) {
    debug_assert_eq!(prev.len(), width * height);
    debug_assert_eq!(cur.len(), width * height);
    let mut neg = SliceMask::new(width, height);
    let mut pos = SliceMask::new(width, height);
    for i in 0..width * height {
        match (prev[i], cur[i]) {
            // Voxel above the boundary, air below: its negative face shows.
            (None, Some(t)) => neg.cells[i] = Some(t),
            // Voxel below the boundary, air above: its positive face shows.
            (Some(t), None) => pos.cells[i] = Some(t),
            _ => {}
        }
    }
    (neg, pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_voxel_masks_on_both_sides() {
        let mut map = VoxelMap::new();
        map.set(0, 0, 0, VoxelType(1));
        let b = map.bounds().unwrap();

        // X axis, boundary at x=0: empty below, voxel above.
        let prev = slice_types(&map, &b, 0, -1);
        let cur = slice_types(&map, &b, 0, 0);
        let (neg, pos) = boundary_masks(&prev, &cur, 1, 1);
        assert_eq!(neg.get(0, 0), Some(VoxelType(1)));
        assert_eq!(pos.get(0, 0), None);

        // Boundary at x=1: voxel below, empty above.
        let prev = slice_types(&map, &b, 0, 0);
        let cur = slice_types(&map, &b, 0, 1);
        let (neg, pos) = boundary_masks(&prev, &cur, 1, 1);
        assert_eq!(neg.get(0, 0), None);
        assert_eq!(pos.get(0, 0), Some(VoxelType(1)));
    }

    #[test]
    fn solid_pair_suppresses_interior_boundary() {
        let mut map = VoxelMap::new();
        map.set(0, 0, 0, VoxelType(1));
        map.set(1, 0, 0, VoxelType(2));
        let b = map.bounds().unwrap();
        let prev = slice_types(&map, &b, 0, 0);
        let cur = slice_types(&map, &b, 0, 1);
        let (neg, pos) = boundary_masks(&prev, &cur, 1, 1);
        // Cross-type boundary: occluded both ways under the default policy.
        assert_eq!(neg.filled_count(), 0);
        assert_eq!(pos.filled_count(), 0);
    }

    #[test]
    fn slice_layout_is_u_fastest() {
        let mut map = VoxelMap::new();
        // Two voxels sharing x=0, differing in z (u axis for X slices).
        map.set(0, 0, 0, VoxelType(1));
        map.set(0, 0, 1, VoxelType(2));
        let b = map.bounds().unwrap();
        let cells = slice_types(&map, &b, 0, 0);
        assert_eq!(cells, vec![Some(VoxelType(1)), Some(VoxelType(2))]);
    }
}
