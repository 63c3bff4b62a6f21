use loam_voxel::VoxelType;

use crate::mask::SliceMask;

/// Merged rectangle in mask space: `(u, v)` is the top-left cell, `w`/`h` the
/// span along the scan row / column directions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MaskRect {
    pub u: usize,
    pub v: usize,
    pub w: usize,
    pub h: usize,
    pub voxel: VoxelType,
}

/// Greedy rectangle cover of the non-empty mask cells. Scans row-major, grows
/// each rectangle rightward while the type matches, then downward while every
/// cell of the candidate row matches at the established width. Every non-empty
/// cell ends up in exactly one rectangle, and the scan order makes the output
/// deterministic for a given mask.
#[inline]
pub fn merge_rects(
    width: usize,
    height: usize,
    cells: &[Option<VoxelType>],
    mut emit: impl FnMut(MaskRect),
) {
    debug_assert_eq!(cells.len(), width * height);
    let mut used = vec![false; width * height];
    for v in 0..height {
        for u in 0..width {
            let idx = v * width + u;
            let code = cells[idx];
            if code.is_none() || used[idx] {
                continue;
            }
            let mut w = 1;
            while u + w < width && cells[v * width + (u + w)] == code && !used[v * width + (u + w)]
            {
                w += 1;
            }
            let mut h = 1;
            'expand: while v + h < height {
                for i in 0..w {
                    let j = (v + h) * width + (u + i);
                    if cells[j] != code || used[j] {
                        break 'expand;
                    }
                }
                h += 1;
            }
            for vv in 0..h {
                for uu in 0..w {
                    let j = (v + vv) * width + (u + uu);
                    debug_assert!(!used[j], "merger claimed cell ({}, {}) twice", u + uu, v + vv);
                    used[j] = true;
                }
            }
            emit(MaskRect {
                u,
                v,
                w,
                h,
                voxel: code.unwrap(),
            });
        }
    }
}

impl SliceMask {
    /// Collecting form of [`merge_rects`] over this mask.
    pub fn merged_rects(&self) -> Vec<MaskRect> {
        let mut out = Vec::new();
        merge_rects(self.width, self.height, self.cells(), |r| out.push(r));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&[u16]]) -> SliceMask {
        let height = rows.len();
        let width = rows[0].len();
        let mut m = SliceMask::new(width, height);
        for (v, row) in rows.iter().enumerate() {
            for (u, &t) in row.iter().enumerate() {
                if t != 0 {
                    m.set(u, v, Some(VoxelType(t)));
                }
            }
        }
        m
    }

    #[test]
    fn full_mask_merges_to_one_rect() {
        let m = mask_from_rows(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]);
        let rects = m.merged_rects();
        assert_eq!(
            rects,
            vec![MaskRect {
                u: 0,
                v: 0,
                w: 3,
                h: 3,
                voxel: VoxelType(1)
            }]
        );
    }

    #[test]
    fn colinear_cells_fuse_into_one_strip() {
        let m = mask_from_rows(&[&[1, 1, 1]]);
        let rects = m.merged_rects();
        assert_eq!(rects.len(), 1);
        assert_eq!((rects[0].w, rects[0].h), (3, 1));
    }

    #[test]
    fn type_boundary_splits_rects() {
        let m = mask_from_rows(&[&[1, 1, 2], &[1, 1, 2]]);
        let rects = m.merged_rects();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].voxel, VoxelType(1));
        assert_eq!((rects[0].w, rects[0].h), (2, 2));
        assert_eq!(rects[1].voxel, VoxelType(2));
        assert_eq!((rects[1].w, rects[1].h), (1, 2));
    }

    #[test]
    fn l_shape_covers_exactly_without_overlap() {
        // Row growth is capped by the established width, so the L splits.
        let m = mask_from_rows(&[&[1, 1], &[1, 0]]);
        let rects = m.merged_rects();
        let area: usize = rects.iter().map(|r| r.w * r.h).sum();
        assert_eq!(area, 3);
        assert_eq!(rects.len(), 2);
    }

    #[test]
    fn empty_mask_emits_nothing() {
        let m = SliceMask::new(4, 4);
        assert!(m.merged_rects().is_empty());
    }

    #[test]
    fn checkerboard_stays_per_cell() {
        let m = mask_from_rows(&[&[1, 0, 1], &[0, 1, 0], &[1, 0, 1]]);
        let rects = m.merged_rects();
        assert_eq!(rects.len(), 5);
        assert!(rects.iter().all(|r| r.w == 1 && r.h == 1));
    }
}
