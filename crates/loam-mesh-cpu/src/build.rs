use loam_geom::Vec3;
use loam_voxel::{Palette, Rgba};

use crate::BakedFace;
use crate::face::Face;

/// Growable geometry buffers for one opacity class: positions, normals,
/// per-vertex colors, and triangle indices, ready for upload by the
/// rendering layer.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub col: Vec<u8>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    pub fn add_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3, n: Vec3, rgba: Rgba) {
        let base = self.pos.len() as u32 / 3;
        let mut vs = [a, d, c, b];
        let e1 = vs[1] - vs[0];
        let e2 = vs[2] - vs[0];
        // Flip the winding when it disagrees with the face normal.
        if e1.cross(e2).dot(n) < 0.0 {
            vs.swap(1, 3);
        }
        for v in vs {
            self.pos.extend_from_slice(&[v.x, v.y, v.z]);
            self.norm.extend_from_slice(&[n.x, n.y, n.z]);
            self.col
                .extend_from_slice(&[rgba[0], rgba[1], rgba[2], rgba[3]]);
        }
        self.idx
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Emit a face-aligned rectangle: `origin` is the min corner on the face
    /// plane, `u1`/`v1` the world-unit extents along the face's u/v axes.
    pub fn add_face_rect(&mut self, face: Face, origin: Vec3, u1: f32, v1: f32, rgba: Rgba) {
        let n = face.normal();
        let (a, b, c, d) = match face {
            Face::PosY => (
                origin,
                Vec3::new(origin.x + u1, origin.y, origin.z),
                Vec3::new(origin.x + u1, origin.y, origin.z + v1),
                Vec3::new(origin.x, origin.y, origin.z + v1),
            ),
            Face::NegY => (
                Vec3::new(origin.x, origin.y, origin.z + v1),
                Vec3::new(origin.x + u1, origin.y, origin.z + v1),
                Vec3::new(origin.x + u1, origin.y, origin.z),
                origin,
            ),
            Face::PosX => (
                Vec3::new(origin.x, origin.y + v1, origin.z + u1),
                Vec3::new(origin.x, origin.y + v1, origin.z),
                origin,
                Vec3::new(origin.x, origin.y, origin.z + u1),
            ),
            Face::NegX => (
                Vec3::new(origin.x, origin.y + v1, origin.z),
                Vec3::new(origin.x, origin.y + v1, origin.z + u1),
                Vec3::new(origin.x, origin.y, origin.z + u1),
                origin,
            ),
            Face::PosZ => (
                Vec3::new(origin.x + u1, origin.y + v1, origin.z),
                Vec3::new(origin.x, origin.y + v1, origin.z),
                origin,
                Vec3::new(origin.x + u1, origin.y, origin.z),
            ),
            Face::NegZ => (
                Vec3::new(origin.x, origin.y + v1, origin.z),
                Vec3::new(origin.x + u1, origin.y + v1, origin.z),
                Vec3::new(origin.x + u1, origin.y, origin.z),
                origin,
            ),
        };
        self.add_quad(a, b, c, d, n, rgba);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }
}

/// Assembled buffers, partitioned by opacity class so the rendering layer can
/// draw opaque geometry first and blend the rest.
#[derive(Default, Clone, Debug)]
pub struct BakedGeometry {
    pub opaque: MeshBuild,
    pub transparent: MeshBuild,
}

impl BakedGeometry {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.opaque.vertex_count() + self.transparent.vertex_count()
    }
}

/// Turn a face list into renderable buffers. `voxel_size` scales grid units
/// into world units and has no effect on topology or face count.
pub fn assemble_geometry(faces: &[BakedFace], palette: &Palette, voxel_size: f32) -> BakedGeometry {
    let mut geo = BakedGeometry::default();
    for f in faces {
        let origin = Vec3::new(f.x as f32, f.y as f32, f.z as f32) * voxel_size;
        let u1 = f.w as f32 * voxel_size;
        let v1 = f.h as f32 * voxel_size;
        let rgba = palette.color(f.voxel);
        let build = if palette.is_transparent(f.voxel) {
            &mut geo.transparent
        } else {
            &mut geo.opaque
        };
        build.add_face_rect(f.face, origin, u1, v1, rgba);
    }
    geo
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_voxel::VoxelType;

    fn unit_face(face: Face) -> BakedFace {
        BakedFace {
            x: 0,
            y: 0,
            z: 0,
            w: 1,
            h: 1,
            face,
            voxel: VoxelType(1),
        }
    }

    #[test]
    fn quad_is_two_triangles_four_vertices() {
        let mut palette = Palette::new();
        palette.get_or_create([10, 20, 30, 255], false);
        let geo = assemble_geometry(&[unit_face(Face::PosY)], &palette, 1.0);
        assert_eq!(geo.opaque.vertex_count(), 4);
        assert_eq!(geo.opaque.idx.len(), 6);
        assert!(geo.transparent.is_empty());
    }

    #[test]
    fn winding_agrees_with_normal_for_every_face() {
        let palette = Palette::new();
        for face in Face::ALL {
            let geo = assemble_geometry(&[unit_face(face)], &palette, 1.0);
            let mb = &geo.opaque;
            let n = face.normal();
            for t in 0..2 {
                let i0 = mb.idx[t * 3] as usize * 3;
                let i1 = mb.idx[t * 3 + 1] as usize * 3;
                let i2 = mb.idx[t * 3 + 2] as usize * 3;
                let a = Vec3::new(mb.pos[i0], mb.pos[i0 + 1], mb.pos[i0 + 2]);
                let b = Vec3::new(mb.pos[i1], mb.pos[i1 + 1], mb.pos[i1 + 2]);
                let c = Vec3::new(mb.pos[i2], mb.pos[i2 + 1], mb.pos[i2 + 2]);
                assert!((b - a).cross(c - a).dot(n) > 0.0, "face {:?} wound backwards", face);
            }
        }
    }

    #[test]
    fn transparent_types_land_in_their_own_bucket() {
        let mut palette = Palette::new();
        let glass = palette.get_or_create([200, 220, 255, 120], true);
        let mut f = unit_face(Face::PosX);
        f.voxel = glass;
        let geo = assemble_geometry(&[f], &palette, 1.0);
        assert!(geo.opaque.is_empty());
        assert_eq!(geo.transparent.vertex_count(), 4);
    }

    #[test]
    fn voxel_size_scales_positions_only() {
        let palette = Palette::new();
        let one = assemble_geometry(&[unit_face(Face::PosZ)], &palette, 1.0);
        let two = assemble_geometry(&[unit_face(Face::PosZ)], &palette, 2.0);
        assert_eq!(one.opaque.idx, two.opaque.idx);
        for (a, b) in one.opaque.pos.iter().zip(two.opaque.pos.iter()) {
            assert_eq!(a * 2.0, *b);
        }
    }
}
