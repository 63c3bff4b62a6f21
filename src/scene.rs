use loam_voxel::{Palette, VoxelMap, VoxelType};

/// Procedural demo scenes for exercising the baker from the command line.
/// Every builder is deterministic for a given size and seed.
pub fn default_palette() -> Palette {
    let mut palette = Palette::new();
    palette.get_or_create([110, 84, 60, 255], false); // soil
    palette.get_or_create([96, 140, 72, 255], false); // moss
    palette.get_or_create([150, 150, 158, 255], false); // stone
    palette.get_or_create([140, 190, 230, 140], true); // glass
    palette
}

pub fn solid_cube(n: i32, t: VoxelType) -> VoxelMap {
    let mut map = VoxelMap::new();
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                map.set(x, y, z, t);
            }
        }
    }
    map
}

pub fn sphere(radius: i32, t: VoxelType) -> VoxelMap {
    let mut map = VoxelMap::new();
    let r2 = radius * radius;
    for z in -radius..=radius {
        for y in -radius..=radius {
            for x in -radius..=radius {
                if x * x + y * y + z * z <= r2 {
                    map.set(x, y, z, t);
                }
            }
        }
    }
    map
}

pub fn line(len: i32, t: VoxelType) -> VoxelMap {
    let mut map = VoxelMap::new();
    for x in 0..len {
        map.set(x, 0, 0, t);
    }
    map
}

/// Random fill of an n^3 region with a mix of types, driven by a fixed LCG so
/// reruns produce the same scene.
pub fn noise(n: i32, seed: u64) -> VoxelMap {
    let mut map = VoxelMap::new();
    let mut r = seed;
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                r = r.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                if (r >> 33) & 3 == 0 {
                    let t = VoxelType(1 + ((r >> 35) % 3) as u16);
                    map.set(x, y, z, t);
                }
            }
        }
    }
    map
}
