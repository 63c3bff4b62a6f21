use std::error::Error;

use clap::{Parser, ValueEnum};

use loam_mesh_cpu::BakeStrategy;
use loam_voxel::{Palette, VoxelType};

mod layer;
mod scene;

use layer::{Layer, LayerSet};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Shape {
    Cube,
    Sphere,
    Line,
    Noise,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Strategy {
    Greedy,
    Culled,
}

impl From<Strategy> for BakeStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Greedy => BakeStrategy::Greedy,
            Strategy::Culled => BakeStrategy::Culled,
        }
    }
}

/// Bake a procedural voxel scene and report the resulting geometry.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scene to generate
    #[arg(long, value_enum, default_value_t = Shape::Cube)]
    shape: Shape,

    /// Edge length (cube/noise), radius (sphere), or length (line)
    #[arg(long, default_value_t = 8)]
    size: i32,

    /// Face generation strategy
    #[arg(long, value_enum, default_value_t = Strategy::Greedy)]
    strategy: Strategy,

    /// World-space edge length of one voxel
    #[arg(long, default_value_t = 1.0)]
    voxel_size: f32,

    /// Seed for the noise shape
    #[arg(long, default_value_t = 0xC0FFEE)]
    seed: u64,

    /// Optional palette TOML; falls back to the built-in demo palette
    #[arg(long)]
    palette: Option<std::path::PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let palette = match &args.palette {
        Some(path) => Palette::from_path(path)?,
        None => scene::default_palette(),
    };

    let voxels = match args.shape {
        Shape::Cube => scene::solid_cube(args.size, VoxelType(1)),
        Shape::Sphere => scene::sphere(args.size, VoxelType(3)),
        Shape::Line => scene::line(args.size, VoxelType(2)),
        Shape::Noise => scene::noise(args.size, args.seed),
    };

    let name = format!("{:?}", args.shape).to_lowercase();
    let mut layers = LayerSet::new();
    let mut layer = Layer::new(&name);
    for ((x, y, z), t) in voxels.iter() {
        layer.set_voxel(x, y, z, t);
    }
    layer.bake(&palette, args.strategy.into(), args.voxel_size);
    layers
        .add(layer)
        .ok_or("could not register the scene layer")?;

    for layer in layers.iter() {
        let result = layer
            .baked()
            .ok_or("bake produced no result for the layer")?;
        let m = &result.metadata;
        println!(
            "layer '{}': {} voxels -> {} faces, {} vertices ({:?})",
            layer.name, m.voxel_count, m.face_count, m.vertex_count, result.strategy
        );
        if let Some(bb) = &result.aabb {
            println!(
                "  bounds: ({:.2}, {:.2}, {:.2}) .. ({:.2}, {:.2}, {:.2})",
                bb.min.x, bb.min.y, bb.min.z, bb.max.x, bb.max.y, bb.max.z
            );
        }
        let opaque = result.geometry.opaque.vertex_count();
        let transparent = result.geometry.transparent.vertex_count();
        println!("  opaque vertices: {opaque}, transparent vertices: {transparent}");
    }
    Ok(())
}
