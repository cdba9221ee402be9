//! Voxterra Terrain Generator
//!
//! Generates a heightmap world with the demo biome palette and reports what
//! would be placed. Generation runs cooperatively: the main loop ticks the
//! builder the way a game loop would once per frame.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p voxterra-gen -- [OPTIONS]
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod params;
mod scene;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use voxterra_core::{
    AudioId, BiomeDefinition, BiomeKind, MaterialId, PrefabId, ProfileId, ShapeClass, ShapeSet,
};
use voxterra_world::{BiomePalette, GenerationStatus, TerrainBuilder};

use crate::params::GenParams;
use crate::scene::SceneStats;

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let params = GenParams::from_args();
    info!(
        "Generator config: size={}, seed={}, depth={}",
        params.size, params.seed, params.depth
    );

    let mut builder = TerrainBuilder::new(params.to_config(demo_palette()))?;
    let mut scene = SceneStats::default();

    builder.start();
    run_pass(&mut builder, &mut scene);

    for n in 0..params.regenerate {
        if !builder.request_regenerate(&mut scene) {
            warn!("Regenerate request {} dropped", n + 1);
            continue;
        }
        run_pass(&mut builder, &mut scene);
    }

    if let Some((lo, hi)) = scene.layers {
        info!("Voxel layers span {lo}..={hi}");
    }
    info!("Scene: {} voxels, cleared {} times", scene.total, scene.clears);
    info!(
        "  shapes: {} full, {} slopes, {} outer corners, {} inner corners",
        scene.shape_count(ShapeClass::Full),
        scene.shape_count(ShapeClass::Slope),
        scene.shape_count(ShapeClass::OuterCorner),
        scene.shape_count(ShapeClass::InnerCorner)
    );
    for kind in BiomeKind::ALL {
        match scene.biome_count(kind) {
            0 => {}
            count => info!("  {kind:?}: {count}"),
        }
    }

    Ok(())
}

/// Tick the builder until its pass completes, one tick per frame.
fn run_pass(builder: &mut TerrainBuilder, scene: &mut SceneStats) {
    let mut frame = 0u32;
    loop {
        frame += 1;
        match builder.tick(scene) {
            GenerationStatus::Idle => return,
            GenerationStatus::Suspended => {}
            GenerationStatus::Finished(summary) => {
                info!(
                    "Pass done in {frame} frames: {} placements, {} skipped, {} relax passes",
                    summary.placements, summary.skipped_columns, summary.relax.passes
                );
                return;
            }
        }
    }
}

/// One biome per kind, with distinct prefab, material, sound and profile handles.
fn demo_palette() -> BiomePalette {
    let mut palette = BiomePalette::new();
    for (id, kind) in (0u32..).zip(BiomeKind::ALL) {
        let shapes = ShapeSet {
            full: PrefabId(id * 4),
            slope: PrefabId(id * 4 + 1),
            corner: PrefabId(id * 4 + 2),
            inner_corner: PrefabId(id * 4 + 3),
        };
        palette.push(
            BiomeDefinition::new(format!("{kind:?}"), kind, shapes)
                .with_material(MaterialId(id))
                .with_step_sound(AudioId(id))
                .with_post_process(ProfileId(id)),
        );
    }
    palette
}

fn print_help() {
    eprintln!(
        "Voxterra Terrain Generator

USAGE:
    cargo run -p voxterra-gen -- [OPTIONS]

WORLD OPTIONS:
    --size <N>              Columns per side of the world (default: 64)
    --seed <N>              Noise seed (default: 0)
    --depth <N>             Fill layers below each surface voxel (default: 5)
    --block-size <F>        Voxel edge length in world units (default: 4.0)

NOISE OPTIONS:
    --height-scale <F>      Height noise multiplier (default: 12.0)
    --noise-scale <F>       Height noise frequency (default: 0.05)
    --height-offset <F>     Added to every column height (default: 0.0)
    --biome-scale <F>       Biome noise frequency (default: 0.03)
    --max-passes <N>        Relaxation pass cap (default: 100)

OTHER:
    --regenerate <N>        Clear and regenerate N more times
    -h, --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
