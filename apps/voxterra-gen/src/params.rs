//! Command line parameters.

use voxterra_core::constants::{
    DEFAULT_BIOME_NOISE_SCALE, DEFAULT_BLOCK_SIZE, DEFAULT_HEIGHT_SCALE, DEFAULT_MAX_RELAX_PASSES,
    DEFAULT_NOISE_SCALE, DEFAULT_TERRAIN_DEPTH, DEFAULT_WORLD_SIZE,
};
use voxterra_world::{BiomePalette, TerrainConfig, WorldSeed};

/// Generation parameters (from CLI or defaults).
#[derive(Debug, Clone, PartialEq)]
pub struct GenParams {
    pub size: i32,
    pub seed: WorldSeed,
    pub depth: i32,
    pub block_size: f32,
    pub height_scale: f64,
    pub noise_scale: f64,
    pub height_offset: f64,
    pub biome_scale: f64,
    pub max_passes: u32,
    /// Extra passes to run after the first one.
    pub regenerate: u32,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_WORLD_SIZE,
            seed: 0,
            depth: DEFAULT_TERRAIN_DEPTH,
            block_size: DEFAULT_BLOCK_SIZE,
            height_scale: DEFAULT_HEIGHT_SCALE,
            noise_scale: DEFAULT_NOISE_SCALE,
            height_offset: 0.0,
            biome_scale: DEFAULT_BIOME_NOISE_SCALE,
            max_passes: DEFAULT_MAX_RELAX_PASSES,
            regenerate: 0,
        }
    }
}

/// Parse the value following a flag, advancing the cursor only on success.
fn take<T: std::str::FromStr>(args: &[String], i: &mut usize, slot: &mut T) {
    if let Some(Ok(v)) = args.get(*i + 1).map(|s| s.parse()) {
        *slot = v;
        *i += 1;
    }
}

impl GenParams {
    /// Parse generation parameters from command line arguments.
    pub fn from_args() -> Self {
        Self::parse(&std::env::args().collect::<Vec<_>>())
    }

    /// Parse from an argument list whose first entry is the program name.
    ///
    /// Unknown flags and unparsable values are ignored.
    pub fn parse(args: &[String]) -> Self {
        let mut params = Self::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--size" => take(args, &mut i, &mut params.size),
                "--seed" => take(args, &mut i, &mut params.seed),
                "--depth" => take(args, &mut i, &mut params.depth),
                "--block-size" => take(args, &mut i, &mut params.block_size),
                "--height-scale" => take(args, &mut i, &mut params.height_scale),
                "--noise-scale" => take(args, &mut i, &mut params.noise_scale),
                "--height-offset" => take(args, &mut i, &mut params.height_offset),
                "--biome-scale" => take(args, &mut i, &mut params.biome_scale),
                "--max-passes" => take(args, &mut i, &mut params.max_passes),
                "--regenerate" => take(args, &mut i, &mut params.regenerate),
                _ => {}
            }
            i += 1;
        }

        params
    }

    /// Terrain configuration for these parameters.
    pub fn to_config(&self, biome_palette: BiomePalette) -> TerrainConfig {
        TerrainConfig {
            seed: self.seed,
            world_size: self.size,
            block_size: self.block_size,
            terrain_depth: self.depth,
            height_scale: self.height_scale,
            noise_scale: self.noise_scale,
            height_offset: self.height_offset,
            biome_noise_scale: self.biome_scale,
            biome_palette,
            max_relax_passes: self.max_passes,
        }
    }
}
