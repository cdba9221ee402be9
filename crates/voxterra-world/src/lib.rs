//! Heightmap terrain generation for the Voxterra engine.
//!
//! A pass fills a square height grid from Perlin noise, relaxes it until no
//! two axis-adjacent columns differ by more than one step, then emits one
//! [`PlacementRecord`] per voxel: fill layers as full blocks and a surface
//! voxel whose shape and rotation come from its eight neighbours.

pub mod biome;
pub mod classify;
pub mod generation;
pub mod heightmap;
pub mod noise_field;
pub mod placement;
pub mod relax;

pub use biome::BiomePalette;
pub use classify::{classify, NeighborHeights};
pub use generation::{
    generate, GenerationStatus, GenerationSummary, TerrainBuilder, TerrainConfig,
};
pub use heightmap::{HeightGrid, HeightmapBuilder};
pub use noise_field::{NoiseField, NoiseSettings};
pub use placement::{PlacementRecord, PlacementSink};
pub use relax::{RelaxOutcome, Relaxer};

/// Seed for the Perlin noise behind heights and biomes.
pub type WorldSeed = u32;
