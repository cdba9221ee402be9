//! Core types for the Voxterra terrain generator.
//!
//! This crate provides the foundational types shared by the generator and
//! its consumers:
//! - Grid and column coordinates, compass directions
//! - Shape classes and Y-axis rotations
//! - Opaque resource handles and biome definitions
//! - Common error types

pub mod coords;
pub mod error;
pub mod types;

pub use coords::{ColumnPos, Direction, GridPos};
pub use error::{ConfigError, Error, Result};
pub use types::{
    AudioId, BiomeDefinition, BiomeKind, MaterialId, PrefabId, ProfileId, Rotation, ShapeClass,
    ShapeSet,
};

/// Generator-wide defaults.
pub mod constants {
    /// Columns per side of the square world grid.
    pub const DEFAULT_WORLD_SIZE: i32 = 64;
    /// Edge length of one voxel in world units.
    pub const DEFAULT_BLOCK_SIZE: f32 = 4.0;
    /// Number of fill layers emitted below each surface voxel.
    pub const DEFAULT_TERRAIN_DEPTH: i32 = 5;
    /// Multiplier applied to the [0, 1] height noise.
    pub const DEFAULT_HEIGHT_SCALE: f64 = 12.0;
    /// Frequency of the height noise.
    pub const DEFAULT_NOISE_SCALE: f64 = 0.05;
    /// Frequency of the biome noise.
    pub const DEFAULT_BIOME_NOISE_SCALE: f64 = 0.03;
    /// Offset added to biome noise coordinates so it decorrelates from height.
    pub const BIOME_NOISE_OFFSET: f64 = 100.0;
    /// Relaxation pass cap.
    pub const DEFAULT_MAX_RELAX_PASSES: u32 = 100;
    /// Largest allowed height step between axis-adjacent columns.
    pub const MAX_HEIGHT_STEP: i32 = 1;
}
