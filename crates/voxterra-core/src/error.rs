//! Error types for the generator.

use thiserror::Error;

/// Generator-wide error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration rejected before any work started
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Out of bounds access
    #[error("Out of bounds: {0}")]
    OutOfBounds(String),
}

/// Reasons a terrain configuration is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// World size must be positive
    #[error("world size must be greater than zero, got {0}")]
    WorldSize(i32),

    /// Block size must be positive and finite
    #[error("block size must be a positive finite number, got {0}")]
    BlockSize(f32),

    /// At least one fill layer is required
    #[error("terrain depth must be at least 1, got {0}")]
    TerrainDepth(i32),

    /// Column heights and fill layers must fit in an `i32`
    #[error("height range [{offset}, {offset} + {scale}] does not fit the voxel grid")]
    HeightRange { offset: f64, scale: f64 },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
