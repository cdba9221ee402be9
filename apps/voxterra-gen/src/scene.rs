//! Placement sink that tallies what a real scene would instantiate.

use std::collections::BTreeMap;

use voxterra_core::{BiomeKind, ShapeClass};
use voxterra_world::{PlacementRecord, PlacementSink};

/// Counts placements by shape and biome instead of spawning objects.
#[derive(Debug, Default)]
pub struct SceneStats {
    pub total: usize,
    pub full: usize,
    pub slopes: usize,
    pub outer_corners: usize,
    pub inner_corners: usize,
    pub by_biome: BTreeMap<String, usize>,
    /// Lowest and highest voxel layer.
    pub layers: Option<(i32, i32)>,
    /// Times the scene was cleared.
    pub clears: usize,
}

impl SceneStats {
    /// Count for one shape class.
    pub const fn shape_count(&self, shape: ShapeClass) -> usize {
        match shape {
            ShapeClass::Full => self.full,
            ShapeClass::Slope => self.slopes,
            ShapeClass::OuterCorner => self.outer_corners,
            ShapeClass::InnerCorner => self.inner_corners,
        }
    }

    /// Count for one biome kind.
    pub fn biome_count(&self, kind: BiomeKind) -> usize {
        self.by_biome.get(&format!("{kind:?}")).copied().unwrap_or(0)
    }
}

impl PlacementSink for SceneStats {
    fn place(&mut self, record: PlacementRecord) {
        self.total += 1;
        match record.shape {
            ShapeClass::Full => self.full += 1,
            ShapeClass::Slope => self.slopes += 1,
            ShapeClass::OuterCorner => self.outer_corners += 1,
            ShapeClass::InnerCorner => self.inner_corners += 1,
        }
        *self
            .by_biome
            .entry(format!("{:?}", record.biome.kind))
            .or_default() += 1;

        let y = record.grid.y;
        self.layers = Some(match self.layers {
            Some((lo, hi)) => (lo.min(y), hi.max(y)),
            None => (y, y),
        });
    }

    fn clear(&mut self) {
        *self = Self {
            clears: self.clears + 1,
            ..Self::default()
        };
    }
}
