//! Placement records and the sink that instantiates them.

use std::sync::Arc;

use glam::Vec3;
use voxterra_core::{BiomeDefinition, GridPos, MaterialId, PrefabId, Rotation, ShapeClass};

/// One voxel to instantiate.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementRecord {
    /// Voxel position in grid units.
    pub grid: GridPos,
    /// World-space position (`grid * block_size`).
    pub position: Vec3,
    pub shape: ShapeClass,
    pub rotation: Rotation,
    pub biome: Arc<BiomeDefinition>,
    /// The voxel never moves after placement.
    pub is_static: bool,
}

impl PlacementRecord {
    /// Prefab handle for this record's shape in its biome.
    #[inline]
    pub fn prefab(&self) -> PrefabId {
        self.biome.shapes.get(self.shape)
    }

    /// Material override, if the biome has one.
    #[inline]
    pub fn material(&self) -> Option<MaterialId> {
        self.biome.material
    }

    /// True for the top voxel of a column.
    #[inline]
    pub fn is_surface(&self, column_height: i32) -> bool {
        self.grid.y == column_height
    }
}

/// Receives placements and owns whatever they instantiate.
pub trait PlacementSink {
    /// Instantiate one placement.
    fn place(&mut self, record: PlacementRecord);

    /// Destroy everything placed so far.
    fn clear(&mut self);
}

impl PlacementSink for Vec<PlacementRecord> {
    fn place(&mut self, record: PlacementRecord) {
        self.push(record);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl<S: PlacementSink + ?Sized> PlacementSink for &mut S {
    fn place(&mut self, record: PlacementRecord) {
        (**self).place(record);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxterra_core::{BiomeKind, ShapeSet};

    fn record(shape: ShapeClass) -> PlacementRecord {
        let shapes = ShapeSet {
            full: PrefabId(10),
            slope: PrefabId(11),
            corner: PrefabId(12),
            inner_corner: PrefabId(13),
        };
        let biome = BiomeDefinition::new("eden", BiomeKind::EdenGrass, shapes)
            .with_material(MaterialId(5));
        PlacementRecord {
            grid: GridPos::new(1, 2, 3),
            position: GridPos::new(1, 2, 3).to_world(4.0),
            shape,
            rotation: Rotation::Deg180,
            biome: Arc::new(biome),
            is_static: true,
        }
    }

    #[test]
    fn prefab_follows_shape() {
        assert_eq!(record(ShapeClass::Slope).prefab(), PrefabId(11));
        assert_eq!(record(ShapeClass::InnerCorner).prefab(), PrefabId(13));
        assert_eq!(record(ShapeClass::Full).material(), Some(MaterialId(5)));
    }

    #[test]
    fn vec_sink_collects_and_clears() {
        let mut sink: Vec<PlacementRecord> = Vec::new();
        sink.place(record(ShapeClass::Full));
        sink.place(record(ShapeClass::OuterCorner));
        assert_eq!(sink.len(), 2);

        PlacementSink::clear(&mut sink);
        assert!(sink.is_empty());
    }
}
