//! Ordered biome palette indexed by noise.

use std::sync::Arc;

use voxterra_core::BiomeDefinition;

/// Ordered list of shared biome definitions.
///
/// Definitions are held behind [`Arc`] so placements can reference them
/// without copying.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BiomePalette {
    biomes: Vec<Arc<BiomeDefinition>>,
}

impl BiomePalette {
    /// Create an empty palette.
    pub const fn new() -> Self {
        Self { biomes: Vec::new() }
    }

    /// Append a biome.
    pub fn push(&mut self, biome: BiomeDefinition) {
        self.biomes.push(Arc::new(biome));
    }

    /// Number of biomes.
    #[inline]
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// True when no biome is defined.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    /// Iterate biomes in palette order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<BiomeDefinition>> {
        self.biomes.iter()
    }

    /// Palette slot for a noise value in [0, 1].
    ///
    /// Returns `None` for an empty palette.
    pub fn index_for(&self, value: f64) -> Option<usize> {
        let len = self.biomes.len();
        if len == 0 {
            return None;
        }
        let slot = (value * len as f64).floor();
        Some((slot.max(0.0) as usize).min(len - 1))
    }

    /// Biome for a noise value in [0, 1].
    pub fn pick(&self, value: f64) -> Option<&Arc<BiomeDefinition>> {
        self.index_for(value).map(|i| &self.biomes[i])
    }
}

impl FromIterator<BiomeDefinition> for BiomePalette {
    fn from_iter<I: IntoIterator<Item = BiomeDefinition>>(iter: I) -> Self {
        Self {
            biomes: iter.into_iter().map(Arc::new).collect(),
        }
    }
}
