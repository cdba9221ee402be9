//! Dense column height grid and its noise-driven construction.

use rayon::prelude::*;
use voxterra_core::constants::{DEFAULT_HEIGHT_SCALE, DEFAULT_NOISE_SCALE};
use voxterra_core::{ColumnPos, ConfigError, Direction, Error, Result};

use crate::classify::NeighborHeights;
use crate::noise_field::{NoiseField, NoiseSettings};

/// Square grid of integer column heights, indexed `[x][z]`.
///
/// Reads outside the grid return `None`; neighbour queries substitute the
/// querying column's own height instead of wrapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightGrid {
    size: usize,
    heights: Vec<i32>,
}

impl HeightGrid {
    /// Create a grid of `size` x `size` columns all at `height`.
    pub fn new(size: usize, height: i32) -> Self {
        Self {
            size,
            heights: vec![height; size * size],
        }
    }

    /// Build a grid from a function of `(x, z)`.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> i32) -> Self {
        let mut heights = Vec::with_capacity(size * size);
        for x in 0..size {
            for z in 0..size {
                heights.push(f(x, z));
            }
        }
        Self { size, heights }
    }

    /// Columns per side.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, x: i32, z: i32) -> Option<usize> {
        let (x, z) = (usize::try_from(x).ok()?, usize::try_from(z).ok()?);
        (x < self.size && z < self.size).then_some(x * self.size + z)
    }

    /// Height at `(x, z)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, z: i32) -> Option<i32> {
        self.index(x, z).map(|i| self.heights[i])
    }

    /// Height at a column position.
    #[inline]
    pub fn at(&self, pos: ColumnPos) -> Option<i32> {
        self.get(pos.x, pos.z)
    }

    /// Overwrite the height at `(x, z)`.
    pub fn set(&mut self, x: i32, z: i32, height: i32) -> Result<()> {
        let i = self.index(x, z).ok_or_else(|| {
            Error::OutOfBounds(format!("column ({x}, {z}) in grid of size {}", self.size))
        })?;
        self.heights[i] = height;
        Ok(())
    }

    /// Heights of the eight neighbours of `(x, z)`.
    ///
    /// Missing neighbours at the grid edge read as the column's own height.
    pub fn neighbors(&self, x: i32, z: i32) -> Option<NeighborHeights> {
        let own = self.get(x, z)?;
        let center = ColumnPos::new(x, z);
        let mut heights = NeighborHeights::uniform(own);
        for dir in Direction::ALL {
            if let Some(h) = self.at(center.neighbor(dir)) {
                heights.set(dir, h);
            }
        }
        Some(heights)
    }

    /// Largest height difference between any two axis-adjacent columns.
    ///
    /// Saturates at `i32::MAX`.
    pub fn max_step(&self) -> i32 {
        let n = self.size;
        let mut max = 0u32;
        for x in 0..n {
            for z in 0..n {
                let h = self.heights[x * n + z];
                if x + 1 < n {
                    max = max.max(h.abs_diff(self.heights[(x + 1) * n + z]));
                }
                if z + 1 < n {
                    max = max.max(h.abs_diff(self.heights[x * n + z + 1]));
                }
            }
        }
        i32::try_from(max).unwrap_or(i32::MAX)
    }

    /// Iterate `(column, height)` in x-major order.
    pub fn columns(&self) -> impl Iterator<Item = (ColumnPos, i32)> + '_ {
        let n = self.size;
        self.heights
            .iter()
            .enumerate()
            .map(move |(i, &h)| (ColumnPos::new((i / n) as i32, (i % n) as i32), h))
    }

    /// Raw heights in x-major order.
    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.heights
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.heights
    }
}

/// Fills a [`HeightGrid`] from a [`NoiseField`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightmapBuilder {
    /// Height channel frequency and offset.
    pub noise: NoiseSettings,
    /// Multiplier on the [0, 1] noise value.
    pub height_scale: f64,
    /// Added after scaling.
    pub height_offset: f64,
}

impl Default for HeightmapBuilder {
    fn default() -> Self {
        Self {
            noise: NoiseSettings::height(DEFAULT_NOISE_SCALE),
            height_scale: DEFAULT_HEIGHT_SCALE,
            height_offset: 0.0,
        }
    }
}

impl HeightmapBuilder {
    /// Height of one column before smoothing.
    ///
    /// Rounds half to even, so 2.5 becomes 2 and 3.5 becomes 4.
    #[inline]
    pub fn height_at(&self, field: &NoiseField, x: i32, z: i32) -> i32 {
        let value = field.sample_channel(self.noise, x, z);
        (value * self.height_scale + self.height_offset).round_ties_even() as i32
    }

    /// Build a `world_size` x `world_size` grid. No smoothing is applied.
    #[cfg_attr(feature = "profiling", tracing::instrument(level = "trace", skip_all))]
    pub fn build(&self, world_size: i32, field: &NoiseField) -> Result<HeightGrid> {
        if world_size <= 0 {
            return Err(ConfigError::WorldSize(world_size).into());
        }
        Ok(self.build_sized(world_size as usize, field))
    }

    /// Build a grid of an already validated size.
    pub(crate) fn build_sized(&self, size: usize, field: &NoiseField) -> HeightGrid {
        let mut grid = HeightGrid::new(size, 0);
        self.fill(&mut grid, field);
        grid
    }

    /// Overwrite every column of `grid` with its noise height.
    pub fn fill(&self, grid: &mut HeightGrid, field: &NoiseField) {
        let size = grid.size();
        if size == 0 {
            return;
        }
        grid.as_mut_slice()
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(x, row)| {
                for (z, height) in row.iter_mut().enumerate() {
                    *height = self.height_at(field, x as i32, z as i32);
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_none() {
        let grid = HeightGrid::new(4, 3);
        assert_eq!(grid.get(0, 0), Some(3));
        assert_eq!(grid.get(3, 3), Some(3));
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, 4), None);
    }

    #[test]
    fn set_outside_grid_fails() {
        let mut grid = HeightGrid::new(2, 0);
        assert!(grid.set(1, 1, 5).is_ok());
        assert_eq!(grid.get(1, 1), Some(5));
        assert!(matches!(grid.set(2, 0, 1), Err(Error::OutOfBounds(_))));
    }

    #[test]
    fn edge_neighbors_use_own_height() {
        let grid = HeightGrid::from_fn(3, |x, z| (x * 10 + z) as i32);
        let n = grid.neighbors(0, 1).unwrap();

        // x = 0 has no west side
        assert_eq!(n.get(Direction::West), 1);
        assert_eq!(n.get(Direction::NorthWest), 1);
        assert_eq!(n.get(Direction::SouthWest), 1);
        assert_eq!(n.get(Direction::East), 11);
        assert_eq!(n.get(Direction::North), 2);
        assert_eq!(n.get(Direction::South), 0);
        assert_eq!(n.get(Direction::NorthEast), 12);
        assert_eq!(n.get(Direction::SouthEast), 10);
    }

    #[test]
    fn corner_neighbors_are_clamped() {
        let grid = HeightGrid::from_fn(2, |x, z| (x + z) as i32 + 4);
        let n = grid.neighbors(1, 1).unwrap();
        assert_eq!(n.get(Direction::North), 6);
        assert_eq!(n.get(Direction::NorthEast), 6);
        assert_eq!(n.get(Direction::East), 6);
        assert_eq!(n.get(Direction::SouthWest), 4);
        assert!(grid.neighbors(2, 0).is_none());
    }

    #[test]
    fn max_step_saturates_on_extreme_heights() {
        let grid = HeightGrid::from_fn(2, |x, _| if x == 0 { i32::MIN } else { i32::MAX });
        assert_eq!(grid.max_step(), i32::MAX);
        assert_eq!(HeightGrid::new(3, -7).max_step(), 0);
    }

    #[test]
    fn columns_iterate_x_major() {
        let grid = HeightGrid::from_fn(2, |x, z| (x * 2 + z) as i32);
        let cols: Vec<_> = grid.columns().collect();
        assert_eq!(cols[1], (ColumnPos::new(0, 1), 1));
        assert_eq!(cols[2], (ColumnPos::new(1, 0), 2));
    }

    #[test]
    fn build_rejects_non_positive_size() {
        let builder = HeightmapBuilder::default();
        let field = NoiseField::default();
        assert_eq!(
            builder.build(0, &field),
            Err(Error::InvalidConfig(ConfigError::WorldSize(0)))
        );
        assert!(builder.build(-3, &field).is_err());
    }

    #[test]
    fn build_matches_per_column_height() {
        let builder = HeightmapBuilder {
            height_offset: 2.0,
            ..Default::default()
        };
        let field = NoiseField::new(11);
        let grid = builder.build(16, &field).unwrap();

        assert_eq!(grid.size(), 16);
        for (pos, h) in grid.columns() {
            assert_eq!(h, builder.height_at(&field, pos.x, pos.z));
            assert!((2..=14).contains(&h));
        }
    }

    #[test]
    fn origin_height_is_half_scale() {
        // Noise is 0.5 at the lattice origin: 0.5 * 12 = 6.
        let builder = HeightmapBuilder::default();
        assert_eq!(builder.height_at(&NoiseField::new(99), 0, 0), 6);
    }
}
