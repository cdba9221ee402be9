//! Surface shape selection from neighbour heights.
//!
//! A surface voxel looks at its four orthogonal and four diagonal
//! neighbours. A neighbour is *low* when its column is strictly lower than
//! the voxel's own. The first matching rule wins:
//!
//! 1. Outer corner: two adjacent orthogonal sides are low.
//! 2. Slope: any single orthogonal side is low.
//! 3. Inner corner: no orthogonal side is low but a diagonal is.
//! 4. Full block.
//!
//! Real terrain often satisfies several rules at once, so the order of the
//! tables below is part of the output.

use voxterra_core::{Direction, Rotation, ShapeClass};

/// Heights of the eight neighbours of a column, indexed by [`Direction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeighborHeights([i32; 8]);

impl NeighborHeights {
    /// All eight neighbours at the same height.
    #[inline]
    pub const fn uniform(height: i32) -> Self {
        Self([height; 8])
    }

    /// Build from heights in [`Direction::ALL`] order.
    #[inline]
    pub const fn from_array(heights: [i32; 8]) -> Self {
        Self(heights)
    }

    /// Height in the given direction.
    #[inline]
    pub const fn get(&self, dir: Direction) -> i32 {
        self.0[dir.index()]
    }

    /// Replace the height in the given direction.
    #[inline]
    pub fn set(&mut self, dir: Direction, height: i32) {
        self.0[dir.index()] = height;
    }

    /// Copy with one direction replaced.
    #[inline]
    #[must_use]
    pub fn with(mut self, dir: Direction, height: i32) -> Self {
        self.set(dir, height);
        self
    }
}

const OUTER_CORNER_RULES: [(Direction, Direction, Rotation); 4] = [
    (Direction::North, Direction::East, Rotation::Deg270),
    (Direction::South, Direction::East, Rotation::Deg0),
    (Direction::South, Direction::West, Rotation::Deg90),
    (Direction::North, Direction::West, Rotation::Deg180),
];

const SLOPE_RULES: [(Direction, Rotation); 4] = [
    (Direction::North, Rotation::Deg180),
    (Direction::South, Rotation::Deg0),
    (Direction::East, Rotation::Deg270),
    (Direction::West, Rotation::Deg90),
];

const INNER_CORNER_RULES: [(Direction, Rotation); 4] = [
    (Direction::NorthEast, Rotation::Deg270),
    (Direction::SouthEast, Rotation::Deg0),
    (Direction::SouthWest, Rotation::Deg90),
    (Direction::NorthWest, Rotation::Deg180),
];

/// Pick the surface shape and Y rotation for a column at `height`.
pub fn classify(height: i32, neighbors: &NeighborHeights) -> (ShapeClass, Rotation) {
    let low = |dir: Direction| neighbors.get(dir) < height;

    if let Some(&(_, _, rot)) = OUTER_CORNER_RULES
        .iter()
        .find(|(a, b, _)| low(*a) && low(*b))
    {
        return (ShapeClass::OuterCorner, rot);
    }

    if let Some(&(_, rot)) = SLOPE_RULES.iter().find(|(dir, _)| low(*dir)) {
        return (ShapeClass::Slope, rot);
    }

    if let Some(&(_, rot)) = INNER_CORNER_RULES.iter().find(|(dir, _)| low(*dir)) {
        return (ShapeClass::InnerCorner, rot);
    }

    (ShapeClass::Full, Rotation::Deg0)
}
