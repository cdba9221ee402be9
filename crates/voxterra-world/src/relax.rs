//! Iterative smoothing of a height grid.
//!
//! Each pass visits every column in x-major order and compares it with its
//! four orthogonal neighbours. Whenever a pair differs by more than
//! [`MAX_HEIGHT_STEP`], the lower column is raised to sit one step below
//! the higher. Heights are never lowered.
//!
//! Changes are written in place, so later columns in the same pass already
//! see them. The step bound holds once a pass makes no change; if the pass
//! cap is reached first the grid may still contain steeper steps.

use tracing::warn;
use voxterra_core::constants::{DEFAULT_MAX_RELAX_PASSES, MAX_HEIGHT_STEP};

use crate::heightmap::HeightGrid;

/// Result of a relaxation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelaxOutcome {
    /// Passes that changed at least one column.
    pub passes: u32,
    /// Passes executed, including the final unchanged one.
    pub scanned: u32,
    /// A pass finished without changes before the cap.
    pub converged: bool,
}

/// Height-step relaxation with a pass cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relaxer {
    /// Upper bound on passes before giving up.
    pub max_passes: u32,
}

impl Default for Relaxer {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_RELAX_PASSES,
        }
    }
}

impl Relaxer {
    /// Create a relaxer with the given pass cap.
    pub const fn new(max_passes: u32) -> Self {
        Self { max_passes }
    }

    /// Relax until a pass changes nothing or the cap is reached.
    #[cfg_attr(feature = "profiling", tracing::instrument(level = "trace", skip_all))]
    pub fn relax(&self, grid: &mut HeightGrid) -> RelaxOutcome {
        let mut outcome = RelaxOutcome::default();
        while self.step(grid, &mut outcome) {}
        outcome
    }

    /// Run the next pass of a relaxation tracked by `outcome`.
    ///
    /// Returns false once the grid has converged or the cap is reached, in
    /// which case no pass was run.
    pub fn step(&self, grid: &mut HeightGrid, outcome: &mut RelaxOutcome) -> bool {
        if outcome.converged {
            return false;
        }
        if outcome.scanned >= self.max_passes {
            warn!(
                passes = outcome.passes,
                max_step = grid.max_step(),
                "Height relaxation hit its pass cap before converging"
            );
            return false;
        }

        outcome.scanned += 1;
        if Self::pass(grid) {
            outcome.passes += 1;
        } else {
            outcome.converged = true;
        }
        true
    }

    /// Run a single pass. Returns true if any column was raised.
    pub fn pass(grid: &mut HeightGrid) -> bool {
        let n = grid.size();
        let heights = grid.as_mut_slice();
        let mut changed = false;

        for x in 0..n {
            for z in 0..n {
                let here = x * n + z;
                if x > 0 {
                    changed |= clamp_pair(heights, here, here - n);
                }
                if x + 1 < n {
                    changed |= clamp_pair(heights, here, here + n);
                }
                if z > 0 {
                    changed |= clamp_pair(heights, here, here - 1);
                }
                if z + 1 < n {
                    changed |= clamp_pair(heights, here, here + 1);
                }
            }
        }

        changed
    }
}

/// Raise whichever of the two columns is too far below the other.
#[inline]
fn clamp_pair(heights: &mut [i32], a: usize, b: usize) -> bool {
    let (ha, hb) = (heights[a], heights[b]);
    if ha.abs_diff(hb) <= MAX_HEIGHT_STEP.unsigned_abs() {
        return false;
    }
    // The higher side is above the lower one, so stepping down cannot overflow.
    if ha > hb {
        heights[b] = ha - MAX_HEIGHT_STEP;
    } else {
        heights[a] = hb - MAX_HEIGHT_STEP;
    }
    true
}
