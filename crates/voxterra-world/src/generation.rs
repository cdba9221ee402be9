//! Terrain generation passes.
//!
//! A pass builds the heightmap, relaxes it, then walks every column and
//! emits placements. [`TerrainBuilder`] runs a pass cooperatively: each call
//! to [`TerrainBuilder::tick`] does work up to the next suspension point and
//! returns, so a host loop stays responsive.

use std::sync::Arc;

use tracing::{debug, info, trace};
use voxterra_core::constants::{
    DEFAULT_BIOME_NOISE_SCALE, DEFAULT_BLOCK_SIZE, DEFAULT_HEIGHT_SCALE, DEFAULT_MAX_RELAX_PASSES,
    DEFAULT_NOISE_SCALE, DEFAULT_TERRAIN_DEPTH, DEFAULT_WORLD_SIZE,
};
use voxterra_core::{BiomeDefinition, ConfigError, GridPos, Result, Rotation, ShapeClass};

use crate::biome::BiomePalette;
use crate::classify::classify;
use crate::heightmap::{HeightGrid, HeightmapBuilder};
use crate::noise_field::{NoiseField, NoiseSettings};
use crate::placement::{PlacementRecord, PlacementSink};
use crate::relax::{RelaxOutcome, Relaxer};
use crate::WorldSeed;

/// Suspend after every this many relaxation passes.
const RELAX_PASSES_PER_TICK: u32 = 5;

/// Suspend after every emitted row whose index is a multiple of this.
const EMIT_ROW_STRIDE: usize = 2;

/// Terrain generator configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainConfig {
    /// Seed for the height and biome noise.
    pub seed: WorldSeed,
    /// Columns per side of the square world.
    pub world_size: i32,
    /// Edge length of one voxel in world units.
    pub block_size: f32,
    /// Fill layers placed below each surface voxel.
    pub terrain_depth: i32,
    /// Multiplier applied to the [0, 1] height noise.
    pub height_scale: f64,
    /// Frequency of the height noise.
    pub noise_scale: f64,
    /// Added to every column height before rounding.
    pub height_offset: f64,
    /// Frequency of the biome noise.
    pub biome_noise_scale: f64,
    /// Biomes selected by noise. Columns are skipped when empty.
    pub biome_palette: BiomePalette,
    /// Relaxation pass cap.
    pub max_relax_passes: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            world_size: DEFAULT_WORLD_SIZE,
            block_size: DEFAULT_BLOCK_SIZE,
            terrain_depth: DEFAULT_TERRAIN_DEPTH,
            height_scale: DEFAULT_HEIGHT_SCALE,
            noise_scale: DEFAULT_NOISE_SCALE,
            height_offset: 0.0,
            biome_noise_scale: DEFAULT_BIOME_NOISE_SCALE,
            biome_palette: BiomePalette::new(),
            max_relax_passes: DEFAULT_MAX_RELAX_PASSES,
        }
    }
}

impl TerrainConfig {
    /// Reject configurations no pass can run with.
    pub fn validate(&self) -> Result<()> {
        if self.world_size <= 0 {
            return Err(ConfigError::WorldSize(self.world_size).into());
        }
        if !(self.block_size.is_finite() && self.block_size > 0.0) {
            return Err(ConfigError::BlockSize(self.block_size).into());
        }
        if self.terrain_depth < 1 {
            return Err(ConfigError::TerrainDepth(self.terrain_depth).into());
        }
        if !self.heights_fit() {
            return Err(ConfigError::HeightRange {
                offset: self.height_offset,
                scale: self.height_scale,
            }
            .into());
        }
        Ok(())
    }

    /// Every column height and its lowest fill layer fit in an `i32`.
    fn heights_fit(&self) -> bool {
        let top = self.height_offset + self.height_scale;
        let (low, high) = (self.height_offset.min(top), self.height_offset.max(top));
        self.height_offset.is_finite()
            && top.is_finite()
            && low.floor() - f64::from(self.terrain_depth) >= f64::from(i32::MIN)
            && high.ceil() <= f64::from(i32::MAX)
    }

    /// Heightmap builder for the height channel.
    pub const fn heightmap_builder(&self) -> HeightmapBuilder {
        HeightmapBuilder {
            noise: NoiseSettings::height(self.noise_scale),
            height_scale: self.height_scale,
            height_offset: self.height_offset,
        }
    }

    /// Relaxer with this config's pass cap.
    pub const fn relaxer(&self) -> Relaxer {
        Relaxer::new(self.max_relax_passes)
    }

    /// Biome noise channel.
    pub const fn biome_noise(&self) -> NoiseSettings {
        NoiseSettings::biome(self.biome_noise_scale)
    }
}

/// Statistics of a completed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Placements handed to the sink.
    pub placements: usize,
    /// Columns that produced placements.
    pub columns: usize,
    /// Columns skipped for lack of a biome.
    pub skipped_columns: usize,
    /// How relaxation ended.
    pub relax: RelaxOutcome,
    /// Ticks spent, including the final one.
    pub ticks: u32,
}

/// What a call to [`TerrainBuilder::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    /// No pass is in flight.
    Idle,
    /// Work was done and the pass will resume on the next tick.
    Suspended,
    /// The pass completed during this tick.
    Finished(GenerationSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Previous output was just cleared; wait one tick before computing.
    Cleared,
    Heightmap,
    Relax,
    Emit { row: usize },
}

enum Advance {
    Continue,
    Suspend,
    Done,
}

/// State of one in-flight pass.
struct GenerationTask {
    step: Step,
    grid: HeightGrid,
    relax: RelaxOutcome,
    placements: usize,
    columns: usize,
    skipped_columns: usize,
    ticks: u32,
}

impl GenerationTask {
    fn new(step: Step) -> Self {
        Self {
            step,
            grid: HeightGrid::new(0, 0),
            relax: RelaxOutcome::default(),
            placements: 0,
            columns: 0,
            skipped_columns: 0,
            ticks: 0,
        }
    }

    const fn summary(&self) -> GenerationSummary {
        GenerationSummary {
            placements: self.placements,
            columns: self.columns,
            skipped_columns: self.skipped_columns,
            relax: self.relax,
            ticks: self.ticks,
        }
    }

    fn advance<S: PlacementSink + ?Sized>(
        &mut self,
        config: &TerrainConfig,
        field: &NoiseField,
        sink: &mut S,
    ) -> Advance {
        match self.step {
            Step::Cleared => {
                self.step = Step::Heightmap;
                Advance::Suspend
            }
            Step::Heightmap => {
                self.grid = config
                    .heightmap_builder()
                    .build_sized(config.world_size as usize, field);
                debug!(size = config.world_size, "Heightmap filled");
                self.step = Step::Relax;
                Advance::Continue
            }
            Step::Relax => self.relax_pass(config),
            Step::Emit { row } => {
                self.emit_row(config, field, row, sink);
                let next = row + 1;
                if next >= self.grid.size() {
                    Advance::Done
                } else {
                    self.step = Step::Emit { row: next };
                    if row % EMIT_ROW_STRIDE == 0 {
                        Advance::Suspend
                    } else {
                        Advance::Continue
                    }
                }
            }
        }
    }

    fn relax_pass(&mut self, config: &TerrainConfig) -> Advance {
        if !config.relaxer().step(&mut self.grid, &mut self.relax) {
            self.step = Step::Emit { row: 0 };
            return Advance::Continue;
        }
        if self.relax.converged {
            debug!(passes = self.relax.passes, "Heightmap relaxed");
        }

        if self.relax.scanned % RELAX_PASSES_PER_TICK == 0 {
            Advance::Suspend
        } else {
            Advance::Continue
        }
    }

    /// Advance without suspending until the pass is done.
    fn run_to_completion<S: PlacementSink + ?Sized>(
        mut self,
        config: &TerrainConfig,
        field: &NoiseField,
        sink: &mut S,
    ) {
        while !matches!(self.advance(config, field, sink), Advance::Done) {}
    }

    fn emit_row<S: PlacementSink + ?Sized>(
        &mut self,
        config: &TerrainConfig,
        field: &NoiseField,
        row: usize,
        sink: &mut S,
    ) {
        let x = row as i32;
        for z in 0..self.grid.size() as i32 {
            match emit_column(config, field, &self.grid, x, z, sink) {
                Some(count) => {
                    self.placements += count;
                    self.columns += 1;
                }
                None => self.skipped_columns += 1,
            }
        }
    }
}

/// Emit the fill layers and surface voxel of one column.
///
/// Returns the number of placements, or `None` when the column has no biome.
fn emit_column<S: PlacementSink + ?Sized>(
    config: &TerrainConfig,
    field: &NoiseField,
    grid: &HeightGrid,
    x: i32,
    z: i32,
    sink: &mut S,
) -> Option<usize> {
    let height = grid.get(x, z)?;
    let biome = config
        .biome_palette
        .pick(field.sample_channel(config.biome_noise(), x, z))?;

    let place = |sink: &mut S, y: i32, shape: ShapeClass, rotation: Rotation| {
        let grid_pos = GridPos::new(x, y, z);
        sink.place(PlacementRecord {
            grid: grid_pos,
            position: grid_pos.to_world(config.block_size),
            shape,
            rotation,
            biome: Arc::clone(biome),
            is_static: true,
        });
    };

    for y in height.saturating_sub(config.terrain_depth)..height {
        place(sink, y, ShapeClass::Full, Rotation::Deg0);
    }

    let (shape, rotation) = classify(height, &grid.neighbors(x, z)?);
    place(sink, height, shape, rotation);

    Some(config.terrain_depth as usize + 1)
}

/// Run a full pass without suspending and collect its placements.
#[cfg_attr(feature = "profiling", tracing::instrument(level = "trace", skip_all))]
pub fn generate(config: &TerrainConfig) -> Result<Vec<PlacementRecord>> {
    config.validate()?;
    let field = NoiseField::new(config.seed);
    let mut records = Vec::new();
    GenerationTask::new(Step::Heightmap).run_to_completion(config, &field, &mut records);
    Ok(records)
}

/// Owns the configuration and the in-flight pass, and answers shape queries
/// about the last completed pass.
pub struct TerrainBuilder {
    config: TerrainConfig,
    field: NoiseField,
    task: Option<GenerationTask>,
    heights: Option<HeightGrid>,
}

impl TerrainBuilder {
    /// Create a builder. The configuration is validated up front.
    pub fn new(config: TerrainConfig) -> Result<Self> {
        config.validate()?;
        let field = NoiseField::new(config.seed);
        Ok(Self {
            config,
            field,
            task: None,
            heights: None,
        })
    }

    /// Get the terrain configuration.
    pub const fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Replace the configuration used by the next pass.
    ///
    /// Returns `Ok(false)` without changing anything while a pass is in flight.
    pub fn set_config(&mut self, config: TerrainConfig) -> Result<bool> {
        if self.is_generating() {
            return Ok(false);
        }
        config.validate()?;
        self.field = NoiseField::new(config.seed);
        self.config = config;
        Ok(true)
    }

    /// True while a pass is in flight.
    pub const fn is_generating(&self) -> bool {
        self.task.is_some()
    }

    /// Begin the first pass. Returns false if one is already running.
    pub fn start(&mut self) -> bool {
        if self.is_generating() {
            debug!("Generation already in progress, start request dropped");
            return false;
        }
        self.begin(Step::Heightmap);
        true
    }

    /// Clear all previous output and start a fresh pass.
    ///
    /// Dropped (returns false) while a pass is in flight; requests are not queued.
    pub fn request_regenerate<S: PlacementSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        if self.is_generating() {
            debug!("Generation already in progress, regenerate request dropped");
            return false;
        }
        sink.clear();
        self.heights = None;
        self.begin(Step::Cleared);
        true
    }

    fn begin(&mut self, step: Step) {
        info!(
            world_size = self.config.world_size,
            biomes = self.config.biome_palette.len(),
            seed = self.config.seed,
            "Generating terrain"
        );
        if self.config.biome_palette.is_empty() {
            debug!("Biome palette is empty, every column will be skipped");
        }
        self.task = Some(GenerationTask::new(step));
    }

    /// Advance the in-flight pass up to its next suspension point.
    #[cfg_attr(feature = "profiling", tracing::instrument(level = "trace", skip_all))]
    pub fn tick<S: PlacementSink + ?Sized>(&mut self, sink: &mut S) -> GenerationStatus {
        let Some(task) = self.task.as_mut() else {
            return GenerationStatus::Idle;
        };
        task.ticks += 1;

        loop {
            match task.advance(&self.config, &self.field, sink) {
                Advance::Continue => {}
                Advance::Suspend => {
                    trace!(step = ?task.step, tick = task.ticks, "Generation suspended");
                    return GenerationStatus::Suspended;
                }
                Advance::Done => break,
            }
        }

        let Some(task) = self.task.take() else {
            return GenerationStatus::Idle;
        };
        let summary = task.summary();
        self.heights = Some(task.grid);
        info!(
            placements = summary.placements,
            skipped = summary.skipped_columns,
            relax_passes = summary.relax.passes,
            converged = summary.relax.converged,
            ticks = summary.ticks,
            "Terrain generated"
        );
        GenerationStatus::Finished(summary)
    }

    /// Tick until the in-flight pass completes.
    ///
    /// Returns `None` if no pass was running.
    pub fn finish<S: PlacementSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Option<GenerationSummary> {
        loop {
            match self.tick(sink) {
                GenerationStatus::Idle => return None,
                GenerationStatus::Suspended => {}
                GenerationStatus::Finished(summary) => return Some(summary),
            }
        }
    }

    /// Run a complete pass without touching the builder's state.
    pub fn generate(&self) -> Vec<PlacementRecord> {
        let mut records = Vec::new();
        GenerationTask::new(Step::Heightmap).run_to_completion(
            &self.config,
            &self.field,
            &mut records,
        );
        records
    }

    /// Relaxed heights of the last completed pass.
    pub const fn heights(&self) -> Option<&HeightGrid> {
        self.heights.as_ref()
    }

    /// Surface height of a column from the last completed pass.
    pub fn height_at(&self, x: i32, z: i32) -> Option<i32> {
        self.heights.as_ref()?.get(x, z)
    }

    /// Surface shape and rotation of a column from the last completed pass.
    pub fn shape_at(&self, x: i32, z: i32) -> Option<(ShapeClass, Rotation)> {
        let grid = self.heights.as_ref()?;
        let height = grid.get(x, z)?;
        Some(classify(height, &grid.neighbors(x, z)?))
    }

    /// Biome of a column, if the palette has any.
    pub fn biome_at(&self, x: i32, z: i32) -> Option<&Arc<BiomeDefinition>> {
        self.config
            .biome_palette
            .pick(self.field.sample_channel(self.config.biome_noise(), x, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxterra_core::{BiomeKind, Error, PrefabId, ShapeSet};

    fn palette() -> BiomePalette {
        BiomeKind::ALL
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                let base = i as u32 * 4;
                let shapes = ShapeSet {
                    full: PrefabId(base),
                    slope: PrefabId(base + 1),
                    corner: PrefabId(base + 2),
                    inner_corner: PrefabId(base + 3),
                };
                BiomeDefinition::new(format!("{kind:?}"), kind, shapes)
            })
            .collect()
    }

    fn config(size: i32) -> TerrainConfig {
        TerrainConfig {
            world_size: size,
            biome_palette: palette(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = TerrainConfig::default();
        assert_eq!(config.world_size, 64);
        assert_eq!(config.terrain_depth, 5);
        assert_eq!(config.max_relax_passes, 100);
        assert!(config.biome_palette.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bad_size = TerrainConfig {
            world_size: 0,
            ..Default::default()
        };
        assert_eq!(
            bad_size.validate(),
            Err(Error::InvalidConfig(ConfigError::WorldSize(0)))
        );

        let bad_block = TerrainConfig {
            block_size: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            generate(&bad_block),
            Err(Error::InvalidConfig(ConfigError::BlockSize(_)))
        ));

        let nan_block = TerrainConfig {
            block_size: f32::NAN,
            ..Default::default()
        };
        assert!(nan_block.validate().is_err());

        let bad_depth = TerrainConfig {
            terrain_depth: 0,
            ..Default::default()
        };
        assert!(TerrainBuilder::new(bad_depth).is_err());
    }

    #[test]
    fn heights_outside_i32_are_rejected() {
        let sunk = TerrainConfig {
            world_size: 2,
            height_scale: 0.0,
            height_offset: -3.0e9,
            biome_palette: palette(),
            ..Default::default()
        };
        assert_eq!(
            generate(&sunk),
            Err(Error::InvalidConfig(ConfigError::HeightRange {
                offset: -3.0e9,
                scale: 0.0
            }))
        );

        let tall = TerrainConfig {
            height_scale: 6.0e9,
            height_offset: -3.0e9,
            noise_scale: 0.3,
            ..sunk.clone()
        };
        assert!(tall.validate().is_err());
        assert!(TerrainBuilder::new(tall).is_err());

        let infinite = TerrainConfig {
            height_scale: f64::INFINITY,
            ..sunk.clone()
        };
        assert!(infinite.validate().is_err());

        let nan = TerrainConfig {
            height_offset: 0.0,
            height_scale: f64::NAN,
            ..sunk
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn fill_layers_near_i32_min_are_emitted() {
        // Lowest fill layer lands exactly on i32::MIN.
        let config = TerrainConfig {
            world_size: 2,
            height_scale: 0.0,
            height_offset: f64::from(i32::MIN) + 5.0,
            terrain_depth: 5,
            biome_palette: palette(),
            ..Default::default()
        };
        let records = generate(&config).unwrap();
        assert_eq!(records.len(), 2 * 2 * 6);
        assert_eq!(records[0].grid.y, i32::MIN);

        let below = TerrainConfig {
            terrain_depth: 6,
            ..config
        };
        assert!(below.validate().is_err());
    }

    #[test]
    fn every_column_emits_depth_plus_one() {
        let config = config(8);
        let records = generate(&config).unwrap();
        assert_eq!(records.len(), 8 * 8 * 6);
    }

    #[test]
    fn empty_palette_emits_nothing() {
        let config = TerrainConfig {
            world_size: 12,
            ..Default::default()
        };
        assert!(generate(&config).unwrap().is_empty());

        let mut builder = TerrainBuilder::new(config).unwrap();
        let mut sink: Vec<PlacementRecord> = Vec::new();
        builder.start();
        let summary = builder.finish(&mut sink).unwrap();
        assert_eq!(summary.placements, 0);
        assert_eq!(summary.skipped_columns, 144);
        assert!(sink.is_empty());
        // Heights are still available for queries.
        assert!(builder.height_at(3, 3).is_some());
    }

    #[test]
    fn tick_without_pass_is_idle() {
        let mut builder = TerrainBuilder::new(config(4)).unwrap();
        let mut sink: Vec<PlacementRecord> = Vec::new();
        assert_eq!(builder.tick(&mut sink), GenerationStatus::Idle);
        assert!(!builder.is_generating());
    }

    #[test]
    fn emission_suspends_after_even_rows() {
        // Flat terrain converges on its first pass, so the only suspension
        // points are in the emission phase.
        let config = TerrainConfig {
            world_size: 6,
            height_scale: 0.0,
            height_offset: 3.0,
            biome_palette: palette(),
            ..Default::default()
        };
        let mut builder = TerrainBuilder::new(config).unwrap();
        let mut sink: Vec<PlacementRecord> = Vec::new();
        builder.start();

        // Tick 1: heightmap, one relax pass, row 0.
        assert_eq!(builder.tick(&mut sink), GenerationStatus::Suspended);
        assert_eq!(sink.len(), 6 * 6);
        // Tick 2: rows 1 and 2.
        assert_eq!(builder.tick(&mut sink), GenerationStatus::Suspended);
        assert_eq!(sink.len(), 3 * 6 * 6);
        // Tick 3: rows 3 and 4.
        assert_eq!(builder.tick(&mut sink), GenerationStatus::Suspended);
        // Tick 4: row 5 completes the pass.
        let GenerationStatus::Finished(summary) = builder.tick(&mut sink) else {
            panic!("expected the pass to finish");
        };
        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.relax.passes, 0);
        assert!(summary.relax.converged);
        assert_eq!(sink.len(), 6 * 6 * 6);
        assert_eq!(summary.placements, sink.len());
        assert!(!builder.is_generating());
    }

    #[test]
    fn relaxation_suspends_every_fifth_pass() {
        let config = TerrainConfig {
            world_size: 16,
            max_relax_passes: 7,
            biome_palette: palette(),
            ..Default::default()
        };
        let field = NoiseField::new(config.seed);
        let mut sink: Vec<PlacementRecord> = Vec::new();

        // A tall spike in the far corner needs far more than 7 passes.
        let mut task = GenerationTask::new(Step::Relax);
        task.grid = HeightGrid::new(16, 0);
        task.grid.set(15, 15, 40).unwrap();

        for _ in 0..4 {
            assert!(matches!(task.advance(&config, &field, &mut sink), Advance::Continue));
        }
        assert!(matches!(task.advance(&config, &field, &mut sink), Advance::Suspend));
        assert_eq!(task.relax.scanned, 5);

        // Passes 6 and 7, then the cap hands over to emission of row 0.
        for _ in 0..3 {
            assert!(matches!(task.advance(&config, &field, &mut sink), Advance::Continue));
        }
        assert!(sink.is_empty());
        assert!(matches!(task.advance(&config, &field, &mut sink), Advance::Suspend));
        assert_eq!(task.relax.passes, 7);
        assert!(!task.relax.converged);
        assert_eq!(sink.len(), 16 * 6);
    }

    #[test]
    fn regenerate_is_dropped_while_in_flight() {
        let mut builder = TerrainBuilder::new(config(8)).unwrap();
        let mut sink: Vec<PlacementRecord> = Vec::new();

        assert!(builder.request_regenerate(&mut sink));
        assert!(builder.is_generating());
        // First tick only acknowledges the clear.
        assert_eq!(builder.tick(&mut sink), GenerationStatus::Suspended);
        assert!(sink.is_empty());

        while sink.is_empty() {
            assert_eq!(builder.tick(&mut sink), GenerationStatus::Suspended);
        }
        let emitted = sink.len();
        assert!(!builder.request_regenerate(&mut sink));
        assert!(!builder.start());
        assert_eq!(sink.len(), emitted, "dropped request must not clear output");

        builder.finish(&mut sink).unwrap();
        assert_eq!(sink.len(), 8 * 8 * 6);
    }

    #[test]
    fn regenerate_replaces_previous_output() {
        let mut builder = TerrainBuilder::new(config(10)).unwrap();
        let mut sink: Vec<PlacementRecord> = Vec::new();
        builder.start();
        builder.finish(&mut sink).unwrap();
        let first = sink.clone();

        assert!(builder.request_regenerate(&mut sink));
        assert!(builder.height_at(0, 0).is_none());
        builder.finish(&mut sink).unwrap();

        assert_eq!(sink, first);
        assert_eq!(sink, builder.generate());
    }

    #[test]
    fn set_config_refused_while_generating() {
        let mut builder = TerrainBuilder::new(config(6)).unwrap();
        builder.start();
        assert_eq!(builder.set_config(config(8)), Ok(false));
        assert_eq!(builder.config().world_size, 6);

        builder.finish(&mut Vec::<PlacementRecord>::new());
        assert_eq!(builder.set_config(config(8)), Ok(true));
        assert_eq!(builder.config().world_size, 8);
        assert!(builder.set_config(config(-1)).is_err());
        assert_eq!(builder.config().world_size, 8);
    }

    #[test]
    fn shape_query_matches_emitted_surface() {
        let mut builder = TerrainBuilder::new(config(16)).unwrap();
        let mut sink: Vec<PlacementRecord> = Vec::new();
        assert!(builder.shape_at(0, 0).is_none());

        builder.start();
        builder.finish(&mut sink).unwrap();

        let heights = builder.heights().unwrap();
        for record in &sink {
            let height = heights.get(record.grid.x, record.grid.z).unwrap();
            if record.is_surface(height) {
                assert_eq!(
                    builder.shape_at(record.grid.x, record.grid.z),
                    Some((record.shape, record.rotation))
                );
            } else {
                assert_eq!(record.shape, ShapeClass::Full);
                assert_eq!(record.rotation, Rotation::Deg0);
            }
        }
        assert!(builder.shape_at(16, 0).is_none());
        assert!(builder.shape_at(-1, 3).is_none());
    }
}
