//! Visualization Updater.
//!
//! A `GalaxySession` owns everything that changes while the user types:
//! the star buffers, the word registry, the random source and the current
//! sequence. `update` recomputes the whole highlight state from scratch
//! for the given sequence:
//!
//! 1. displayed colors → 30% of base, sizes → 1.0
//! 2. per word: resolve star, drop a marker, max-combine its neighbor glow
//! 3. beam through the word stars (≥2 words)
//! 4. camera goal framing the words, nav readout (≥6 words)

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::branchless::color::{scale_rgb, sequence_color};
use crate::branchless::{max_f32, max_rgb_in_place};
use crate::config::{GalaxyConfig, NeighborIndex};
use crate::error::GalaxyError;
use crate::fast_math::Vec3;
use crate::galaxy::camera::{frame_path, CameraGoal};
use crate::galaxy::field::{BackgroundField, PointField};
use crate::galaxy::input::{status_line, StatusLine};
use crate::galaxy::nav::{NavReadout, NAV_THRESHOLD};
use crate::galaxy::neighbors::{BruteForce, GridIndex, NeighborSearch};
use crate::galaxy::path::BeamPath;
use crate::galaxy::registry::WordRegistry;

/// Non-highlighted stars keep this fraction of their base color.
pub const DIM_FACTOR: f32 = 0.3;
/// Highlight colors are pushed past 1.0 by this factor.
pub const BOOST: f32 = 2.0;
/// Highlight size = `HIGHLIGHT_BASE_SIZE + intensity * HIGHLIGHT_SIZE_GAIN`.
pub const HIGHLIGHT_BASE_SIZE: f32 = 2.0;
pub const HIGHLIGHT_SIZE_GAIN: f32 = 3.0;
/// World-space size of a word flare.
pub const MARKER_SCALE: f32 = 60.0;

/// Flare on a word's star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub star: usize,
    pub position: Vec3,
    pub color: [f32; 3],
    pub scale: f32,
}

/// Result of [`GalaxySession::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Same sequence as before; nothing recomputed
    Unchanged,
    /// Buffers, markers, beam and camera goal were rebuilt
    Updated,
}

impl UpdateOutcome {
    pub fn changed(self) -> bool {
        matches!(self, UpdateOutcome::Updated)
    }
}

pub struct GalaxySession {
    config: GalaxyConfig,
    field: PointField,
    background: BackgroundField,
    registry: WordRegistry,
    rng: ChaCha8Rng,
    search: Box<dyn NeighborSearch>,
    sequence: Vec<String>,
    markers: Vec<Marker>,
    beam: Option<BeamPath>,
    camera_goal: CameraGoal,
    nav: Option<NavReadout>,
    /// Bumped on every effective update
    generation: u64,
}

impl GalaxySession {
    /// Validate `config`, seed the rng and generate both star fields.
    pub fn new(config: GalaxyConfig) -> Result<Self, GalaxyError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let start = Instant::now();
        let field = PointField::generate(&config, &mut rng);
        let background = BackgroundField::generate(config.background_points, &mut rng);
        log::info!(
            "generated {} stars ({} clusters) + {} background in {:.1}ms (seed: {:?})",
            field.len(),
            config.cluster_count,
            background.len(),
            start.elapsed().as_secs_f64() * 1000.0,
            config.seed
        );

        Ok(Self::assemble(config, field, background, rng))
    }

    /// Session over an explicit star field (no background).
    ///
    /// `config.total_points` is overridden by the field size.
    pub fn with_field(mut config: GalaxyConfig, field: PointField) -> Result<Self, GalaxyError> {
        config.total_points = field.len();
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or(0));
        let background = BackgroundField {
            positions: Vec::new(),
            colors: Vec::new(),
        };
        Ok(Self::assemble(config, field, background, rng))
    }

    fn assemble(
        config: GalaxyConfig,
        field: PointField,
        background: BackgroundField,
        rng: ChaCha8Rng,
    ) -> Self {
        let search: Box<dyn NeighborSearch> = match config.neighbor_index {
            NeighborIndex::BruteForce => Box::new(BruteForce),
            NeighborIndex::Grid => {
                let start = Instant::now();
                let grid = GridIndex::build(&field.positions);
                log::info!(
                    "built neighbor grid over {} stars in {:.1}ms",
                    grid.len(),
                    start.elapsed().as_secs_f64() * 1000.0
                );
                Box::new(grid)
            }
        };
        let registry = WordRegistry::new(field.len(), config.collision_policy);

        Self {
            config,
            field,
            background,
            registry,
            rng,
            search,
            sequence: Vec::new(),
            markers: Vec::new(),
            beam: None,
            camera_goal: CameraGoal::overview(),
            nav: None,
            generation: 0,
        }
    }

    /// Recompute the visualization for `words`.
    ///
    /// An identical sequence (case-sensitive) is a no-op.
    pub fn update<S: AsRef<str>>(&mut self, words: &[S]) -> UpdateOutcome {
        let same = words.len() == self.sequence.len()
            && words.iter().zip(&self.sequence).all(|(a, b)| a.as_ref() == b);
        if same && self.generation > 0 {
            return UpdateOutcome::Unchanged;
        }

        self.sequence = words.iter().map(|w| w.as_ref().to_string()).collect();
        self.markers.clear();
        self.beam = None;
        self.nav = None;
        self.generation += 1;

        if self.sequence.is_empty() {
            self.field.reset_display(1.0);
            self.camera_goal = CameraGoal::overview();
            log::debug!("update: empty sequence, overview restored");
            return UpdateOutcome::Updated;
        }

        self.field.reset_display(DIM_FACTOR);

        let k = self.config.neighbor_count;
        let mut vertices = Vec::with_capacity(self.sequence.len());
        let mut highlighted = 0usize;

        for (w, word) in self.sequence.iter().enumerate() {
            let star = self.registry.resolve(word, &mut self.rng);
            let position = self.field.position(star);
            let color = sequence_color(w);
            vertices.push(position);
            self.markers.push(Marker {
                star,
                position,
                color,
                scale: MARKER_SCALE,
            });

            let neighbors = self.search.nearest(&self.field.positions, star, k);
            let Some(farthest) = neighbors.last() else {
                continue;
            };
            let max_dist = farthest.distance();

            for n in &neighbors {
                let intensity = if max_dist > 0.0 {
                    1.0 - n.distance() / max_dist
                } else {
                    1.0
                };
                let glow = scale_rgb(color, intensity * BOOST);
                max_rgb_in_place(&mut self.field.colors[n.index * 3..n.index * 3 + 3], glow);
                let size = &mut self.field.sizes[n.index];
                *size = max_f32(*size, HIGHLIGHT_BASE_SIZE + intensity * HIGHLIGHT_SIZE_GAIN);
            }
            highlighted += neighbors.len();
        }

        self.beam = BeamPath::build(&vertices);

        let long_sequence = vertices.len() >= NAV_THRESHOLD;
        if let Some(goal) = frame_path(&vertices, !long_sequence) {
            self.camera_goal = goal;
        }
        if let Some(last_word) = self.sequence.last() {
            self.nav = NavReadout::compute(last_word, &vertices, self.config.norm_scale());
        }

        log::debug!(
            "update: {} words, {} neighbor hits via {}, beam: {}, nav: {}",
            self.sequence.len(),
            highlighted,
            self.search.name(),
            self.beam.is_some(),
            self.nav.is_some()
        );
        UpdateOutcome::Updated
    }

    /// Clear the sequence and restore the overview.
    pub fn reset(&mut self) -> UpdateOutcome {
        self.update::<&str>(&[])
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn background(&self) -> &BackgroundField {
        &self.background
    }

    pub fn registry(&self) -> &WordRegistry {
        &self.registry
    }

    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn beam(&self) -> Option<&BeamPath> {
        self.beam.as_ref()
    }

    pub fn camera_goal(&self) -> CameraGoal {
        self.camera_goal
    }

    pub fn nav(&self) -> Option<&NavReadout> {
        self.nav.as_ref()
    }

    pub fn status(&self) -> StatusLine {
        status_line(&self.sequence)
    }

    /// Number of effective updates so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
