use std::sync::Arc;

use crate::params::WorldParams;
use crate::terrain::TerrainSynthesizer;

/// World identity and sizing: a seed plus the tuning snapshot every
/// synthesizer and chunk generator reads from.
pub struct World {
    pub seed: i32,
    params: Arc<WorldParams>,
}

impl World {
    pub fn new(seed: i32, params: WorldParams) -> Self {
        Self {
            seed,
            params: Arc::new(params),
        }
    }

    #[inline]
    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    #[inline]
    pub fn chunk_width(&self) -> usize {
        self.params.chunk_width
    }

    #[inline]
    pub fn chunk_height(&self) -> usize {
        self.params.chunk_height
    }

    #[inline]
    pub fn sea_level(&self) -> i32 {
        self.params.sea_level
    }

    #[inline]
    pub fn render_distance(&self) -> i32 {
        self.params.render_distance
    }

    /// Fresh synthesizer over this world's seed and params. Synthesizers
    /// are cheap to build and safe to hand to worker threads.
    pub fn make_synthesizer(&self) -> TerrainSynthesizer {
        TerrainSynthesizer::new(self.seed, Arc::clone(&self.params))
    }
}
