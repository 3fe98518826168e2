use std::sync::Arc;

use strata_blocks::Block;

use crate::noise::NoiseField;
use crate::params::WorldParams;

// Large constant offsets decorrelate channels sampled from one generator.
const BIOME_B_OFFSET: (f32, f32) = (104_729.0, -54_287.0);
const RELIEF_OFFSET: (f32, f32) = (-91_193.0, 33_791.0);
const MOUNTAIN_OFFSET: (f32, f32) = (48_611.0, 76_163.0);

/// Blend weights for the four terrain profiles at one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeWeights {
    pub mountain: f32,
    pub snow: f32,
    pub grass: f32,
    pub sand: f32,
}

#[inline]
fn ramp(v: f32, lo: f32, hi: f32) -> f32 {
    ((v - lo) / (hi - lo).max(f32::EPSILON)).clamp(0.0, 1.0)
}

#[inline]
fn sigmoid(v: f32) -> f32 {
    1.0 / (1.0 + (-v).exp())
}

impl BiomeWeights {
    /// Bilinear falloff product over the two biome channels. Each weight is
    /// 1.0 in its exclusive quadrant past `hi` and fades to 0 below `lo`.
    pub fn blend(n1: f32, n2: f32, lo: f32, hi: f32) -> Self {
        let t1 = ramp(n1, lo, hi);
        let t2 = ramp(n2, lo, hi);
        Self {
            mountain: t1 * t2,
            snow: (1.0 - t1) * t2,
            grass: t1 * (1.0 - t2),
            sand: (1.0 - t1) * (1.0 - t2),
        }
    }

    #[inline]
    pub fn sum(&self) -> f32 {
        self.mountain + self.snow + self.grass + self.sand
    }

    /// Scales the weights to sum to 1. A degenerate raw sum falls back to
    /// uniform weighting instead of dividing by zero.
    pub fn normalized(self) -> Self {
        let sum = self.sum();
        if sum <= f32::EPSILON {
            return Self {
                mountain: 0.25,
                snow: 0.25,
                grass: 0.25,
                sand: 0.25,
            };
        }
        Self {
            mountain: self.mountain / sum,
            snow: self.snow / sum,
            grass: self.grass / sum,
            sand: self.sand / sum,
        }
    }
}

/// Vertical material profile for a column, picked by the coarse quadrant
/// split on the two biome channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnProfile {
    SnowyMountain,
    IcyLake,
    WateryGrass,
    SandyDesert,
}

impl ColumnProfile {
    /// The lake profiles fill the span above the surface up to sea level.
    #[inline]
    pub fn has_liquid_fill(self) -> bool {
        matches!(self, ColumnProfile::IcyLake | ColumnProfile::WateryGrass)
    }
}

/// Per-column synthesis result, computed once before any voxel writes.
#[derive(Clone, Copy, Debug)]
pub struct ColumnPlan {
    pub height: i32,
    pub profile: ColumnProfile,
}

impl ColumnPlan {
    /// Highest z this column writes a non-air block at.
    #[inline]
    pub fn fill_top(&self, sea_level: i32) -> i32 {
        if self.profile.has_liquid_fill() {
            self.height.max(sea_level)
        } else {
            self.height
        }
    }
}

/// Converts noise samples into per-column height and material profiles.
pub struct TerrainSynthesizer {
    noise: NoiseField,
    params: Arc<WorldParams>,
}

impl TerrainSynthesizer {
    pub fn new(seed: i32, params: Arc<WorldParams>) -> Self {
        Self {
            noise: NoiseField::new(seed),
            params,
        }
    }

    #[inline]
    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    #[inline]
    fn biome_channels(&self, x: f32, y: f32) -> (f32, f32) {
        let p = &*self.params;
        let n1 = self.noise.sample(x, y, p.biome_scale, p.biome_octaves);
        let n2 = self.noise.sample(
            x + BIOME_B_OFFSET.0,
            y + BIOME_B_OFFSET.1,
            p.biome_scale,
            p.biome_octaves,
        );
        (n1, n2)
    }

    /// Normalized biome weights at a column.
    pub fn weights_at(&self, wx: i32, wy: i32) -> BiomeWeights {
        let p = &*self.params;
        let (n1, n2) = self.biome_channels(wx as f32, wy as f32);
        BiomeWeights::blend(n1, n2, p.blend_lo, p.blend_hi).normalized()
    }

    /// Blended surface height and vertical profile for the column at
    /// global `(wx, wy)`.
    pub fn column_plan(&self, wx: i32, wy: i32) -> ColumnPlan {
        let p = &*self.params;
        let x = wx as f32;
        let y = wy as f32;

        let (n1, n2) = self.biome_channels(x, y);
        let w = BiomeWeights::blend(n1, n2, p.blend_lo, p.blend_hi).normalized();

        let relief = self.noise.sample(
            x + RELIEF_OFFSET.0,
            y + RELIEF_OFFSET.1,
            p.relief_scale,
            p.relief_octaves,
        );
        let peaks = self.noise.sample(
            x + MOUNTAIN_OFFSET.0,
            y + MOUNTAIN_OFFSET.1,
            p.mountain_scale,
            p.mountain_octaves,
        );

        let sea = p.sea_level as f32;
        let mountain_h = sea + p.mountain_amplitude * sigmoid((peaks - 0.5) * p.mountain_steepness);
        let snow_h = sea + p.snow_offset + (relief - 0.5) * p.snow_amplitude;
        let grass_h = sea + p.grass_offset + (relief - 0.5) * p.grass_amplitude;
        let sand_h = sea + p.sand_offset + (relief - 0.5) * p.sand_amplitude;

        let blended =
            w.mountain * mountain_h + w.snow * snow_h + w.grass * grass_h + w.sand * sand_h;
        let height = (blended as i32).clamp(1, p.chunk_height as i32 - 1);

        let split = p.profile_split;
        let profile = match (n1 >= split, n2 >= split) {
            (true, true) => ColumnProfile::SnowyMountain,
            (false, true) => ColumnProfile::IcyLake,
            (true, false) => ColumnProfile::WateryGrass,
            (false, false) => ColumnProfile::SandyDesert,
        };

        ColumnPlan { height, profile }
    }

    /// Material at height `z` for a planned column. Stone below the
    /// sub-surface threshold, a filler band underneath the surface block,
    /// and for the lake profiles a liquid fill up to sea level.
    pub fn block_for(&self, plan: &ColumnPlan, z: i32) -> Block {
        let h = plan.height;
        if z <= h - 4 {
            return Block::STONE;
        }
        if z < h {
            return match plan.profile {
                ColumnProfile::SandyDesert => Block::SAND,
                _ => Block::DIRT,
            };
        }
        if z == h {
            return match plan.profile {
                ColumnProfile::SnowyMountain | ColumnProfile::IcyLake => Block::SNOW,
                ColumnProfile::WateryGrass => Block::GRASS,
                ColumnProfile::SandyDesert => Block::SAND,
            };
        }
        if z <= self.params.sea_level {
            return match plan.profile {
                ColumnProfile::IcyLake => Block::ICE,
                ColumnProfile::WateryGrass => Block::WATER,
                _ => Block::AIR,
            };
        }
        Block::AIR
    }
}
