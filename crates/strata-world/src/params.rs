use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub chunk: Chunk,
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    #[serde(default = "default_render_distance")]
    pub render_distance: i32,
    #[serde(default)]
    pub biome: Biome,
    #[serde(default)]
    pub relief: Relief,
    #[serde(default)]
    pub mountain: Mountain,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk: Chunk::default(),
            sea_level: default_sea_level(),
            render_distance: default_render_distance(),
            biome: Biome::default(),
            relief: Relief::default(),
            mountain: Mountain::default(),
            workers: None,
        }
    }
}

fn default_sea_level() -> i32 {
    62
}
fn default_render_distance() -> i32 {
    6
}

#[derive(Clone, Debug, Deserialize)]
pub struct Chunk {
    #[serde(default = "default_chunk_width")]
    pub width: usize,
    #[serde(default = "default_chunk_height")]
    pub height: usize,
}
fn default_chunk_width() -> usize {
    16
}
fn default_chunk_height() -> usize {
    256
}
impl Default for Chunk {
    fn default() -> Self {
        Self {
            width: default_chunk_width(),
            height: default_chunk_height(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Biome {
    #[serde(default = "default_biome_scale")]
    pub scale: f32,
    #[serde(default = "default_biome_octaves")]
    pub octaves: u32,
    #[serde(default = "default_blend_lo")]
    pub blend_lo: f32,
    #[serde(default = "default_blend_hi")]
    pub blend_hi: f32,
    #[serde(default = "default_profile_split")]
    pub profile_split: f32,
}
fn default_biome_scale() -> f32 {
    512.0
}
fn default_biome_octaves() -> u32 {
    2
}
fn default_blend_lo() -> f32 {
    0.4
}
fn default_blend_hi() -> f32 {
    0.6
}
fn default_profile_split() -> f32 {
    0.5
}
impl Default for Biome {
    fn default() -> Self {
        Self {
            scale: default_biome_scale(),
            octaves: default_biome_octaves(),
            blend_lo: default_blend_lo(),
            blend_hi: default_blend_hi(),
            profile_split: default_profile_split(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Relief {
    #[serde(default = "default_relief_scale")]
    pub scale: f32,
    #[serde(default = "default_relief_octaves")]
    pub octaves: u32,
    #[serde(default = "default_snow_amplitude")]
    pub snow_amplitude: f32,
    #[serde(default = "default_snow_offset")]
    pub snow_offset: f32,
    #[serde(default = "default_grass_amplitude")]
    pub grass_amplitude: f32,
    #[serde(default = "default_grass_offset")]
    pub grass_offset: f32,
    #[serde(default = "default_sand_amplitude")]
    pub sand_amplitude: f32,
    #[serde(default = "default_sand_offset")]
    pub sand_offset: f32,
}
fn default_relief_scale() -> f32 {
    128.0
}
fn default_relief_octaves() -> u32 {
    4
}
fn default_snow_amplitude() -> f32 {
    24.0
}
fn default_snow_offset() -> f32 {
    4.0
}
fn default_grass_amplitude() -> f32 {
    16.0
}
fn default_grass_offset() -> f32 {
    1.0
}
fn default_sand_amplitude() -> f32 {
    10.0
}
fn default_sand_offset() -> f32 {
    -2.0
}
impl Default for Relief {
    fn default() -> Self {
        Self {
            scale: default_relief_scale(),
            octaves: default_relief_octaves(),
            snow_amplitude: default_snow_amplitude(),
            snow_offset: default_snow_offset(),
            grass_amplitude: default_grass_amplitude(),
            grass_offset: default_grass_offset(),
            sand_amplitude: default_sand_amplitude(),
            sand_offset: default_sand_offset(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Mountain {
    #[serde(default = "default_mountain_scale")]
    pub scale: f32,
    #[serde(default = "default_mountain_octaves")]
    pub octaves: u32,
    #[serde(default = "default_mountain_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_mountain_steepness")]
    pub steepness: f32,
}
fn default_mountain_scale() -> f32 {
    320.0
}
fn default_mountain_octaves() -> u32 {
    6
}
fn default_mountain_amplitude() -> f32 {
    120.0
}
fn default_mountain_steepness() -> f32 {
    6.0
}
impl Default for Mountain {
    fn default() -> Self {
        Self {
            scale: default_mountain_scale(),
            octaves: default_mountain_octaves(),
            amplitude: default_mountain_amplitude(),
            steepness: default_mountain_steepness(),
        }
    }
}

// Flattened params used in tight loops (snapshot of config).
#[derive(Clone, Debug)]
pub struct WorldParams {
    pub chunk_width: usize,
    pub chunk_height: usize,
    pub sea_level: i32,
    pub render_distance: i32,
    pub biome_scale: f32,
    pub biome_octaves: u32,
    pub blend_lo: f32,
    pub blend_hi: f32,
    pub profile_split: f32,
    pub relief_scale: f32,
    pub relief_octaves: u32,
    pub snow_amplitude: f32,
    pub snow_offset: f32,
    pub grass_amplitude: f32,
    pub grass_offset: f32,
    pub sand_amplitude: f32,
    pub sand_offset: f32,
    pub mountain_scale: f32,
    pub mountain_octaves: u32,
    pub mountain_amplitude: f32,
    pub mountain_steepness: f32,
    pub workers: Option<usize>,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self::from_config(&WorldConfig::default())
    }
}

impl WorldParams {
    pub fn from_config(cfg: &WorldConfig) -> Self {
        Self {
            chunk_width: cfg.chunk.width,
            chunk_height: cfg.chunk.height,
            sea_level: cfg.sea_level,
            render_distance: cfg.render_distance,
            biome_scale: cfg.biome.scale,
            biome_octaves: cfg.biome.octaves,
            blend_lo: cfg.biome.blend_lo,
            blend_hi: cfg.biome.blend_hi,
            profile_split: cfg.biome.profile_split,
            relief_scale: cfg.relief.scale,
            relief_octaves: cfg.relief.octaves,
            snow_amplitude: cfg.relief.snow_amplitude,
            snow_offset: cfg.relief.snow_offset,
            grass_amplitude: cfg.relief.grass_amplitude,
            grass_offset: cfg.relief.grass_offset,
            sand_amplitude: cfg.relief.sand_amplitude,
            sand_offset: cfg.relief.sand_offset,
            mountain_scale: cfg.mountain.scale,
            mountain_octaves: cfg.mountain.octaves,
            mountain_amplitude: cfg.mountain.amplitude,
            mountain_steepness: cfg.mountain.steepness,
            workers: cfg.workers,
        }
    }
}

pub fn load_params_from_path(path: &Path) -> Result<WorldParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: WorldConfig = toml::from_str(&s)?;
    Ok(WorldParams::from_config(&cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_matches_defaults() {
        let cfg: WorldConfig = toml::from_str("").unwrap();
        let p = WorldParams::from_config(&cfg);
        assert_eq!(p.chunk_width, 16);
        assert_eq!(p.chunk_height, 256);
        assert_eq!(p.sea_level, 62);
        assert_eq!(p.blend_lo, 0.4);
        assert_eq!(p.blend_hi, 0.6);
    }

    #[test]
    fn partial_sections_override_only_named_fields() {
        let cfg: WorldConfig = toml::from_str(
            "sea_level = 40\n[chunk]\nwidth = 8\n[mountain]\namplitude = 60.0\n",
        )
        .unwrap();
        let p = WorldParams::from_config(&cfg);
        assert_eq!(p.sea_level, 40);
        assert_eq!(p.chunk_width, 8);
        assert_eq!(p.chunk_height, 256);
        assert_eq!(p.mountain_amplitude, 60.0);
        assert_eq!(p.mountain_octaves, 6);
    }
}
