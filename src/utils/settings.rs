use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::world::streaming::{CreationAnchor, EvictionRule};

/// Every tunable in one place. Missing sections and fields fall back to
/// their defaults, so a config file only needs the overrides.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub terrain: TerrainSettings,
    pub streaming: StreamingSettings,
    pub loader: LoaderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            terrain: TerrainSettings::default(),
            streaming: StreamingSettings::default(),
            loader: LoaderSettings::default(),
        }
    }
}

impl Settings {
    /// Reads settings from a TOML file and normalizes them.
    pub fn load(path: &Path) -> Result<Settings, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        let mut settings: Settings = toml::from_str(&text)?;
        settings.normalize();
        Ok(settings)
    }

    /// Repairs values that would break streaming: the render radius cannot
    /// be negative and the delete radius must exceed it.
    pub fn normalize(&mut self) {
        if self.streaming.render_radius < 0 {
            tracing::warn!(
                "render_radius {} is negative, using 0",
                self.streaming.render_radius
            );
            self.streaming.render_radius = 0;
        }
        if self.streaming.delete_radius <= self.streaming.render_radius {
            let fixed = self.streaming.render_radius + 1;
            tracing::warn!(
                "delete_radius {} must exceed render_radius {}, using {}",
                self.streaming.delete_radius,
                self.streaming.render_radius,
                fixed
            );
            self.streaming.delete_radius = fixed;
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TerrainSettings {
    pub frequency: f64,
    pub shape_octaves: u32,
    pub shape_persistence: f64,
    pub relief_octaves: u32,
    pub relief_persistence: f64,
    pub lacunarity: f64,
    pub relief_scale: f64,
    pub relief_base: f64,
    pub sand_height: i32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            frequency: TERRAIN_FREQUENCY,
            shape_octaves: SHAPE_OCTAVES,
            shape_persistence: SHAPE_PERSISTENCE,
            relief_octaves: RELIEF_OCTAVES,
            relief_persistence: RELIEF_PERSISTENCE,
            lacunarity: TERRAIN_LACUNARITY,
            relief_scale: RELIEF_SCALE,
            relief_base: RELIEF_BASE,
            sand_height: SAND_HEIGHT,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct StreamingSettings {
    pub render_radius: i32,
    pub delete_radius: i32,
    pub eviction: EvictionRule,
    pub anchor: CreationAnchor,
}

impl Default for StreamingSettings {
    fn default() -> Self {
        Self {
            render_radius: RENDER_RADIUS,
            delete_radius: DELETE_RADIUS,
            eviction: EvictionRule::BothAxes,
            anchor: CreationAnchor::Origin,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderSettings {
    /// Worker threads for chunk generation. 0 means one per logical CPU.
    pub workers: usize,
    /// How many finished chunks the world accepts per tick.
    pub max_chunks_per_tick: usize,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            workers: 0,
            max_chunks_per_tick: MAX_CHUNKS_PER_TICK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_builtin_constants() {
        let settings = Settings::default();
        assert_eq!(settings.streaming.render_radius, 8);
        assert_eq!(settings.streaming.delete_radius, 12);
        assert_eq!(settings.streaming.eviction, EvictionRule::BothAxes);
        assert_eq!(settings.streaming.anchor, CreationAnchor::Origin);
        assert_eq!(settings.terrain.frequency, 0.01);
        assert_eq!(settings.terrain.sand_height, 12);
        assert_eq!(settings.loader.max_chunks_per_tick, MAX_CHUNKS_PER_TICK);
    }

    #[test]
    fn partial_toml_only_overrides_what_it_names() {
        let text = r#"
            [streaming]
            render_radius = 3
            eviction = "either_axis"

            [terrain]
            sand_height = 20
        "#;
        let settings: Settings = toml::from_str(text).unwrap();
        assert_eq!(settings.streaming.render_radius, 3);
        assert_eq!(settings.streaming.eviction, EvictionRule::EitherAxis);
        assert_eq!(settings.streaming.delete_radius, DELETE_RADIUS);
        assert_eq!(settings.terrain.sand_height, 20);
        assert_eq!(settings.terrain.frequency, TERRAIN_FREQUENCY);
        assert_eq!(settings.loader, LoaderSettings::default());
    }

    #[test]
    fn normalize_keeps_the_delete_radius_beyond_the_render_radius() {
        let mut settings = Settings::default();
        settings.streaming.render_radius = 10;
        settings.streaming.delete_radius = 5;
        settings.normalize();
        assert_eq!(settings.streaming.delete_radius, 11);

        settings.streaming.render_radius = -2;
        settings.normalize();
        assert_eq!(settings.streaming.render_radius, 0);
    }

    #[test]
    fn load_fails_cleanly_on_a_missing_file() {
        assert!(Settings::load(Path::new("/no/such/voxcraft.toml")).is_err());
    }

    #[test]
    fn load_reads_a_config_file() {
        let path = std::env::temp_dir().join("voxcraft-settings-test.toml");
        fs::write(&path, "[streaming]\nrender_radius = 2\ndelete_radius = 1\n").unwrap();
        let settings = Settings::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.streaming.render_radius, 2);
        // normalized on load
        assert_eq!(settings.streaming.delete_radius, 3);
    }
}
