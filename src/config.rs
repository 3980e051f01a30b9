//=========================================================================
// Host Configuration
//=========================================================================
//
// JSON-backed settings for the scripting host and the entities it
// spawns at start-up.
//
// Every field is optional in the file; missing fields take the defaults
// below. Example:
//
// ```json
// {
//   "fixed_delta_time": 0.016666668,
//   "entities": [
//     { "id": 7, "position": { "x": 0.0, "y": 0.0 }, "scripts": ["PlayerMovement"] },
//     { "scale": 2.0, "components": ["Rigidbody2D"], "scripts": ["AutoMoveX"] }
//   ]
// }
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::component::ComponentKind;
use crate::core::error::HostError;
use crate::core::math::Vector2;

//=== HostConfig ==========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Seconds per fixed simulation step.
    #[serde(default = "HostConfig::default_fixed_delta_time")]
    pub fixed_delta_time: f32,

    /// Upper bound on fixed steps run in a single frame.
    #[serde(default = "HostConfig::default_max_fixed_steps")]
    pub max_fixed_steps_per_frame: u32,

    #[serde(default = "HostConfig::default_channel_capacity")]
    pub event_channel_capacity: usize,

    #[serde(default = "HostConfig::default_console_capacity")]
    pub console_capacity: usize,

    #[serde(default)]
    pub entities: Vec<EntitySpawn>,
}

impl HostConfig {
    fn default_fixed_delta_time() -> f32 {
        1.0 / 60.0
    }

    const fn default_max_fixed_steps() -> u32 {
        8
    }

    const fn default_channel_capacity() -> usize {
        128
    }

    const fn default_console_capacity() -> usize {
        256
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| HostError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| HostError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{}. Falling back to defaults.", err);
                Self::default()
            }
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            fixed_delta_time: Self::default_fixed_delta_time(),
            max_fixed_steps_per_frame: Self::default_max_fixed_steps(),
            event_channel_capacity: Self::default_channel_capacity(),
            console_capacity: Self::default_console_capacity(),
            entities: Vec::new(),
        }
    }
}

//=== EntitySpawn =========================================================

/// An entity to create at start-up, with the scripts attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpawn {
    /// Fixed native id. Allocated by the world when absent.
    #[serde(default)]
    pub id: Option<u32>,

    #[serde(default)]
    pub position: Vector2,

    #[serde(default)]
    pub rotation: f32,

    #[serde(default = "EntitySpawn::default_scale")]
    pub scale: f32,

    #[serde(default)]
    pub force: Vector2,

    /// Components added after spawn, in order. `Transform` is present at spawn.
    #[serde(default)]
    pub components: Vec<ComponentKind>,

    /// Script class names, attached in order.
    #[serde(default)]
    pub scripts: Vec<String>,
}

impl EntitySpawn {
    fn default_scale() -> f32 {
        1.0
    }
}

impl Default for EntitySpawn {
    fn default() -> Self {
        Self {
            id: None,
            position: Vector2::ZERO,
            rotation: 0.0,
            scale: Self::default_scale(),
            force: Vector2::ZERO,
            components: Vec::new(),
            scripts: Vec::new(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_object_takes_defaults() {
        let file = write_config("{}");

        let config = HostConfig::load(file.path()).unwrap();

        assert_eq!(config, HostConfig::default());
        assert_eq!(config.fixed_delta_time, 1.0 / 60.0);
        assert_eq!(config.max_fixed_steps_per_frame, 8);
    }

    #[test]
    fn entities_are_parsed_with_defaults() {
        let file = write_config(
            r#"{
                "fixed_delta_time": 0.02,
                "entities": [
                    { "id": 7, "position": { "x": 1.0, "y": -2.0 }, "scripts": ["PlayerMovement"] },
                    { "components": ["Rigidbody2D"], "scripts": ["AutoMoveX", "ClockWiseSpin"] }
                ]
            }"#,
        );

        let config = HostConfig::load(file.path()).unwrap();

        assert_eq!(config.fixed_delta_time, 0.02);
        assert_eq!(config.entities.len(), 2);

        let player = &config.entities[0];
        assert_eq!(player.id, Some(7));
        assert_eq!(player.position, Vector2::new(1.0, -2.0));
        assert_eq!(player.scale, 1.0);

        let mover = &config.entities[1];
        assert_eq!(mover.id, None);
        assert_eq!(mover.components, vec![ComponentKind::Rigidbody2D]);
        assert_eq!(mover.scripts, vec!["AutoMoveX", "ClockWiseSpin"]);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        assert!(matches!(HostConfig::load(&path), Err(HostError::ConfigRead { .. })));
        assert_eq!(HostConfig::load_or_default(&path), HostConfig::default());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let file = write_config("{ \"fixed_delta_time\": ");

        assert!(matches!(HostConfig::load(file.path()), Err(HostError::ConfigParse { .. })));
    }
}
