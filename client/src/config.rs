//! Sandbox tuning loaded from `sandbox.ron`.
//!
//! The file is optional. Every field falls back to its default, so a file only
//! needs the values it overrides:
//!
//! ```ron
//! (
//!     rig: (ground_speed: 8.0, invert_look_y: true),
//!     mouse_sensitivity: 0.08,
//! )
//! ```

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use bevy::prelude::*;
use rig::{CapsuleSpec, ConfigError, RigConfig, RigParts};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "SANDBOX_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "sandbox.ron";

#[derive(Resource, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub rig: RigConfig,
    pub capsule: CapsuleSpec,
    /// Camera distance behind the boom pivot (meters).
    pub boom_arm_length: f32,
    /// Unitless multiplier on the mouse look sample; the rig then scales it by `turn_rate * dt`.
    pub mouse_sensitivity: f32,
    /// Drive a separate view rotation and let the body follow its yaw.
    pub decoupled_look: bool,
    /// Height of the body origin at spawn (meters).
    pub spawn_height: f32,
    /// Falling below this respawns the rig (meters).
    pub kill_height: f32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        let parts = RigParts::default();
        Self {
            rig: RigConfig::default(),
            capsule: parts.capsule,
            boom_arm_length: parts.boom.arm_length,
            mouse_sensitivity: 0.1,
            decoupled_look: true,
            spawn_height: 3.0,
            kill_height: -20.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum SandboxConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("invalid rig tuning: {0}")]
    Rig(#[from] ConfigError),

    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("kill height {kill} must lie below spawn height {spawn}")]
    KillAboveSpawn { kill: f32, spawn: f32 },
}

impl SandboxConfig {
    pub fn validate(&self) -> Result<(), SandboxConfigError> {
        self.rig.validate()?;

        let positive = [
            ("capsule.radius", self.capsule.radius),
            ("capsule.half_height", self.capsule.half_height),
            ("boom_arm_length", self.boom_arm_length),
            ("mouse_sensitivity", self.mouse_sensitivity),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SandboxConfigError::NotPositive { field, value });
            }
        }

        let heights_ordered = self.kill_height.is_finite()
            && self.spawn_height.is_finite()
            && self.kill_height < self.spawn_height;
        if !heights_ordered {
            return Err(SandboxConfigError::KillAboveSpawn {
                kill: self.kill_height,
                spawn: self.spawn_height,
            });
        }

        Ok(())
    }

    /// Parse and validate RON text. `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, SandboxConfigError> {
        let config: SandboxConfig =
            ron::de::from_str(text).map_err(|source| SandboxConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, SandboxConfigError> {
        let text = fs::read_to_string(path).map_err(|source| SandboxConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }
}

fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load the sandbox config, falling back to defaults on any failure.
pub fn load() -> SandboxConfig {
    let path = config_path();
    match SandboxConfig::load_from(&path) {
        Ok(config) => {
            info!("Loaded sandbox config from {}", path.display());
            config
        }
        Err(SandboxConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            info!("No {} found, using default tuning", path.display());
            SandboxConfig::default()
        }
        Err(err) => {
            warn!("{err}; using default tuning");
            SandboxConfig::default()
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(load());
}
