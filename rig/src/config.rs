/*!
Tuning for a motion rig.

`RigConfig` is built once, validated, and then owned immutably by the rig.
Distances are meters, times are seconds, angles are degrees.
*/

use thiserror::Error;

use crate::constants::{
    DEFAULT_AIR_SPEED, DEFAULT_BANK_EASE_RATE, DEFAULT_GRAVITY, DEFAULT_GROUND_PROBE_DISTANCE,
    DEFAULT_GROUND_SPEED, DEFAULT_INITIAL_PITCH_DEG, DEFAULT_MAX_PITCH_DEG,
    DEFAULT_MESH_PITCH_SCALE, DEFAULT_MESH_ROLL_SCALE, DEFAULT_MIN_PITCH_DEG,
    DEFAULT_TILT_LIMIT_DEG, DEFAULT_TURN_RATE_DEG, DEFAULT_VERTICAL_SPEED,
};

/// Closed interval of allowed camera pitch (degrees).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchRange {
    pub min: f32,
    pub max: f32,
}

impl PitchRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, pitch: f32) -> f32 {
        pitch.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, pitch: f32) -> bool {
        (self.min..=self.max).contains(&pitch)
    }
}

impl Default for PitchRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PITCH_DEG, DEFAULT_MAX_PITCH_DEG)
    }
}

/// Reasons a `RigConfig` is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("pitch range is inverted: min {min} > max {max}")]
    InvertedPitchRange { min: f32, max: f32 },

    #[error("initial pitch {pitch} lies outside [{min}, {max}]")]
    InitialPitchOutOfRange { pitch: f32, min: f32, max: f32 },

    #[error("gravity must pull down (negative), got {0}")]
    GravityNotDownward(f32),
}

/// Immutable tuning of a motion rig.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RigConfig {
    /// Planar speed while grounded (m/s).
    pub ground_speed: f32,
    /// Planar speed while airborne (m/s).
    pub air_speed: f32,
    /// Manual ascend/descend speed (m/s).
    pub vertical_speed: f32,
    /// Look rate for yaw and pitch at full deflection (deg/s).
    pub turn_rate: f32,
    /// Camera pitch is always clamped into this range.
    pub pitch_range: PitchRange,
    /// Bank target is always clamped into `[-tilt_limit, tilt_limit]` (degrees).
    pub tilt_limit: f32,
    /// Flip the sign of vertical look.
    pub invert_look_y: bool,
    /// Vertical acceleration while airborne (m/s^2, negative).
    pub gravity: f32,
    /// Probe reach below the capsule bottom (m).
    pub ground_probe_distance: f32,
    /// Exponential decay rate of the bank toward its target (1/s).
    pub bank_ease_rate: f32,
    /// Camera pitch at spawn (degrees).
    pub initial_pitch: f32,
    /// Mesh pitch = camera pitch * this.
    pub mesh_pitch_scale: f32,
    /// Mesh roll = bank * this; negative leans into the turn.
    pub mesh_roll_scale: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            ground_speed: DEFAULT_GROUND_SPEED,
            air_speed: DEFAULT_AIR_SPEED,
            vertical_speed: DEFAULT_VERTICAL_SPEED,
            turn_rate: DEFAULT_TURN_RATE_DEG,
            pitch_range: PitchRange::default(),
            tilt_limit: DEFAULT_TILT_LIMIT_DEG,
            invert_look_y: false,
            gravity: DEFAULT_GRAVITY,
            ground_probe_distance: DEFAULT_GROUND_PROBE_DISTANCE,
            bank_ease_rate: DEFAULT_BANK_EASE_RATE,
            initial_pitch: DEFAULT_INITIAL_PITCH_DEG,
            mesh_pitch_scale: DEFAULT_MESH_PITCH_SCALE,
            mesh_roll_scale: DEFAULT_MESH_ROLL_SCALE,
        }
    }
}

impl RigConfig {
    /// Check every invariant the rig relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("ground_speed", self.ground_speed),
            ("air_speed", self.air_speed),
            ("vertical_speed", self.vertical_speed),
            ("turn_rate", self.turn_rate),
            ("pitch_range.min", self.pitch_range.min),
            ("pitch_range.max", self.pitch_range.max),
            ("tilt_limit", self.tilt_limit),
            ("gravity", self.gravity),
            ("ground_probe_distance", self.ground_probe_distance),
            ("bank_ease_rate", self.bank_ease_rate),
            ("initial_pitch", self.initial_pitch),
            ("mesh_pitch_scale", self.mesh_pitch_scale),
            ("mesh_roll_scale", self.mesh_roll_scale),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let non_negative = [
            ("ground_speed", self.ground_speed),
            ("air_speed", self.air_speed),
            ("vertical_speed", self.vertical_speed),
            ("turn_rate", self.turn_rate),
            ("tilt_limit", self.tilt_limit),
            ("ground_probe_distance", self.ground_probe_distance),
            ("bank_ease_rate", self.bank_ease_rate),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let PitchRange { min, max } = self.pitch_range;
        if min > max {
            return Err(ConfigError::InvertedPitchRange { min, max });
        }
        if !self.pitch_range.contains(self.initial_pitch) {
            return Err(ConfigError::InitialPitchOutOfRange {
                pitch: self.initial_pitch,
                min,
                max,
            });
        }

        if self.gravity >= 0.0 {
            return Err(ConfigError::GravityNotDownward(self.gravity));
        }

        Ok(())
    }
}
