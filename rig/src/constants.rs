/// Default planar speed while grounded (meters per second).
pub const DEFAULT_GROUND_SPEED: f32 = 6.0;

/// Default planar speed while airborne (meters per second).
///
/// Convention:
/// - equal to `DEFAULT_GROUND_SPEED` = no air penalty
/// - half of it = the "heavy" feel the sandbox ships with
pub const DEFAULT_AIR_SPEED: f32 = 3.0;

/// Default speed for manual ascend/descend (meters per second).
pub const DEFAULT_VERTICAL_SPEED: f32 = 4.0;

/// Default look rate for both yaw and pitch (degrees per second at full deflection).
pub const DEFAULT_TURN_RATE_DEG: f32 = 120.0;

/// Default lower bound of camera pitch (degrees). Negative looks down.
pub const DEFAULT_MIN_PITCH_DEG: f32 = -80.0;

/// Default upper bound of camera pitch (degrees).
pub const DEFAULT_MAX_PITCH_DEG: f32 = 80.0;

/// Camera pitch at spawn (degrees), slightly looking down on the rig.
pub const DEFAULT_INITIAL_PITCH_DEG: f32 = -10.0;

/// Default maximum visual bank (degrees).
pub const DEFAULT_TILT_LIMIT_DEG: f32 = 25.0;

/// Default exponential decay rate of the bank toward its target (1/s).
pub const DEFAULT_BANK_EASE_RATE: f32 = 6.0;

/// Gravity applied to the vertical velocity while airborne (m/s^2).
/// Negative: falling means moving in -Y.
pub const DEFAULT_GRAVITY: f32 = -9.81;

/// Extra reach of the ground probe below the capsule bottom (meters).
pub const DEFAULT_GROUND_PROBE_DISTANCE: f32 = 0.06;

/// Default capsule radius (meters).
pub const DEFAULT_CAPSULE_RADIUS: f32 = 0.34;

/// Default capsule cylinder half-height (meters), excluding the hemispherical caps.
/// Total half-height is `DEFAULT_CAPSULE_HALF_HEIGHT + DEFAULT_CAPSULE_RADIUS` = 0.88.
pub const DEFAULT_CAPSULE_HALF_HEIGHT: f32 = 0.54;

/// Default camera boom length (meters).
pub const DEFAULT_BOOM_ARM_LENGTH: f32 = 3.0;

/// Mesh pitch as a fraction of the camera pitch.
pub const DEFAULT_MESH_PITCH_SCALE: f32 = 1.0;

/// Mesh roll as a fraction of the boom roll. Negative leans the mesh into the turn.
pub const DEFAULT_MESH_ROLL_SCALE: f32 = -1.0;

/// Axis magnitudes at or below this are treated as released.
pub const INPUT_EPSILON: f32 = 1.0e-4;

/// Fixed slack added to the probe length so a resting capsule always reaches the floor (meters).
pub const PROBE_EPSILON: f32 = 0.01;

/// Vertical velocities at or below this magnitude are not integrated into motion (m/s).
pub const VELOCITY_EPSILON: f32 = 1.0e-6;
