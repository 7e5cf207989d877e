/*!
Sweep and probe tolerances for the Rapier-backed query world.

Everything handed to Rapier's kinematic character controller for a sweep
lives here. Meters and seconds.
*/

/// Separation kept from surfaces when a sweep is blocked (meters).
pub const DEFAULT_SKIN: f32 = 0.02;

/// Minimum squared translation considered a real sweep (m^2).
/// Requests below this return immediately without touching the query pipeline.
pub const MIN_MOVE_SQ: f32 = 1.0e-8;

/// Directions shorter than this are rejected by the ray probe (meters).
pub const DIST_EPS: f32 = 1.0e-6;

/// Fraction of the requested translation that must be missing before a sweep
/// with no reported contact is still considered blocked.
pub const BLOCKED_SHORTFALL: f32 = 1.0e-3;
