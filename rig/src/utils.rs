use nalgebra::{UnitQuaternion, Vector2, Vector3};

use crate::constants::INPUT_EPSILON;

/// Ease `current` toward `target` with frame-rate independent exponential smoothing.
///
/// After one call the remaining distance is multiplied by `exp(-rate * dt)`, so
/// repeated calls never overshoot and converge monotonically. A non-positive
/// `dt` or `rate` leaves `current` unchanged; an infinite rate snaps.
#[inline]
pub fn ease_toward(current: f32, target: f32, dt: f32, rate: f32) -> f32 {
    if !(dt > 0.0) || !(rate > 0.0) {
        return current;
    }

    let alpha = 1.0 - (-rate * dt).exp();
    current + (target - current) * alpha
}

/// Is every component of a 2D axis sample within the input dead-zone?
#[inline]
pub fn is_nearly_zero2(axis: Vector2<f32>) -> bool {
    axis.x.abs() <= INPUT_EPSILON && axis.y.abs() <= INPUT_EPSILON
}

/// Is a 1D axis sample within the input dead-zone?
#[inline]
pub fn is_nearly_zero(value: f32) -> bool {
    value.abs() <= INPUT_EPSILON
}

/// Sanitize a frame delta: NaN and negative values become zero.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// A non-finite axis sample counts as no input.
#[inline]
pub fn sanitize_axis(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// 2D variant of [`sanitize_axis`]: one non-finite component discards the whole sample.
#[inline]
pub fn sanitize_axis2(axis: Vector2<f32>) -> Vector2<f32> {
    if axis.x.is_finite() && axis.y.is_finite() {
        axis
    } else {
        Vector2::zeros()
    }
}

/// Wrap an angle in degrees into `(-180, 180]`.
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { wrapped + 360.0 } else { wrapped }
}

/// Yaw-only rotation about +Y. Positive yaw turns the forward axis (-Z) toward +X (right).
#[inline]
pub fn yaw_rotation(yaw_deg: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -yaw_deg.to_radians())
}

/// Local rotation for a boom or mesh: yaw about +Y, then pitch about +X, then roll about -Z.
///
/// Positive pitch raises the forward axis; positive roll lowers the right side.
#[inline]
pub fn attitude_rotation(pitch_deg: f32, yaw_deg: f32, roll_deg: f32) -> UnitQuaternion<f32> {
    let pitch = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), pitch_deg.to_radians());
    let roll = UnitQuaternion::from_axis_angle(&-Vector3::z_axis(), roll_deg.to_radians());
    yaw_rotation(yaw_deg) * pitch * roll
}

/// Map a body-local offset expressed as (forward, right, up) into the Y-up,
/// forward = -Z local vector frame.
#[inline]
pub fn local_offset(forward: f32, right: f32, up: f32) -> Vector3<f32> {
    Vector3::new(right, up, -forward)
}
