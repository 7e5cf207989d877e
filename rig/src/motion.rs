//! The motion rig: one controllable capsule with a camera boom and a visual mesh.
//!
//! Per frame the host delivers bound input events first, then calls
//! [`MotionRig::tick`]. Input handlers may translate the body immediately (move,
//! ascend); tick probes for ground, integrates gravity, eases the bank and
//! re-derives the boom and mesh poses.
//!
//! The body translation only ever changes through [`CollisionQuery::sweep_capsule`],
//! so the capsule never ends up inside solid geometry. Banking is cosmetic: it
//! rolls the boom and the mesh, never the capsule.

use nalgebra::Vector2;

use crate::{
    collision::{CapsuleSpec, Quat, SweepOutcome, Transform, Vec3},
    config::{ConfigError, RigConfig},
    constants::{
        DEFAULT_BOOM_ARM_LENGTH, DEFAULT_CAPSULE_HALF_HEIGHT, DEFAULT_CAPSULE_RADIUS,
        PROBE_EPSILON, VELOCITY_EPSILON,
    },
    host::{CollisionQuery, Frame, Pawn, ViewRotation},
    input::{InputBindings, InputEvent, RigAction, TriggerPhase},
    utils::{
        attitude_rotation, ease_toward, is_nearly_zero, is_nearly_zero2, local_offset,
        sanitize_axis, sanitize_axis2, wrap_degrees, yaw_rotation,
    },
};

/// Camera boom attached to the body. Its rotation is local to the body and never inherits
/// the body's pitch or roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBoom {
    /// Distance from the pivot to the camera (meters).
    pub arm_length: f32,
    /// Local pitch (degrees).
    pub pitch: f32,
    /// Local roll (degrees).
    pub roll: f32,
}

impl CameraBoom {
    pub fn new(arm_length: f32) -> Self {
        Self {
            arm_length,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    #[inline]
    pub fn local_rotation(&self) -> Quat {
        attitude_rotation(self.pitch, 0.0, self.roll)
    }

    /// Camera offset from the pivot in the boom's rotated frame: straight back along the arm.
    #[inline]
    pub fn camera_offset(&self) -> Vec3 {
        local_offset(-self.arm_length, 0.0, 0.0)
    }
}

/// Visual mesh pose relative to the body (degrees).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshPose {
    pub pitch: f32,
    pub roll: f32,
}

impl MeshPose {
    #[inline]
    pub fn local_rotation(&self) -> Quat {
        attitude_rotation(self.pitch, 0.0, self.roll)
    }
}

/// Sub-objects owned by the rig, built once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigParts {
    pub capsule: CapsuleSpec,
    pub boom: CameraBoom,
    pub mesh: MeshPose,
}

impl Default for RigParts {
    fn default() -> Self {
        Self {
            capsule: CapsuleSpec {
                radius: DEFAULT_CAPSULE_RADIUS,
                half_height: DEFAULT_CAPSULE_HALF_HEIGHT,
            },
            boom: CameraBoom::new(DEFAULT_BOOM_ARM_LENGTH),
            mesh: MeshPose::default(),
        }
    }
}

/// What one `tick` did, for logging and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub grounded: bool,
    /// Whether `grounded` differs from the previous frame.
    pub transitioned: bool,
    /// The gravity/momentum sweep, if one was requested.
    pub fall: Option<SweepOutcome>,
}

/// Per-frame motion and orientation state machine for one controlled entity.
#[derive(Clone, Debug)]
pub struct MotionRig {
    config: RigConfig,
    parts: RigParts,

    translation: Vec3,
    yaw: f32,

    move_axis: Vector2<f32>,
    look_axis: Vector2<f32>,
    tilt_axis: f32,
    ascend_axis: f32,

    current_speed: f32,
    camera_pitch: f32,
    vertical_velocity: f32,
    bank_target: f32,
    bank_current: f32,
    grounded: bool,
}

impl MotionRig {
    /// Build a rig at `translation` facing yaw 0 (world -Z).
    pub fn new(config: RigConfig, parts: RigParts, translation: Vec3) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            parts,
            translation,
            yaw: 0.0,
            move_axis: Vector2::zeros(),
            look_axis: Vector2::zeros(),
            tilt_axis: 0.0,
            ascend_axis: 0.0,
            current_speed: config.ground_speed,
            camera_pitch: config.initial_pitch,
            vertical_velocity: 0.0,
            bank_target: 0.0,
            bank_current: 0.0,
            grounded: false,
        })
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn parts(&self) -> &RigParts {
        &self.parts
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Body yaw (degrees, wrapped into `(-180, 180]`).
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Body pose. Pitch and roll are always zero.
    pub fn body_transform(&self) -> Transform {
        Transform::new(self.translation, yaw_rotation(self.yaw))
    }

    pub fn move_axis(&self) -> Vector2<f32> {
        self.move_axis
    }

    pub fn look_axis(&self) -> Vector2<f32> {
        self.look_axis
    }

    pub fn tilt_axis(&self) -> f32 {
        self.tilt_axis
    }

    pub fn ascend_axis(&self) -> f32 {
        self.ascend_axis
    }

    /// Speed tier picked at the last move event.
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn camera_pitch(&self) -> f32 {
        self.camera_pitch
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn bank_target(&self) -> f32 {
        self.bank_target
    }

    pub fn bank_current(&self) -> f32 {
        self.bank_current
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// View rotation a newly bound controlling agent should start from.
    pub fn seed_view(&self) -> ViewRotation {
        ViewRotation {
            yaw: self.yaw,
            pitch: self.camera_pitch,
        }
    }

    /// Probe length below the body origin.
    #[inline]
    pub fn probe_length(&self) -> f32 {
        self.parts.capsule.total_half_height() + self.config.ground_probe_distance + PROBE_EPSILON
    }

    /// Start and end of the ground probe ray in world space.
    pub fn probe_segment(&self) -> (Vec3, Vec3) {
        let start = self.translation;
        (start, start - Vec3::y() * self.probe_length())
    }

    /// Recompute `grounded` from a downward probe. No world means airborne.
    pub fn update_grounded_state(&mut self, world: Option<&dyn CollisionQuery>) -> bool {
        self.grounded = world
            .and_then(|world| world.cast_ray(self.translation, -Vec3::y(), self.probe_length()))
            .is_some();
        self.grounded
    }

    /// Store the move sample and, when non-zero, translate the body this frame.
    ///
    /// The speed tier is chosen here from the grounded state of the last tick.
    pub fn on_move(&mut self, axis: Vector2<f32>, frame: Frame<'_>) -> Option<SweepOutcome> {
        let axis = sanitize_axis2(axis);
        self.move_axis = axis;
        self.current_speed = if self.grounded {
            self.config.ground_speed
        } else {
            self.config.air_speed
        };

        if is_nearly_zero2(axis) || frame.dt <= 0.0 {
            return None;
        }

        let step = self.current_speed * frame.dt;
        let local = local_offset(axis.y * step, axis.x * step, 0.0);
        Some(self.sweep_local(local, frame.world, frame.dt))
    }

    /// Apply look input to the view rotation (decoupled) or the body (coupled fallback).
    pub fn on_look(&mut self, axis: Vector2<f32>, frame: Frame<'_>) {
        let axis = sanitize_axis2(axis);
        self.look_axis = axis;

        let yaw_delta = axis.x * self.config.turn_rate * frame.dt;
        let pitch_sign = if self.config.invert_look_y { 1.0 } else { -1.0 };
        let pitch_delta = pitch_sign * axis.y * self.config.turn_rate * frame.dt;
        let range = self.config.pitch_range;

        match frame.view {
            Some(view) => {
                view.yaw = wrap_degrees(view.yaw + yaw_delta);
                view.pitch = range.clamp(view.pitch + pitch_delta);

                // Body follows the view's yaw so forward movement matches what the camera sees.
                self.yaw = view.yaw;
                self.camera_pitch = view.pitch;
            }
            None => {
                if yaw_delta != 0.0 {
                    self.yaw = wrap_degrees(self.yaw + yaw_delta);
                }
                self.camera_pitch = range.clamp(self.camera_pitch + pitch_delta);
            }
        }

        self.sync_boom();
        self.sync_mesh_pitch();
    }

    /// Set the cosmetic bank target. Positive input (lean right) gives a negative boom roll.
    pub fn on_tilt(&mut self, axis: f32) {
        let axis = sanitize_axis(axis);
        self.tilt_axis = axis;
        let limit = self.config.tilt_limit;
        self.bank_target = (-axis * limit).clamp(-limit, limit);
    }

    /// Manual vertical control. While active it overrides gravity.
    pub fn on_ascend(&mut self, axis: f32, frame: Frame<'_>) -> Option<SweepOutcome> {
        let axis = sanitize_axis(axis);
        self.ascend_axis = axis;

        if is_nearly_zero(axis) || frame.dt <= 0.0 {
            return None;
        }

        let local = local_offset(0.0, 0.0, axis * self.config.vertical_speed * frame.dt);
        let outcome = self.sweep_local(local, frame.world, frame.dt);
        self.vertical_velocity = 0.0;
        Some(outcome)
    }

    /// Advance one frame: probe, gravity, fall sweep, bank easing, boom and mesh sync.
    pub fn tick(&mut self, frame: Frame<'_>) -> TickReport {
        let dt = frame.dt;
        let was_grounded = self.grounded;
        let grounded = self.update_grounded_state(frame.world);

        if is_nearly_zero(self.ascend_axis) {
            if !grounded {
                self.vertical_velocity += self.config.gravity * dt;
            } else if self.vertical_velocity < 0.0 {
                self.vertical_velocity = 0.0;
            }
        }

        let fall = if self.vertical_velocity.abs() > VELOCITY_EPSILON && dt > 0.0 {
            let local = local_offset(0.0, 0.0, self.vertical_velocity * dt);
            Some(self.sweep_local(local, frame.world, dt))
        } else {
            None
        };

        self.bank_current = ease_toward(
            self.bank_current,
            self.bank_target,
            dt,
            self.config.bank_ease_rate,
        );

        self.sync_boom();
        self.sync_mesh();

        let transitioned = grounded != was_grounded;
        if transitioned {
            log::debug!(
                "rig {} at y = {:.3} (vertical velocity {:.3})",
                if grounded { "landed" } else { "left ground" },
                self.translation.y,
                self.vertical_velocity
            );
        }

        TickReport {
            grounded,
            transitioned,
            fall,
        }
    }

    /// Rotate a body-local offset into world space and sweep it.
    fn sweep_local(
        &mut self,
        local: Vec3,
        world: Option<&dyn CollisionQuery>,
        dt: f32,
    ) -> SweepOutcome {
        let desired = yaw_rotation(self.yaw) * local;
        let outcome = match world {
            Some(world) => {
                world.sweep_capsule(self.parts.capsule, &self.body_transform(), desired, dt)
            }
            None => SweepOutcome::unobstructed(desired),
        };

        self.translation += outcome.applied;
        outcome
    }

    fn sync_boom(&mut self) {
        self.parts.boom.pitch = self.camera_pitch;
        self.parts.boom.roll = self.bank_current;
    }

    fn sync_mesh_pitch(&mut self) {
        self.parts.mesh.pitch = self.camera_pitch * self.config.mesh_pitch_scale;
    }

    fn sync_mesh(&mut self) {
        self.sync_mesh_pitch();
        self.parts.mesh.roll = self.bank_current * self.config.mesh_roll_scale;
    }
}

impl Pawn for MotionRig {
    fn on_spawn(&mut self) {
        self.bank_current = self.bank_target;
        self.sync_boom();
        self.sync_mesh();
        log::debug!(
            "rig spawned at {:?}, pitch {:.1}",
            self.translation,
            self.camera_pitch
        );
    }

    fn on_bind_inputs(&mut self, binder: &mut InputBindings) {
        // Completed must be bound too, otherwise a release would leave the last sample latched.
        for action in RigAction::ALL {
            binder.bind(action, &TriggerPhase::ALL);
        }
    }

    fn on_input(&mut self, event: InputEvent, frame: Frame<'_>) {
        match event.action {
            RigAction::Move => {
                self.on_move(event.value.as_axis2(), frame);
            }
            RigAction::Look => self.on_look(event.value.as_axis2(), frame),
            RigAction::Tilt => self.on_tilt(event.value.as_axis1()),
            RigAction::Ascend => {
                self.on_ascend(event.value.as_axis1(), frame);
            }
        }
    }

    fn on_tick(&mut self, frame: Frame<'_>) {
        self.tick(frame);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{
        collision::RayHit,
        config::PitchRange,
        input::{AxisValue, TriggerTracker},
    };

    /// Infinite floor at `height`. Sweeps stop the capsule bottom on it.
    struct FlatFloor {
        height: f32,
    }

    impl CollisionQuery for FlatFloor {
        fn cast_ray(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<RayHit> {
            if dir.y >= 0.0 {
                return None;
            }
            let distance = origin.y - self.height;
            (distance >= 0.0 && distance <= max_distance).then_some(RayHit { distance })
        }

        fn sweep_capsule(
            &self,
            capsule: CapsuleSpec,
            pose: &Transform,
            desired: Vec3,
            _dt: f32,
        ) -> SweepOutcome {
            let lowest = self.height + capsule.total_half_height();
            let end_y = pose.translation.y + desired.y;
            if end_y >= lowest {
                return SweepOutcome::unobstructed(desired);
            }
            SweepOutcome {
                applied: Vec3::new(desired.x, lowest - pose.translation.y, desired.z),
                blocked: true,
            }
        }
    }

    /// Reports ground everywhere and records the last sweep request.
    #[derive(Default)]
    struct Recording {
        last_desired: Cell<Option<Vec3>>,
        grounded: bool,
    }

    impl CollisionQuery for Recording {
        fn cast_ray(&self, _origin: Vec3, _dir: Vec3, _max_distance: f32) -> Option<RayHit> {
            self.grounded.then_some(RayHit { distance: 0.5 })
        }

        fn sweep_capsule(
            &self,
            _capsule: CapsuleSpec,
            _pose: &Transform,
            desired: Vec3,
            _dt: f32,
        ) -> SweepOutcome {
            self.last_desired.set(Some(desired));
            SweepOutcome::unobstructed(desired)
        }
    }

    fn rig_with(config: RigConfig) -> MotionRig {
        let mut rig = MotionRig::new(config, RigParts::default(), Vec3::new(0.0, 5.0, 0.0))
            .expect("valid config");
        rig.on_spawn();
        rig
    }

    fn rig() -> MotionRig {
        rig_with(RigConfig::default())
    }

    fn approx(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = RigConfig {
            gravity: 1.0,
            ..RigConfig::default()
        };
        assert!(MotionRig::new(config, RigParts::default(), Vec3::zeros()).is_err());
    }

    #[test]
    fn pitch_stays_in_range_for_any_look_input() {
        let axes = [-50.0, -1.0, -0.3, 0.0, 0.7, 1.0, 75.0];
        let dts = [0.0, 0.001, 0.016, 0.1, 2.0];

        for coupled in [true, false] {
            let mut rig = rig();
            let mut view = rig.seed_view();
            for &y in &axes {
                for &dt in &dts {
                    let frame = if coupled {
                        Frame::new(dt)
                    } else {
                        Frame::new(dt).with_view(&mut view)
                    };
                    rig.on_look(Vector2::new(0.3, y), frame);
                    assert!(
                        rig.config().pitch_range.contains(rig.camera_pitch()),
                        "pitch {} escaped range (coupled = {coupled})",
                        rig.camera_pitch()
                    );
                }
            }
        }
    }

    #[test]
    fn non_finite_samples_are_treated_as_no_input() {
        let mut rig = rig();
        let mut view = rig.seed_view();
        let start = rig.translation();
        let pitch = rig.camera_pitch();

        rig.on_look(Vector2::new(0.0, f32::NAN), Frame::new(0.016));
        rig.on_look(
            Vector2::new(f32::INFINITY, 1.0),
            Frame::new(0.016).with_view(&mut view),
        );
        assert_eq!(rig.camera_pitch(), pitch);
        assert_eq!(view, rig.seed_view());
        assert!(rig.yaw().is_finite());

        assert!(rig.on_move(Vector2::new(f32::NAN, 1.0), Frame::new(0.1)).is_none());
        assert!(rig.on_ascend(f32::NEG_INFINITY, Frame::new(0.1)).is_none());
        assert_eq!(rig.translation(), start);

        rig.on_tilt(f32::NAN);
        assert_eq!(rig.bank_target(), 0.0);
        assert_eq!(rig.tilt_axis(), 0.0);
    }

    #[test]
    fn pitch_saturates_at_max_under_repeated_look_down_axis() {
        let mut rig = rig_with(RigConfig {
            pitch_range: PitchRange::new(-80.0, 80.0),
            ..RigConfig::default()
        });

        for _ in 0..200 {
            rig.on_look(Vector2::new(0.0, -1.0), Frame::new(0.05));
        }
        assert_eq!(rig.camera_pitch(), 80.0);

        rig.on_look(Vector2::new(0.0, -1.0), Frame::new(0.05));
        assert_eq!(rig.camera_pitch(), 80.0);
    }

    #[test]
    fn inverted_look_saturates_at_min() {
        let mut rig = rig_with(RigConfig {
            invert_look_y: true,
            ..RigConfig::default()
        });

        for _ in 0..200 {
            rig.on_look(Vector2::new(0.0, -1.0), Frame::new(0.05));
        }
        assert_eq!(rig.camera_pitch(), -80.0);
    }

    #[test]
    fn decoupled_look_drives_view_and_copies_yaw() {
        let mut rig = rig();
        let mut view = rig.seed_view();

        rig.on_look(Vector2::new(1.0, 0.5), Frame::new(0.1).with_view(&mut view));

        // 120 deg/s * 0.1 s
        assert!(approx(view.yaw, 12.0, 1.0e-4));
        assert!(approx(view.pitch, -10.0 - 6.0, 1.0e-4));
        assert_eq!(rig.yaw(), view.yaw);
        assert_eq!(rig.camera_pitch(), view.pitch);

        // Body stays upright: only yaw is encoded in the body rotation.
        let up = rig.body_transform().rotation * Vec3::y();
        assert!((up - Vec3::y()).norm() < 1.0e-5);
    }

    #[test]
    fn coupled_fallback_rotates_body_directly() {
        let mut rig = rig();
        rig.on_look(Vector2::new(-1.0, 0.0), Frame::new(0.25));
        assert!(approx(rig.yaw(), -30.0, 1.0e-4));
        assert!(approx(rig.camera_pitch(), -10.0, 1.0e-6));
    }

    #[test]
    fn look_syncs_boom_and_mesh_pitch_immediately() {
        let mut rig = rig();
        rig.on_look(Vector2::new(0.0, -1.0), Frame::new(0.1));
        assert_eq!(rig.parts().boom.pitch, rig.camera_pitch());
        assert_eq!(rig.parts().mesh.pitch, rig.camera_pitch());
    }

    #[test]
    fn bank_target_is_bounded_for_any_tilt() {
        let mut rig = rig();
        for axis in [-100.0, -1.0, -0.4, 0.0, 0.4, 1.0, 100.0] {
            rig.on_tilt(axis);
            let limit = rig.config().tilt_limit;
            assert!(rig.bank_target() >= -limit && rig.bank_target() <= limit);
        }
    }

    #[test]
    fn full_right_tilt_targets_negative_limit() {
        let mut rig = rig_with(RigConfig {
            tilt_limit: 25.0,
            ..RigConfig::default()
        });
        rig.on_tilt(1.0);
        assert_eq!(rig.bank_target(), -25.0);
    }

    #[test]
    fn bank_eases_by_exponential_fraction_in_one_tick() {
        let rate = 6.0;
        let dt = 0.05;
        let mut rig = rig_with(RigConfig {
            tilt_limit: 25.0,
            bank_ease_rate: rate,
            ..RigConfig::default()
        });
        rig.on_tilt(-1.0);
        rig.tick(Frame::new(dt));

        let expected = 25.0 * (1.0 - (-rate * dt).exp());
        assert!(approx(rig.bank_current(), expected, 1.0e-4));
        assert!(rig.bank_current() < 25.0);
    }

    #[test]
    fn bank_converges_monotonically_within_bounded_frames() {
        let rate = 6.0;
        let dt = 1.0 / 60.0;
        let eps = 1.0e-3;
        let mut rig = rig_with(RigConfig {
            bank_ease_rate: rate,
            ..RigConfig::default()
        });
        rig.on_tilt(1.0);
        let target = rig.bank_target();

        let bound = ((target.abs() / eps).ln() / (rate * dt)).ceil() as usize + 1;
        let mut previous_gap = (target - rig.bank_current()).abs();
        let mut frames = 0;
        while (target - rig.bank_current()).abs() > eps {
            rig.tick(Frame::new(dt));
            let gap = (target - rig.bank_current()).abs();
            assert!(gap <= previous_gap);
            previous_gap = gap;
            frames += 1;
            assert!(frames <= bound, "bank did not converge within {bound} frames");
        }
    }

    #[test]
    fn mesh_leans_against_the_boom_roll() {
        let mut rig = rig();
        rig.on_tilt(1.0);
        for _ in 0..10 {
            rig.tick(Frame::new(0.05));
        }
        assert_eq!(rig.parts().boom.roll, rig.bank_current());
        assert_eq!(rig.parts().mesh.roll, -rig.bank_current());
        assert!(rig.parts().mesh.roll > 0.0);
    }

    #[test]
    fn grounded_probe_is_idempotent() {
        let floor = FlatFloor { height: 4.2 };
        let mut rig = rig();

        let first = rig.update_grounded_state(Some(&floor));
        let second = rig.update_grounded_state(Some(&floor));
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn missing_world_means_airborne() {
        let mut rig = rig();
        assert!(!rig.update_grounded_state(None));
        let report = rig.tick(Frame::new(0.016));
        assert!(!report.grounded);
    }

    #[test]
    fn probe_reaches_just_past_capsule_bottom() {
        let rig = rig();
        let (start, end) = rig.probe_segment();
        let expected = rig.parts().capsule.total_half_height()
            + rig.config().ground_probe_distance
            + PROBE_EPSILON;
        assert!(approx(start.y - end.y, expected, 1.0e-6));
    }

    #[test]
    fn gravity_accumulates_while_airborne() {
        let dt = 0.02;
        let frames = 25;
        let mut rig = rig();

        let mut previous_y = rig.translation().y;
        for _ in 0..frames {
            rig.tick(Frame::new(dt));
            assert!(rig.translation().y < previous_y);
            previous_y = rig.translation().y;
        }

        let expected = rig.config().gravity * dt * frames as f32;
        assert!(approx(rig.vertical_velocity(), expected, 1.0e-4));
    }

    #[test]
    fn landing_clamps_downward_velocity() {
        let mut rig = rig();
        for _ in 0..10 {
            rig.tick(Frame::new(0.05));
        }
        assert!(rig.vertical_velocity() < 0.0);

        let ground = Recording {
            grounded: true,
            ..Recording::default()
        };
        let report = rig.tick(Frame::new(0.05).with_world(&ground));
        assert!(report.grounded);
        assert!(report.transitioned);
        assert_eq!(rig.vertical_velocity(), 0.0);
        assert!(report.fall.is_none());
    }

    #[test]
    fn falling_rig_comes_to_rest_on_floor() {
        let floor = FlatFloor { height: 0.0 };
        let mut rig = rig();
        for _ in 0..300 {
            rig.tick(Frame::new(1.0 / 60.0).with_world(&floor));
        }
        let rest = rig.parts().capsule.total_half_height();
        assert!(rig.is_grounded());
        assert!(approx(rig.translation().y, rest, 1.0e-4));
        assert_eq!(rig.vertical_velocity(), 0.0);
    }

    #[test]
    fn grounded_forward_move_uses_ground_speed() {
        let mut rig = rig_with(RigConfig {
            ground_speed: 600.0,
            ..RigConfig::default()
        });
        let world = Recording {
            grounded: true,
            ..Recording::default()
        };
        rig.update_grounded_state(Some(&world));

        let start = rig.translation();
        let outcome = rig
            .on_move(Vector2::new(0.0, 1.0), Frame::new(0.1).with_world(&world))
            .expect("moved");

        // 60 units along forward, which is world -Z at yaw 0.
        let desired = world.last_desired.get().expect("sweep requested");
        assert!((desired - Vec3::new(0.0, 0.0, -60.0)).norm() < 1.0e-3);
        assert_eq!(outcome.applied, desired);
        assert!((rig.translation() - start - desired).norm() < 1.0e-3);
        assert_eq!(rig.current_speed(), 600.0);
    }

    #[test]
    fn strafe_follows_body_yaw() {
        let mut rig = rig();
        rig.on_look(Vector2::new(1.0, 0.0), Frame::new(0.75));
        assert!(approx(rig.yaw(), 90.0, 1.0e-3));

        let world = Recording::default();
        rig.on_move(Vector2::new(0.0, 1.0), Frame::new(1.0).with_world(&world));
        let desired = world.last_desired.get().expect("sweep requested");

        // Facing +X after a quarter turn right; airborne so air speed applies.
        let air = rig.config().air_speed;
        assert!((desired - Vec3::new(air, 0.0, 0.0)).norm() < 1.0e-3);
    }

    #[test]
    fn airborne_move_uses_air_speed() {
        let mut rig = rig();
        rig.on_move(Vector2::new(1.0, 0.0), Frame::new(0.1));
        assert_eq!(rig.current_speed(), rig.config().air_speed);
    }

    #[test]
    fn zero_dt_move_stores_axis_without_motion() {
        let mut rig = rig();
        let start = rig.translation();
        let outcome = rig.on_move(Vector2::new(0.0, 1.0), Frame::new(0.0));
        assert!(outcome.is_none());
        assert_eq!(rig.move_axis(), Vector2::new(0.0, 1.0));
        assert_eq!(rig.translation(), start);
    }

    #[test]
    fn ascend_applies_offset_and_resets_velocity() {
        let mut rig = rig_with(RigConfig {
            vertical_speed: 400.0,
            ..RigConfig::default()
        });
        for _ in 0..5 {
            rig.tick(Frame::new(0.1));
        }
        assert!(rig.vertical_velocity() < 0.0);

        let world = Recording::default();
        rig.on_ascend(0.5, Frame::new(0.02).with_world(&world));

        let desired = world.last_desired.get().expect("sweep requested");
        assert!((desired - Vec3::new(0.0, 4.0, 0.0)).norm() < 1.0e-4);
        assert_eq!(rig.vertical_velocity(), 0.0);
    }

    #[test]
    fn active_ascend_suspends_gravity() {
        let mut rig = rig();
        rig.on_ascend(1.0, Frame::new(0.016));
        rig.tick(Frame::new(0.016));
        assert_eq!(rig.vertical_velocity(), 0.0);

        rig.on_ascend(0.0, Frame::new(0.016));
        rig.tick(Frame::new(0.016));
        assert!(rig.vertical_velocity() < 0.0);
    }

    #[test]
    fn blocked_sweep_never_penetrates_floor() {
        let floor = FlatFloor { height: 3.5 };
        let mut rig = rig();
        let outcome = rig
            .on_ascend(-1.0, Frame::new(1.0).with_world(&floor))
            .expect("requested");
        assert!(outcome.blocked);
        let bottom = rig.translation().y - rig.parts().capsule.total_half_height();
        assert!(bottom >= 3.5 - 1.0e-5);
    }

    #[test]
    fn dispatched_events_reach_handlers_and_release_clears_samples() {
        let mut rig = rig();
        let mut bindings = InputBindings::new();
        rig.on_bind_inputs(&mut bindings);

        for action in RigAction::ALL {
            for phase in TriggerPhase::ALL {
                assert!(bindings.is_bound(action, phase));
            }
        }

        let mut tracker = TriggerTracker::new(RigAction::Move);
        let press = tracker
            .update(AxisValue::Axis2(Vector2::new(0.0, 1.0)))
            .expect("started");
        assert!(bindings.dispatch(&mut rig, press, Frame::new(0.016)));
        assert_eq!(rig.move_axis(), Vector2::new(0.0, 1.0));

        let release = tracker
            .update(AxisValue::Axis2(Vector2::zeros()))
            .expect("completed");
        assert!(bindings.dispatch(&mut rig, release, Frame::new(0.016)));
        assert_eq!(rig.move_axis(), Vector2::zeros());
    }

    #[test]
    fn spawn_syncs_parts_from_initial_state() {
        let rig = rig();
        assert_eq!(rig.parts().boom.pitch, rig.config().initial_pitch);
        assert_eq!(rig.parts().boom.roll, 0.0);
        assert_eq!(rig.parts().mesh.pitch, rig.config().initial_pitch);
    }

    #[test]
    fn boom_camera_sits_behind_the_pivot() {
        let boom = CameraBoom::new(3.0);
        assert!((boom.camera_offset() - Vec3::new(0.0, 0.0, 3.0)).norm() < 1.0e-6);
    }
}
