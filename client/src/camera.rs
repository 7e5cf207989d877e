use bevy::{
    camera::Exposure, core_pipeline::tonemapping::Tonemapping, prelude::*,
    transform::TransformSystems,
};
use rig::CollisionQuery;

use crate::{
    level::PhysicsWorld,
    player::Player,
    transform::{to_bevy_quat, to_bevy_vec3, to_rig_vec3},
};

/// The camera at the end of the rig's boom.
#[derive(Component)]
pub struct RigCamera;

/// Camera position in its boom's frame when nothing is in the way.
#[derive(Component)]
pub struct ArmTarget(pub Vec3);

/// How quickly the camera returns to full arm length (1/s).
const CAMERA_DECAY_RATE: f32 = 8.0;

/// Gap kept between the camera and whatever shortened the arm (meters).
const ARM_PROBE_MARGIN: f32 = 0.2;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(PostUpdate, follow_arm.before(TransformSystems::Propagate));
}

pub fn camera_bundle(arm_offset: Vec3) -> impl Bundle {
    (
        Name::new("RigCamera"),
        RigCamera,
        ArmTarget(arm_offset),
        Exposure { ev100: 12.0 },
        Tonemapping::AcesFitted,
        Camera3d::default(),
        Transform::from_translation(arm_offset),
        DistanceFog {
            color: Color::srgba(0.35, 0.48, 0.66, 1.0),
            directional_light_color: Color::srgba(1.0, 0.95, 0.85, 0.5),
            directional_light_exponent: 30.0,
            falloff: FogFalloff::from_visibility_colors(
                300.0, // Fog distance
                Color::srgb(0.35, 0.5, 0.66),
                Color::srgb(0.8, 0.8, 0.7),
            ),
        },
    )
}

/// Shorten the arm when level geometry sits between the pivot and the camera.
///
/// The pivot comes from the rig's pose this frame, not the propagated transform,
/// so the ray matches where the camera is about to be drawn. Pulling in is
/// immediate so the camera never ends up inside a wall; extending back out eases.
fn follow_arm(
    mut camera: Single<(&mut Transform, &ArmTarget), With<RigCamera>>,
    player: Single<&Player>,
    physics: Res<PhysicsWorld>,
    time: Res<Time>,
) {
    let (tf, arm) = &mut *camera;
    let rig = &player.rig;

    let body = rig.body_transform();
    let origin = to_bevy_vec3(&body.translation);
    let pivot_rotation = to_bevy_quat(&(body.rotation * rig.parts().boom.local_rotation()));
    let reach = pivot_rotation * arm.0;
    let length = reach.length();

    let hit = physics
        .0
        .cast_ray(to_rig_vec3(origin), to_rig_vec3(reach), length)
        .map(|hit| hit.distance);
    let target = arm_target(arm.0, hit);

    tf.translation = step_arm(tf.translation, target, time.delta_secs());
}

/// Arm offset that keeps `ARM_PROBE_MARGIN` between the camera and a hit `hit_distance`
/// along the full arm. No hit keeps the full arm.
fn arm_target(full: Vec3, hit_distance: Option<f32>) -> Vec3 {
    let length = full.length();
    match hit_distance {
        Some(distance) if length > f32::EPSILON => {
            full * ((distance - ARM_PROBE_MARGIN).clamp(0.0, length) / length)
        }
        _ => full,
    }
}

/// Snap in when the target is shorter than the current arm, ease out otherwise.
fn step_arm(current: Vec3, target: Vec3, dt: f32) -> Vec3 {
    if target.length_squared() < current.length_squared() {
        return target;
    }
    let mut next = current;
    next.smooth_nudge(&target, CAMERA_DECAY_RATE, dt);
    next
}
