//! Presentation: mirror rig poses onto Bevy transforms.
//!
//! The rig works in nalgebra types with the same Y-up, forward = -Z frame Bevy
//! uses, so conversion is a plain component copy.

use bevy::prelude::*;
use rig::collision as rc;

use crate::player::{Player, RigBoom, RigMesh};

#[inline]
pub fn to_bevy_vec3(v: &rc::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_rig_vec3(v: Vec3) -> rc::Vec3 {
    rc::Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_bevy_quat(q: &rc::Quat) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

/// Body gets translation and yaw; boom and mesh get their local attitude.
pub(super) fn mirror_rig_poses(
    mut body: Single<(&Player, &mut Transform), (Without<RigBoom>, Without<RigMesh>)>,
    mut boom: Single<&mut Transform, (With<RigBoom>, Without<Player>, Without<RigMesh>)>,
    mut mesh: Single<&mut Transform, (With<RigMesh>, Without<Player>, Without<RigBoom>)>,
) {
    let (player, body_tf) = &mut *body;
    let rig = &player.rig;

    let pose = rig.body_transform();
    body_tf.translation = to_bevy_vec3(&pose.translation);
    body_tf.rotation = to_bevy_quat(&pose.rotation);

    boom.rotation = to_bevy_quat(&rig.parts().boom.local_rotation());
    mesh.rotation = to_bevy_quat(&rig.parts().mesh.local_rotation());
}
