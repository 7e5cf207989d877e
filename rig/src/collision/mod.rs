/*!
Collision root module.

The rig never talks to Rapier directly; it goes through the
[`CollisionQuery`](crate::host::CollisionQuery) seam. This module provides the
Rapier-backed implementation of that seam for static sandbox worlds:

- types:    shared data types (Transform, CapsuleSpec, RayHit, SweepOutcome)
- settings: sweep tolerances
- world:    static world builder, ray probe, and sweeping translation
*/

pub mod settings;
pub mod types;
pub mod world;

// Re-export commonly used types and functions.
pub use types::{CapsuleSpec, Iso, Quat, RayHit, SweepOutcome, Transform, Vec3};
pub use world::{ColliderShapeDef, RapierQueryWorld, WorldStaticDef, collider_from_def};

/// Convenience: a horizontal ground plane whose surface sits at `height`.
#[inline]
pub fn ground_plane(id: u32, height: f32) -> WorldStaticDef {
    WorldStaticDef::at(
        id,
        Vec3::new(0.0, height, 0.0),
        ColliderShapeDef::Plane {
            offset_along_normal: 0.0,
        },
    )
}

/// Convenience: build a `ColliderShapeDef::Cuboid` static with given half extents and pose.
#[inline]
pub fn cuboid_from_pose(
    id: u32,
    half_extents: Vec3,
    translation: Vec3,
    rotation: Quat,
) -> WorldStaticDef {
    WorldStaticDef {
        id,
        translation,
        rotation,
        shape: ColliderShapeDef::Cuboid { half_extents },
    }
}
