/*!
Core collision types and math aliases shared by the rig and the query world.

Plain data only. These values pass between:
- the motion rig (which asks for probes and sweeps),
- the Rapier query world (which answers them),
- the host (which mirrors the resulting poses onto its scene graph).

Frame convention: world is Y-up. The capsule axis is +Y.
*/

use nalgebra as na;

pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// World pose of the rig body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Convert to nalgebra `Isometry3` for use with Rapier queries.
    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(
            na::Translation3::new(self.translation.x, self.translation.y, self.translation.z),
            self.rotation,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::zeros(), Quat::identity())
    }
}

/// Size of the rig's collision capsule.
///
/// `half_height` covers the straight section only; the caps add `radius` at each end.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapsuleSpec {
    pub radius: f32,
    pub half_height: f32,
}

impl CapsuleSpec {
    /// Distance from the capsule center to its lowest point.
    #[inline]
    pub fn total_half_height(&self) -> f32 {
        self.half_height + self.radius
    }
}

/// Closest hit of a ray probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance along the (unit) ray direction to the hit point.
    pub distance: f32,
}

/// Result of a sweeping translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepOutcome {
    /// World-space translation that was actually applied.
    pub applied: Vec3,
    /// Whether solid geometry stopped part (or all) of the requested translation.
    pub blocked: bool,
}

impl SweepOutcome {
    /// The whole request went through.
    #[inline]
    pub fn unobstructed(desired: Vec3) -> Self {
        Self {
            applied: desired,
            blocked: false,
        }
    }
}
