//! Rapier-based query world for immutable sandbox geometry.
//!
//! The host builds this once from a list of static collider definitions and
//! hands it to the rig every frame as its [`CollisionQuery`].
//!
//! Properties
//! - Insertion order is sorted by `id`, so the same level always builds the same sets.
//! - Query-focused: ray probes and Rapier's `KinematicCharacterController` sweeps only.
//! - Immutable world: statics do not move after construction.
//! - The rig's own capsule is never inserted, so every query implicitly excludes it.

use rapier3d::{
    control::{CharacterLength, KinematicCharacterController},
    na::{Translation3, UnitQuaternion},
    prelude::*,
};

use super::{
    settings::{BLOCKED_SHORTFALL, DEFAULT_SKIN, DIST_EPS, MIN_MOVE_SQ},
    types::{CapsuleSpec, RayHit, SweepOutcome, Transform, Vec3},
};
use crate::host::CollisionQuery;

/// One immovable level collider, independent of any engine or file format.
///
/// Meters throughout. A plane's normal is `rotation * +Y` and its surface passes
/// through `translation + normal * offset_along_normal`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Sort key for insertion. Must be unique within a level.
    pub id: u32,
    pub translation: Vector<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
}

impl WorldStaticDef {
    /// Axis-aligned static placed at `translation`.
    pub fn at(id: u32, translation: Vector<f32>, shape: ColliderShapeDef) -> Self {
        Self {
            id,
            translation,
            rotation: UnitQuaternion::identity(),
            shape,
        }
    }

    /// Pose of the collider in world space.
    #[inline]
    pub fn iso(&self) -> Isometry<f32> {
        Isometry::from_parts(Translation3::from(self.translation), self.rotation)
    }
}

/// Shapes a level collider can take.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space). In Rapier a half-space is infinite; any
    /// visible extent is a rendering concern only.
    Plane {
        /// Shift of the surface along its own normal.
        offset_along_normal: f32,
    },

    Cuboid { half_extents: Vector<f32> },

    Sphere { radius: f32 },

    /// `half_height` excludes the caps, as in `CapsuleSpec`.
    CapsuleY { radius: f32, half_height: f32 },

    CylinderY { radius: f32, half_height: f32 },
}

/// In-memory Rapier structures needed for scene queries and sweeps against a static world.
pub struct RapierQueryWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    controller: KinematicCharacterController,
}

impl RapierQueryWorld {
    /// Build a query world from static collider definitions.
    ///
    /// The input is sorted by `id` before insertion. NaN/invalid values should be
    /// filtered by the caller.
    pub fn build(defs: impl IntoIterator<Item = WorldStaticDef>) -> Self {
        let mut defs: Vec<WorldStaticDef> = defs.into_iter().collect();
        defs.sort_by_key(|d| d.id);

        let bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut modified_colliders = Vec::with_capacity(defs.len());

        for def in &defs {
            let mut collider = collider_from_def(def);
            collider.set_position(def.iso() * collider_local_offset(def));
            modified_colliders.push(colliders.insert(collider));
        }

        // Only the broad-phase BVH is needed for queries; there is no dynamics step.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut events = Vec::new();
        broad_phase.update(
            &IntegrationParameters::default(),
            &colliders,
            &bodies,
            &modified_colliders,
            &[],
            &mut events,
        );

        log::debug!("built query world with {} static colliders", colliders.len());

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase: NarrowPhase::default(),
            controller: sweep_controller(),
        }
    }

    /// Number of static colliders in the world.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Borrowed `QueryPipeline` over fixed colliders only.
    fn query_pipeline(&self) -> QueryPipeline<'_> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            QueryFilter::only_fixed(),
        )
    }
}

impl CollisionQuery for RapierQueryWorld {
    fn cast_ray(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<RayHit> {
        let len = dir.norm();
        if len <= DIST_EPS || max_distance <= 0.0 {
            return None;
        }

        let ray = Ray::new(Point::from(origin), dir / len);
        self.query_pipeline()
            .cast_ray(&ray, max_distance, true)
            .map(|(_handle, distance)| RayHit { distance })
    }

    fn sweep_capsule(
        &self,
        capsule: CapsuleSpec,
        pose: &Transform,
        desired: Vec3,
        dt: f32,
    ) -> SweepOutcome {
        if desired.norm_squared() <= MIN_MOVE_SQ {
            return SweepOutcome::unobstructed(Vec3::zeros());
        }

        let pipeline = self.query_pipeline();
        let mut contacts = 0usize;
        let movement = self.controller.move_shape(
            dt,
            &pipeline,
            &Capsule::new_y(capsule.half_height, capsule.radius),
            &pose.iso(),
            desired,
            |_| contacts += 1,
        );

        let applied = movement.translation;
        let shortfall = (desired - applied).norm();
        let blocked = contacts > 0 || shortfall > desired.norm() * BLOCKED_SHORTFALL;
        if blocked {
            log::trace!("sweep blocked: desired {desired:?}, applied {applied:?}");
        }

        SweepOutcome { applied, blocked }
    }
}

/// Controller used for every sweep: no sliding, stepping or snapping, so a
/// blocked request stops at the first contact minus the skin.
fn sweep_controller() -> KinematicCharacterController {
    KinematicCharacterController {
        offset: CharacterLength::Absolute(DEFAULT_SKIN),
        slide: false,
        autostep: None,
        snap_to_ground: None,
        ..KinematicCharacterController::default()
    }
}

/// Local placement of the collider relative to the definition pose.
fn collider_local_offset(def: &WorldStaticDef) -> Isometry<f32> {
    match def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => Isometry::translation(0.0, offset_along_normal, 0.0),
        _ => Isometry::identity(),
    }
}

/// Build a Rapier collider from a `WorldStaticDef`, in the definition's local frame.
pub fn collider_from_def(def: &WorldStaticDef) -> Collider {
    match &def.shape {
        // Local +Y is the outward normal; the pose rotation orients it in the world.
        ColliderShapeDef::Plane { .. } => ColliderBuilder::halfspace(Vector::y_axis()).build(),

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build()
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius).build(),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius).build(),

        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => ColliderBuilder::cylinder(*half_height, *radius).build(),
    }
}
