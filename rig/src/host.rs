//! The seam between a rig and whatever hosts it.
//!
//! A host (the Bevy sandbox, a test harness) provides collision queries, the
//! frame delta, and optionally a controlling agent's view rotation. The rig
//! exposes its lifecycle through [`Pawn`] so hosts never reach into its state
//! machine directly.

use crate::{
    collision::{CapsuleSpec, RayHit, SweepOutcome, Transform, Vec3},
    input::{InputBindings, InputEvent},
    utils::sanitize_dt,
};

/// Collision queries the host engine answers for the rig.
pub trait CollisionQuery {
    /// Cast a ray and return the closest solid hit within `max_distance`.
    ///
    /// `dir` does not need to be normalized; distances are measured along its unit direction.
    fn cast_ray(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Translate a capsule by `desired` without letting it penetrate solid geometry.
    ///
    /// The request is applied fully, partially up to the first blocking contact,
    /// or not at all.
    fn sweep_capsule(
        &self,
        capsule: CapsuleSpec,
        pose: &Transform,
        desired: Vec3,
        dt: f32,
    ) -> SweepOutcome;
}

/// View rotation owned by the controlling agent (degrees).
///
/// When bound, look input drives this rotation and the rig's body yaw follows it.
/// Banking is cosmetic, so the view carries no roll.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewRotation {
    pub yaw: f32,
    pub pitch: f32,
}

/// Everything a rig needs from the host for one frame.
pub struct Frame<'a> {
    /// Seconds since the previous frame; never negative.
    pub dt: f32,
    /// Collision world. `None` skips probes and lets sweeps through unobstructed.
    pub world: Option<&'a dyn CollisionQuery>,
    /// View rotation of the controlling agent, when one is bound.
    pub view: Option<&'a mut ViewRotation>,
}

impl<'a> Frame<'a> {
    pub fn new(dt: f32) -> Self {
        Self {
            dt: sanitize_dt(dt),
            world: None,
            view: None,
        }
    }

    pub fn with_world(mut self, world: &'a dyn CollisionQuery) -> Self {
        self.world = Some(world);
        self
    }

    pub fn with_view(mut self, view: &'a mut ViewRotation) -> Self {
        self.view = Some(view);
        self
    }
}

/// Lifecycle hooks a host calls on a controllable entity.
pub trait Pawn {
    /// Called once after construction, before the first frame.
    fn on_spawn(&mut self);

    /// Subscribe to the input actions and phases this pawn reacts to.
    fn on_bind_inputs(&mut self, binder: &mut InputBindings);

    /// Receive one dispatched input event. Runs before `on_tick` in the same frame.
    fn on_input(&mut self, event: InputEvent, frame: Frame<'_>);

    /// Advance one frame.
    fn on_tick(&mut self, frame: Frame<'_>);
}
