pub mod collision;
pub mod config;
pub mod constants;
pub mod host;
pub mod input;
pub mod motion;
pub mod utils;

pub use collision::{
    CapsuleSpec, ColliderShapeDef, RapierQueryWorld, RayHit, SweepOutcome, Transform,
    WorldStaticDef, ground_plane,
};
pub use config::{ConfigError, PitchRange, RigConfig};
pub use host::{CollisionQuery, Frame, Pawn, ViewRotation};
pub use input::{AxisValue, InputBindings, InputEvent, RigAction, TriggerPhase, TriggerTracker};
pub use motion::{CameraBoom, MeshPose, MotionRig, RigParts, TickReport};
pub use utils::{ease_toward, local_offset, yaw_rotation};
