use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use rig::{Frame, Pawn};

use super::{Player, PlayerController};
use crate::{
    input::{InputAction, RigInput},
    level::PhysicsWorld,
};

/// Deliver this frame's phased input to the rig, then tick it.
pub(super) fn drive_rig(
    mut player: Single<&mut Player>,
    controller: Option<ResMut<PlayerController>>,
    mut rig_input: ResMut<RigInput>,
    actions: Res<ActionState<InputAction>>,
    physics: Res<PhysicsWorld>,
    time: Res<Time>,
) {
    let Some(mut controller) = controller else {
        return;
    };
    let PlayerController {
        bindings,
        view,
        decoupled_look,
    } = &mut *controller;

    let dt = time.delta_secs();
    let rig = &mut player.rig;

    for event in rig_input.poll(&actions) {
        let mut frame = Frame::new(dt).with_world(&physics.0);
        if *decoupled_look {
            frame = frame.with_view(view);
        }
        if !bindings.dispatch(rig, event, frame) {
            trace!("Unbound input {:?} {:?}", event.action, event.phase);
        }
    }

    rig.on_tick(Frame::new(dt).with_world(&physics.0));
}
