use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use nalgebra::Vector2;
use rig::{AxisValue, InputEvent, RigAction, TriggerTracker};

use crate::config::SandboxConfig;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    #[actionlike(DualAxis)]
    Move,
    #[actionlike(DualAxis)]
    Look,
    #[actionlike(Axis)]
    Tilt,
    #[actionlike(Axis)]
    Ascend,
}

impl InputAction {
    fn from_rig_action(action: RigAction) -> Self {
        match action {
            RigAction::Move => InputAction::Move,
            RigAction::Look => InputAction::Look,
            RigAction::Tilt => InputAction::Tilt,
            RigAction::Ascend => InputAction::Ascend,
        }
    }
}

/// Per-action phase trackers fed from leafwing's action state once per frame.
#[derive(Resource)]
pub struct RigInput {
    trackers: [TriggerTracker; 4],
    /// While set, active actions are cancelled and new samples are ignored.
    pub suspended: bool,
}

impl Default for RigInput {
    fn default() -> Self {
        Self {
            trackers: RigAction::ALL.map(TriggerTracker::new),
            suspended: false,
        }
    }
}

impl RigInput {
    /// Phased events for this frame, in `RigAction::ALL` order.
    pub fn poll(&mut self, actions: &ActionState<InputAction>) -> Vec<InputEvent> {
        let suspended = self.suspended;
        self.trackers
            .iter_mut()
            .filter_map(|tracker| {
                if suspended {
                    tracker.cancel()
                } else {
                    tracker.update(sample(actions, tracker.action()))
                }
            })
            .collect()
    }
}

fn sample(actions: &ActionState<InputAction>, action: RigAction) -> AxisValue {
    let input = InputAction::from_rig_action(action);
    match action {
        RigAction::Move | RigAction::Look => {
            let pair = actions.axis_pair(&input);
            AxisValue::Axis2(Vector2::new(pair.x, pair.y))
        }
        RigAction::Tilt | RigAction::Ascend => AxisValue::Axis1(actions.value(&input)),
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    app.init_resource::<RigInput>();
    app.insert_resource(ActionState::<InputAction>::default());
    app.add_systems(Startup, insert_input_map);
}

/// Mouse motion is scaled by the configured sensitivity; stick input already sits in [-1, 1].
fn insert_input_map(mut commands: Commands, config: Res<SandboxConfig>) {
    let input_map = InputMap::default()
        .with_dual_axis(InputAction::Move, VirtualDPad::wasd())
        .with_dual_axis(InputAction::Move, GamepadStick::LEFT)
        .with_dual_axis(
            InputAction::Look,
            MouseMove::default().sensitivity(config.mouse_sensitivity),
        )
        // Stick up should raise the camera, mouse up already reports negative y.
        .with_dual_axis(InputAction::Look, GamepadStick::RIGHT.inverted_y())
        .with_axis(
            InputAction::Tilt,
            VirtualAxis::new(KeyCode::KeyQ, KeyCode::KeyE),
        )
        .with_axis(
            InputAction::Tilt,
            VirtualAxis::new(GamepadButton::LeftTrigger, GamepadButton::RightTrigger),
        )
        .with_axis(
            InputAction::Ascend,
            VirtualAxis::new(KeyCode::ShiftLeft, KeyCode::Space),
        )
        .with_axis(
            InputAction::Ascend,
            VirtualAxis::new(GamepadButton::East, GamepadButton::South),
        );

    commands.insert_resource(input_map);
}
