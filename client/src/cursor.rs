use bevy::{
    input::InputSystems,
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow, WindowFocused},
};

use crate::input::RigInput;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, grab_cursor);

    // Focus changes first, so a release this frame already suspends rig input.
    app.add_systems(
        PreUpdate,
        (release_on_focus_lost, release_on_escape, grab_on_click)
            .chain()
            .after(InputSystems),
    );
}

fn set_grabbed(cursor: &mut CursorOptions, rig_input: &mut RigInput, grabbed: bool) {
    cursor.grab_mode = if grabbed {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
    cursor.visible = !grabbed;
    rig_input.suspended = !grabbed;
}

fn grab_cursor(
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
    mut rig_input: ResMut<RigInput>,
) {
    set_grabbed(&mut cursor, &mut rig_input, true);
}

fn release_on_focus_lost(
    mut messages: MessageReader<WindowFocused>,
    window: Single<(Entity, &mut CursorOptions), With<PrimaryWindow>>,
    mut rig_input: ResMut<RigInput>,
) {
    let (entity, mut cursor) = window.into_inner();
    for message in messages.read() {
        if message.window == entity && !message.focused {
            debug!("Window lost focus, releasing cursor");
            set_grabbed(&mut cursor, &mut rig_input, false);
        }
    }
}

fn release_on_escape(
    keys: Res<ButtonInput<KeyCode>>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
    mut rig_input: ResMut<RigInput>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        set_grabbed(&mut cursor, &mut rig_input, false);
    }
}

fn grab_on_click(
    mb: Res<ButtonInput<MouseButton>>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
    mut rig_input: ResMut<RigInput>,
) {
    if rig_input.suspended && mb.just_pressed(MouseButton::Left) {
        set_grabbed(&mut cursor, &mut rig_input, true);
    }
}
