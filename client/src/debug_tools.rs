//! Debug/performance tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (recommended: `#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;

use crate::{player::Player, transform::to_bevy_vec3};

const GROUNDED_COLOR: Color = Color::srgb(0.2, 1.0, 0.3);
const AIRBORNE_COLOR: Color = Color::srgb(1.0, 0.25, 0.2);

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(Update, (draw_ground_probe, draw_player_facing));
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

/// The probe ray of the last tick: green while grounded, red while airborne.
fn draw_ground_probe(mut gizmos: Gizmos, player: Single<&Player>) {
    let rig = &player.rig;
    let (start, end) = rig.probe_segment();
    let color = if rig.is_grounded() {
        GROUNDED_COLOR
    } else {
        AIRBORNE_COLOR
    };
    gizmos.line(to_bevy_vec3(&start), to_bevy_vec3(&end), color);
}

fn draw_player_facing(mut gizmos: Gizmos, player: Single<&GlobalTransform, With<Player>>) {
    let (_, rot, start) = player.to_scale_rotation_translation();

    // -Z is forward
    let end = start + rot * Vec3::NEG_Z * 1.5;
    gizmos.arrow(start, end, Color::srgb(1.0, 1.0, 0.2));
}
