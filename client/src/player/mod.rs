use bevy::prelude::*;
use rig::{InputBindings, MotionRig, Pawn, RigParts, ViewRotation};

use crate::{
    camera::camera_bundle,
    config::SandboxConfig,
    transform::{mirror_rig_poses, to_bevy_vec3},
};

mod input;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_player);

    // The rig sees this frame's input before it ticks, and the scene mirrors the result.
    app.add_systems(
        Update,
        (input::drive_rig, respawn_fallen, mirror_rig_poses).chain(),
    );
}

/// The controlled body. Owns the rig that drives it.
#[derive(Component)]
pub struct Player {
    pub rig: MotionRig,
}

/// Child carrying the boom attitude; the camera hangs off it.
#[derive(Component)]
pub struct RigBoom;

/// Child carrying the visual mesh attitude.
#[derive(Component)]
pub struct RigMesh;

/// The controlling agent: its bindings and, in decoupled mode, its view rotation.
#[derive(Resource)]
pub struct PlayerController {
    pub bindings: InputBindings,
    pub view: ViewRotation,
    pub decoupled_look: bool,
}

fn rig_parts(config: &SandboxConfig) -> RigParts {
    let mut parts = RigParts::default();
    parts.capsule = config.capsule;
    parts.boom.arm_length = config.boom_arm_length;
    parts
}

/// Build a spawned rig at the configured spawn point and bind it to a fresh controller.
fn possess(config: &SandboxConfig) -> Result<(MotionRig, PlayerController), rig::ConfigError> {
    let spawn = rig::collision::Vec3::new(0.0, config.spawn_height, 0.0);
    let mut rig = MotionRig::new(config.rig, rig_parts(config), spawn)?;
    rig.on_spawn();

    let mut bindings = InputBindings::new();
    rig.on_bind_inputs(&mut bindings);

    let controller = PlayerController {
        bindings,
        view: rig.seed_view(),
        decoupled_look: config.decoupled_look,
    };
    Ok((rig, controller))
}

fn spawn_player(
    mut commands: Commands,
    config: Res<SandboxConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let (rig, controller) = match possess(&config) {
        Ok(possessed) => possessed,
        Err(err) => {
            error!("Cannot spawn player: {err}");
            return;
        }
    };

    let capsule = rig.parts().capsule;
    let arm_offset = to_bevy_vec3(&rig.parts().boom.camera_offset());
    let start = to_bevy_vec3(&rig.translation());

    let body_mesh = meshes.add(Mesh::from(Capsule3d {
        radius: capsule.radius,
        half_length: capsule.half_height,
    }));
    let body_mat = materials.add(StandardMaterial {
        base_color: Color::linear_rgb(0.2, 0.9, 0.8),
        ..default()
    });
    // Eyes: small white spheres, slightly in front (-Z is forward)
    let eye_mesh = meshes.add(Mesh::from(Sphere { radius: 0.12 }));
    let eye_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 1.0, 1.0),
        ..default()
    });

    commands
        .spawn((
            Name::new("Player"),
            Transform::from_translation(start),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Name::new("RigMesh"),
                    RigMesh,
                    Mesh3d(body_mesh),
                    MeshMaterial3d(body_mat),
                    Transform::default(),
                ))
                .with_children(|mesh| {
                    for (name, x) in [("LeftEye", -0.18), ("RightEye", 0.18)] {
                        mesh.spawn((
                            Name::new(name),
                            Mesh3d(eye_mesh.clone()),
                            MeshMaterial3d(eye_mat.clone()),
                            Transform::from_xyz(x, capsule.half_height, -capsule.radius),
                        ));
                    }
                });

            parent
                .spawn((
                    Name::new("RigBoom"),
                    RigBoom,
                    Transform::default(),
                    Visibility::default(),
                ))
                .with_child(camera_bundle(arm_offset));
        })
        .insert(Player { rig });

    commands.insert_resource(controller);
    info!("Spawned player at {start}");
}

/// Falling out of the level puts a fresh rig back at the spawn point.
fn respawn_fallen(
    mut player: Single<&mut Player>,
    controller: Option<ResMut<PlayerController>>,
    config: Res<SandboxConfig>,
) {
    let Some(mut controller) = controller else {
        return;
    };
    match respawn_if_fallen(&mut player.rig, &mut controller, &config) {
        Ok(true) => info!("Player fell below {:.1}, respawning", config.kill_height),
        Ok(false) => {}
        Err(err) => error!("Cannot respawn player: {err}"),
    }
}

/// Replace the rig and reseed the controller once the body drops below the kill height.
fn respawn_if_fallen(
    rig: &mut MotionRig,
    controller: &mut PlayerController,
    config: &SandboxConfig,
) -> Result<bool, rig::ConfigError> {
    if rig.translation().y >= config.kill_height {
        return Ok(false);
    }
    let (fresh_rig, fresh_controller) = possess(config)?;
    *rig = fresh_rig;
    *controller = fresh_controller;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig::{RigAction, TriggerPhase};

    #[test]
    fn possess_binds_every_action_and_seeds_view() {
        let config = SandboxConfig::default();
        let (rig, controller) = possess(&config).expect("default config is valid");

        for action in RigAction::ALL {
            assert!(controller.bindings.is_bound(action, TriggerPhase::Completed));
        }
        assert_eq!(controller.view.pitch, rig.camera_pitch());
        assert_eq!(controller.view.yaw, rig.yaw());
        assert_eq!(rig.translation().y, config.spawn_height);
    }

    #[test]
    fn falling_below_kill_height_respawns_and_reseeds_view() {
        let config = SandboxConfig::default();
        let (_, mut controller) = possess(&config).expect("default config is valid");
        controller.view.yaw = 90.0;
        controller.view.pitch = 30.0;

        let below = rig::collision::Vec3::new(4.0, config.kill_height - 1.0, -2.0);
        let mut rig = MotionRig::new(config.rig, rig_parts(&config), below).expect("valid rig");

        assert!(respawn_if_fallen(&mut rig, &mut controller, &config).expect("respawned"));
        assert_eq!(
            rig.translation(),
            rig::collision::Vec3::new(0.0, config.spawn_height, 0.0)
        );
        assert_eq!(controller.view, rig.seed_view());
        assert_eq!(rig.vertical_velocity(), 0.0);
    }

    #[test]
    fn rig_above_kill_height_is_left_alone() {
        let config = SandboxConfig::default();
        let (mut rig, mut controller) = possess(&config).expect("default config is valid");
        rig.on_ascend(-1.0, rig::Frame::new(0.1));
        controller.view.yaw = 45.0;
        let before = rig.translation();

        assert!(!respawn_if_fallen(&mut rig, &mut controller, &config).expect("no respawn"));
        assert_eq!(rig.translation(), before);
        assert_eq!(controller.view.yaw, 45.0);
    }

    #[test]
    fn parts_follow_config() {
        let config = SandboxConfig {
            boom_arm_length: 5.0,
            ..SandboxConfig::default()
        };
        let parts = rig_parts(&config);
        assert_eq!(parts.boom.arm_length, 5.0);
        assert_eq!(parts.capsule, config.capsule);
    }
}
