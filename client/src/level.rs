//! Static sandbox level: collision world plus matching meshes.

use bevy::prelude::*;
use rig::{
    ColliderShapeDef, RapierQueryWorld, WorldStaticDef,
    collision::{self, cuboid_from_pose},
};

use crate::transform::{to_bevy_quat, to_bevy_vec3, to_rig_vec3};

/// Visible extent of the infinite ground plane.
const GROUND_SIZE: f32 = 80.0;

/// Collision world the rig queries every frame.
#[derive(Resource)]
pub struct PhysicsWorld(pub RapierQueryWorld);

pub(super) fn plugin(app: &mut App) {
    let defs = level_statics();
    app.insert_resource(PhysicsWorld(RapierQueryWorld::build(defs.iter().cloned())));
    app.insert_resource(LevelStatics(defs));
    app.add_systems(Startup, spawn_level);
}

#[derive(Resource)]
struct LevelStatics(Vec<WorldStaticDef>);

/// Ground, a staircase of ledges to step onto, a ramp, a ceiling slab to fly into, and props.
fn level_statics() -> Vec<WorldStaticDef> {
    let mut defs = vec![collision::ground_plane(0, 0.0)];

    for step in 0..4u32 {
        let height = 0.25 * (step + 1) as f32;
        defs.push(WorldStaticDef::at(
            10 + step,
            to_rig_vec3(Vec3::new(-6.0, height * 0.5, -4.0 - 1.5 * step as f32)),
            ColliderShapeDef::Cuboid {
                half_extents: to_rig_vec3(Vec3::new(2.0, height * 0.5, 0.75)),
            },
        ));
    }

    defs.push(cuboid_from_pose(
        20,
        to_rig_vec3(Vec3::new(3.0, 0.2, 6.0)),
        to_rig_vec3(Vec3::new(8.0, 1.2, -6.0)),
        rig::collision::Quat::from_axis_angle(
            &nalgebra::Vector3::x_axis(),
            18.0_f32.to_radians(),
        ),
    ));

    defs.push(WorldStaticDef::at(
        30,
        to_rig_vec3(Vec3::new(0.0, 7.0, 8.0)),
        ColliderShapeDef::Cuboid {
            half_extents: to_rig_vec3(Vec3::new(4.0, 0.25, 4.0)),
        },
    ));

    defs.push(WorldStaticDef::at(
        40,
        to_rig_vec3(Vec3::new(5.0, 1.0, 3.0)),
        ColliderShapeDef::Sphere { radius: 1.0 },
    ));
    defs.push(WorldStaticDef::at(
        41,
        to_rig_vec3(Vec3::new(-4.0, 1.5, 6.0)),
        ColliderShapeDef::CylinderY {
            radius: 0.6,
            half_height: 1.5,
        },
    ));
    defs.push(WorldStaticDef::at(
        42,
        to_rig_vec3(Vec3::new(2.0, 1.4, -10.0)),
        ColliderShapeDef::CapsuleY {
            radius: 0.5,
            half_height: 0.9,
        },
    ));

    defs
}

fn mesh_for(shape: &ColliderShapeDef) -> Mesh {
    match *shape {
        ColliderShapeDef::Plane { .. } => Plane3d::default()
            .mesh()
            .size(GROUND_SIZE, GROUND_SIZE)
            .build(),
        ColliderShapeDef::Cuboid { half_extents } => {
            Cuboid::from_size(to_bevy_vec3(&half_extents) * 2.0).into()
        }
        ColliderShapeDef::Sphere { radius } => Sphere::new(radius).into(),
        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => Capsule3d::new(radius, half_height * 2.0).into(),
        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => Cylinder::new(radius, half_height * 2.0).into(),
    }
}

fn spawn_level(
    mut commands: Commands,
    statics: Res<LevelStatics>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground = materials.add(StandardMaterial {
        base_color: Color::linear_rgb(0.2, 0.3, 0.25),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });
    let prop = materials.add(Color::srgb_u8(124, 144, 255));

    for def in &statics.0 {
        let (material, offset) = match def.shape {
            ColliderShapeDef::Plane {
                offset_along_normal,
            } => (ground.clone(), Vec3::Y * offset_along_normal),
            _ => (prop.clone(), Vec3::ZERO),
        };
        let rotation = to_bevy_quat(&def.rotation);

        commands.spawn((
            Name::new(format!("Static {}", def.id)),
            Mesh3d(meshes.add(mesh_for(&def.shape))),
            MeshMaterial3d(material),
            Transform::from_translation(to_bevy_vec3(&def.translation) + rotation * offset)
                .with_rotation(rotation),
        ));
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(4.0, 12.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0),
    ));

    info!("Spawned {} level statics", statics.0.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig::CollisionQuery;

    #[test]
    fn level_ids_are_unique() {
        let defs = level_statics();
        let mut ids: Vec<u32> = defs.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), defs.len());
    }

    #[test]
    fn spawn_column_has_ground_below() {
        let world = RapierQueryWorld::build(level_statics());
        let hit = world
            .cast_ray(to_rig_vec3(Vec3::new(0.0, 3.0, 0.0)), -nalgebra::Vector3::y(), 10.0)
            .expect("ground below spawn");
        assert!((hit.distance - 3.0).abs() < 1.0e-3);
    }
}
