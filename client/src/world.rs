use bevy::prelude::*;
use locomotion::WorldStaticDef;
use nalgebra::Vector3;

const GROUND_SIZE: f32 = 50.0;
const CRATE_CENTER: Vec3 = Vec3::new(5.0, 0.5, 3.0);
const CRATE_SIZE: f32 = 1.0;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
}

/// Collision geometry for everything [`setup`] renders.
pub fn world_statics() -> Vec<WorldStaticDef> {
    let half = CRATE_SIZE * 0.5;
    vec![
        WorldStaticDef::ground(0, 0.0),
        WorldStaticDef::cuboid(
            1,
            Vector3::new(CRATE_CENTER.x, CRATE_CENTER.y, CRATE_CENTER.z),
            Vector3::new(half, half, half),
        ),
    ]
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    info!("World setup");

    commands.spawn((
        Name::new("Ground"),
        Transform::from_xyz(0., 0., 0.),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE).build())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::linear_rgb(0.2, 0.3, 0.25),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
    ));

    commands.spawn((
        Name::new("Crate"),
        Mesh3d(meshes.add(Cuboid::new(CRATE_SIZE, CRATE_SIZE, CRATE_SIZE))),
        MeshMaterial3d(materials.add(Color::srgb_u8(124, 144, 255))),
        Transform::from_translation(CRATE_CENTER),
    ));

    commands.spawn((
        PointLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statics_have_unique_ids() {
        let statics = world_statics();
        let mut ids: Vec<_> = statics.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), statics.len());
    }
}
