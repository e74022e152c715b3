use crate::{
    Character,
    character::SPAWN_POINT,
    config::Settings,
    physics::{from_na, to_na},
};
use bevy::{prelude::*, transform::TransformSystems};
use locomotion::CameraFollow;

#[derive(Resource, Debug, Deref)]
pub struct CameraRig(pub CameraFollow);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
    app.add_systems(
        PostUpdate,
        follow_character.before(TransformSystems::Propagate),
    );
}

fn add_camera(mut commands: Commands, settings: Res<Settings>) {
    let rig = CameraFollow::from(&settings.0);
    let start = from_na(rig.target(to_na(SPAWN_POINT)));

    commands.insert_resource(CameraRig(rig));
    commands.spawn((
        Camera3d::default(),
        // The camera only translates afterwards, so it keeps looking along +Z.
        Transform::from_translation(start).looking_at(SPAWN_POINT, Vec3::Y),
    ));
}

/// Not gated by lock or sitting: the camera trails the character every frame.
fn follow_character(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    character: Single<&Transform, (With<Character>, Without<Camera3d>)>,
    rig: Res<CameraRig>,
    time: Res<Time>,
) {
    let Ok(mut cam_tf) = camera_query.single_mut() else {
        return;
    };

    let next = rig.step(
        to_na(cam_tf.translation),
        to_na(character.translation),
        time.delta_secs(),
    );
    cam_tf.translation = from_na(next);
}
