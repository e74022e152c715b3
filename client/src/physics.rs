use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use locomotion::{CapsuleSpec, FIXED_TICK_HZ, Pose, RapierBody};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::{
    character::{Active, Character, Locomotion, SPAWN_POINT},
    input::{InputAction, movement},
    world::world_statics,
};

/// The host physics world holding the character body.
#[derive(Resource, Deref, DerefMut)]
pub struct PhysicsWorld(pub RapierBody);

/// Where the physics step last put the character. The rendered `Transform` eases toward it.
#[derive(Component, Debug, Default)]
pub struct SimTransform {
    pub translation: Vec3,
}

/// Rate at which the rendered transform catches up to the simulated one (1/s).
const RENDER_DECAY_RATE: f32 = 24.0;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(Time::<Fixed>::from_hz(FIXED_TICK_HZ));
    app.insert_resource(PhysicsWorld(RapierBody::build(
        world_statics(),
        to_na(SPAWN_POINT),
        CapsuleSpec::default(),
        (1.0 / FIXED_TICK_HZ) as f32,
    )));

    app.add_systems(FixedUpdate, (integrate_motion, step, sync).chain());
    app.add_systems(Update, interpolate);
}

pub fn to_na(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

pub fn from_na(v: Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_na_rotation(q: Quat) -> UnitQuaternion<f32> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}

/// Motion integrator: one move request per fixed tick for each active character.
fn integrate_motion(
    time: Res<Time<Fixed>>,
    actions: Res<ActionState<InputAction>>,
    mut world: ResMut<PhysicsWorld>,
    character_q: Query<(&Locomotion, &Transform), (With<Character>, With<Active>)>,
) {
    let input = movement(&actions);
    for (locomotion, transform) in &character_q {
        let pose = Pose {
            translation: world.translation(),
            rotation: to_na_rotation(transform.rotation),
        };
        locomotion.fixed_tick(input, &pose, time.delta_secs(), &mut world.0);
    }
}

fn step(mut world: ResMut<PhysicsWorld>) {
    world.step();
}

fn sync(world: Res<PhysicsWorld>, mut sim_q: Query<&mut SimTransform, With<Character>>) {
    let translation = from_na(world.translation());
    for mut sim in &mut sim_q {
        sim.translation = translation;
    }
}

fn interpolate(time: Res<Time>, mut transform_q: Query<(&mut Transform, &SimTransform)>) {
    let dt = time.delta_secs();
    for (mut transform, sim) in &mut transform_q {
        transform
            .translation
            .smooth_nudge(&sim.translation, RENDER_DECAY_RATE, dt);
    }
}
