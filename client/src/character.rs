use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use locomotion::{CapsuleSpec, LocomotionController};

use crate::{
    animation::Animator,
    config::Settings,
    input::{InputAction, snapshot},
    physics::{PhysicsWorld, SimTransform},
    tint::StateTint,
};

/// Capsule center at spawn, a little above the ground plane.
pub const SPAWN_POINT: Vec3 = Vec3::new(0.0, 1.0, 0.0);

#[derive(Component, Debug)]
pub struct Character;

/// Present while the controller is enabled. Adding it (re)starts the startup sequence;
/// removing it abandons the sequence and stops reading input.
#[derive(Component, Debug)]
pub struct Active;

#[derive(Component, Debug, Deref, DerefMut)]
pub struct Locomotion(pub LocomotionController);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_character);
    app.add_systems(
        Update,
        (
            toggle_active,
            (on_activated, on_deactivated),
            handle_actions,
            update_presentation,
        )
            .chain(),
    );
}

fn spawn_character(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
) {
    let capsule = CapsuleSpec::default();

    commands
        .spawn((
            Name::new("Character"),
            Character,
            Active,
            Locomotion(LocomotionController::new(settings.0)),
            Animator::default(),
            StateTint::default(),
            Transform::from_translation(SPAWN_POINT),
            SimTransform {
                translation: SPAWN_POINT,
            },
            Mesh3d(meshes.add(Mesh::from(Capsule3d {
                radius: capsule.radius,
                half_length: capsule.half_height,
            }))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::linear_rgb(0.6, 0.6, 0.6),
                ..default()
            })),
        ))
        .with_children(|parent| {
            // Eyes on the +Z side so the facing is visible.
            let eye_mesh = meshes.add(Mesh::from(Sphere { radius: 0.08 }));
            let eye_mat = materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 1.0, 1.0),
                ..default()
            });

            let x = 0.12;
            let y = 0.5;
            let z = capsule.radius;

            parent.spawn((
                Name::new("LeftEye"),
                Mesh3d(eye_mesh.clone()),
                MeshMaterial3d(eye_mat.clone()),
                Transform::from_translation(Vec3::new(x, y, z)),
            ));
            parent.spawn((
                Name::new("RightEye"),
                Mesh3d(eye_mesh),
                MeshMaterial3d(eye_mat),
                Transform::from_translation(Vec3::new(-x, y, z)),
            ));
        });
}

fn toggle_active(
    mut commands: Commands,
    actions: Res<ActionState<InputAction>>,
    character_q: Query<(Entity, Has<Active>), With<Character>>,
) {
    if !actions.just_pressed(&InputAction::ToggleActive) {
        return;
    }
    for (entity, is_active) in &character_q {
        if is_active {
            commands.entity(entity).remove::<Active>();
        } else {
            commands.entity(entity).insert(Active);
        }
    }
}

/// Startup sequencer entry: Blue, countdown restarted.
fn on_activated(mut character_q: Query<(Entity, &mut Locomotion, &mut StateTint), Added<Active>>) {
    for (entity, mut locomotion, mut tint) in &mut character_q {
        locomotion.activate(&mut *tint);
        info!(
            "{entity}: controller active, startup lock {:?}",
            locomotion.settings().startup_lock
        );
    }
}

fn on_deactivated(
    mut removed: RemovedComponents<Active>,
    mut locomotion_q: Query<&mut Locomotion>,
) {
    for entity in removed.read() {
        let Ok(mut locomotion) = locomotion_q.get_mut(entity) else {
            continue;
        };
        locomotion.deactivate();
        info!("{entity}: controller inactive");
    }
}

/// Discrete sit/jump actions, read once per frame.
fn handle_actions(
    actions: Res<ActionState<InputAction>>,
    mut world: ResMut<PhysicsWorld>,
    mut character_q: Query<
        (&mut Locomotion, &mut Animator, &mut StateTint),
        (With<Character>, With<Active>),
    >,
) {
    let input = snapshot(&actions);
    if !input.sit && !input.jump {
        return;
    }
    for (mut locomotion, mut animator, mut tint) in &mut character_q {
        locomotion.handle_actions(&input, &mut *animator, &mut *tint, &mut world.0);
    }
}

/// Presentation state machine plus the startup countdown, once per render frame.
fn update_presentation(
    time: Res<Time>,
    actions: Res<ActionState<InputAction>>,
    mut character_q: Query<
        (&mut Locomotion, &mut Animator, &mut StateTint),
        (With<Character>, With<Active>),
    >,
) {
    let input = snapshot(&actions).movement;
    for (mut locomotion, mut animator, mut tint) in &mut character_q {
        locomotion.frame(input, time.delta(), &mut *animator, &mut *tint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use locomotion::{ControllerSettings, MovementInput, PresentationState, Tint};
    use std::time::Duration;

    /// A controller already past its startup lock, as it would be a few seconds in.
    fn unlocked_locomotion() -> (Locomotion, StateTint) {
        let mut locomotion = LocomotionController::new(ControllerSettings {
            startup_lock: Duration::ZERO,
            ..default()
        });
        let mut tint = StateTint::default();
        locomotion.activate(&mut tint);
        locomotion.frame(
            MovementInput::ZERO,
            Duration::ZERO,
            &mut Animator::default(),
            &mut tint,
        );
        assert!(!locomotion.state().movement_locked);
        (Locomotion(locomotion), tint)
    }

    fn world_with_forward_input() -> World {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        let mut actions = ActionState::<InputAction>::default();
        actions.set_axis_pair(&InputAction::Move, Vec2::new(0.0, 1.0));
        world.insert_resource(actions);
        world
    }

    #[test]
    fn active_character_reacts_to_input() {
        let mut world = world_with_forward_input();
        let (locomotion, tint) = unlocked_locomotion();
        let entity = world
            .spawn((Character, Active, locomotion, Animator::default(), tint))
            .id();

        world.run_system_once(update_presentation).unwrap();

        let locomotion = world.get::<Locomotion>(entity).unwrap();
        assert_eq!(
            locomotion.state().presentation,
            PresentationState::WalkForward
        );
        assert_eq!(world.get::<StateTint>(entity).unwrap().0, Some(Tint::Green));
    }

    #[test]
    fn inactive_character_ignores_input() {
        let mut world = world_with_forward_input();
        let (locomotion, tint) = unlocked_locomotion();
        let entity = world
            .spawn((Character, locomotion, Animator::default(), tint))
            .id();

        world.run_system_once(update_presentation).unwrap();

        let locomotion = world.get::<Locomotion>(entity).unwrap();
        assert_eq!(locomotion.state().presentation, PresentationState::Idle);
        assert_eq!(world.get::<StateTint>(entity).unwrap().0, Some(Tint::Purple));
        assert_eq!(world.get::<Animator>(entity).unwrap().current(), None);
    }
}
