//! Debug/performance tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (`#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).

use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use iyes_perf_ui::prelude::*;

use crate::{
    animation::Animator,
    character::{Active, Character, Locomotion},
    tint::StateTint,
};

/// On-screen readout of the controller state.
#[derive(Component)]
struct StateOverlay;

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        PerfUiPlugin,
    ));

    app.add_systems(Startup, (spawn_perf_ui, spawn_state_overlay));
    app.add_systems(PostUpdate, update_state_overlay);
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn spawn_state_overlay(mut commands: Commands) {
    commands.spawn((
        StateOverlay,
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

fn update_state_overlay(
    mut overlay_q: Query<&mut Text, With<StateOverlay>>,
    character_q: Query<(&Locomotion, &Animator, &StateTint, Has<Active>), With<Character>>,
) {
    let Ok(mut text) = overlay_q.single_mut() else {
        return;
    };
    let Ok((locomotion, animator, tint, active)) = character_q.single() else {
        return;
    };

    let state = locomotion.state();
    text.0 = format!(
        "active: {active}\nlocked: {}\nready: {}\nstate: {:?}\nclip: {}\ntint: {:?}\n[F1] toggle  [C] sit  [Space] jump",
        state.movement_locked,
        state.ready_to_run,
        state.presentation,
        animator.current().map_or("-", |clip| clip.name()),
        tint.0,
    );
}
