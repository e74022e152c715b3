use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use locomotion::{InputSnapshot, MovementInput};

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// x = strafe (right +), y = forward (+).
    #[actionlike(DualAxis)]
    Move,
    Sit,
    Jump,
    /// Enable/disable the controller.
    ToggleActive,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let input_map = InputMap::<InputAction>::default()
        .with_dual_axis(InputAction::Move, VirtualDPad::wasd())
        .with_dual_axis(InputAction::Move, VirtualDPad::arrow_keys())
        .with_dual_axis(InputAction::Move, GamepadStick::LEFT)
        .with(InputAction::Sit, KeyCode::KeyC)
        .with(InputAction::Sit, GamepadButton::West)
        .with(InputAction::Jump, KeyCode::Space)
        .with(InputAction::Jump, GamepadButton::South)
        .with(InputAction::ToggleActive, KeyCode::F1);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());
}

/// Latest movement axes, verbatim. A released stick or key reads as exactly zero.
pub fn movement(actions: &ActionState<InputAction>) -> MovementInput {
    let axis = actions.axis_pair(&InputAction::Move);
    MovementInput::new(axis.y, axis.x)
}

/// Sample everything the controller reads this frame.
pub fn snapshot(actions: &ActionState<InputAction>) -> InputSnapshot {
    InputSnapshot {
        movement: movement(actions),
        sit: actions.just_pressed(&InputAction::Sit),
        jump: actions.just_pressed(&InputAction::Jump),
    }
}
