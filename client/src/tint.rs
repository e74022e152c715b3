use bevy::prelude::*;
use locomotion::{Tint, TintTarget};

/// One material per state tint, created once and swapped onto the character.
#[derive(Resource)]
pub struct TintPalette {
    materials: [Handle<StandardMaterial>; 5],
}

impl TintPalette {
    pub fn get(&self, tint: Tint) -> &Handle<StandardMaterial> {
        &self.materials[tint_index(tint)]
    }
}

/// The tint currently requested by the controller. `None` until the first activation.
#[derive(Component, Debug, Default)]
pub struct StateTint(pub Option<Tint>);

impl TintTarget for StateTint {
    fn set_tint(&mut self, tint: Tint) {
        self.0 = Some(tint);
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, setup_palette);
    app.add_systems(
        PostUpdate,
        apply_tint.run_if(resource_exists::<TintPalette>),
    );
}

fn tint_index(tint: Tint) -> usize {
    match tint {
        Tint::Blue => 0,
        Tint::Purple => 1,
        Tint::Green => 2,
        Tint::Yellow => 3,
        Tint::Red => 4,
    }
}

fn tint_material(tint: Tint) -> StandardMaterial {
    let [r, g, b] = tint.srgb();
    StandardMaterial {
        base_color: Color::srgb(r, g, b),
        perceptual_roughness: 0.8,
        ..default()
    }
}

fn setup_palette(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
    let handles = Tint::ALL.map(|tint| materials.add(tint_material(tint)));
    commands.insert_resource(TintPalette { materials: handles });
}

/// Swap the material handle; tints replace each other with no blending.
fn apply_tint(
    palette: Res<TintPalette>,
    mut tinted_q: Query<(&StateTint, &mut MeshMaterial3d<StandardMaterial>), Changed<StateTint>>,
) {
    for (state_tint, mut material) in &mut tinted_q {
        let Some(tint) = state_tint.0 else {
            continue;
        };
        let desired = palette.get(tint);
        if material.0 != *desired {
            material.0 = desired.clone();
        }
    }
}
