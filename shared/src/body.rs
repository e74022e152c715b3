//! Rapier-backed character body.
//!
//! A small, self-contained dynamics world: immutable statics built from
//! [`WorldStaticDef`]s plus one dynamic, rotation-locked capsule for the character.
//! The host steps it once per fixed tick. Moves requested through [`PhysicsBody`] are
//! applied at the start of the next step, impulses immediately.

use nalgebra::Vector3;
use rapier3d::{
    na::{Isometry3, Translation3, UnitQuaternion},
    prelude::*,
};

use crate::{
    constants::{CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS, CHARACTER_MASS_KG, GRAVITY_MPS2},
    host::PhysicsBody,
    rapier::{WorldStaticDef, collider_from_def},
};

/// Character capsule dimensions (meters).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleSpec {
    pub radius: f32,
    /// Half height of the cylindrical segment, caps excluded.
    pub half_height: f32,
}

impl Default for CapsuleSpec {
    fn default() -> Self {
        Self {
            radius: CAPSULE_RADIUS,
            half_height: CAPSULE_HALF_HEIGHT,
        }
    }
}

impl CapsuleSpec {
    /// Distance from the capsule center to its lowest point.
    #[inline]
    pub fn half_extent_y(&self) -> f32 {
        self.half_height + self.radius
    }
}

pub struct RapierBody {
    gravity: Vector<f32>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    character: RigidBodyHandle,
    pending_move: Option<Vector<f32>>,
}

impl RapierBody {
    /// Build the world and spawn the character capsule centered at `spawn`.
    ///
    /// Statics are sorted by `id` before insertion so the same input always yields the
    /// same world.
    pub fn build(
        mut statics: Vec<WorldStaticDef>,
        spawn: Vector3<f32>,
        capsule: CapsuleSpec,
        dt: f32,
    ) -> Self {
        statics.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in &statics {
            colliders.insert(collider_from_def(def));
        }

        let iso = Isometry3::from_parts(Translation3::from(spawn), UnitQuaternion::identity());
        let rb = RigidBodyBuilder::dynamic()
            .pose(iso)
            .lock_rotations()
            .build();
        let character = bodies.insert(rb);
        let collider = ColliderBuilder::capsule_y(capsule.half_height, capsule.radius)
            .mass(CHARACTER_MASS_KG)
            .friction(0.0)
            .build();
        colliders.insert_with_parent(collider, character, &mut bodies);

        Self {
            gravity: vector![0.0, -GRAVITY_MPS2, 0.0],
            params: IntegrationParameters {
                dt,
                ..IntegrationParameters::default()
            },
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            character,
            pending_move: None,
        }
    }

    /// Advance the world by one fixed step, applying any pending move first.
    pub fn step(&mut self) {
        if let Some(target) = self.pending_move.take() {
            if let Some(rb) = self.bodies.get_mut(self.character) {
                rb.set_translation(target, true);
            }
        }

        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Character capsule center in world space.
    pub fn translation(&self) -> Vector3<f32> {
        self.bodies
            .get(self.character)
            .map(|rb| *rb.translation())
            .unwrap_or_else(Vector3::zeros)
    }

    pub fn linear_velocity(&self) -> Vector3<f32> {
        self.bodies
            .get(self.character)
            .map(|rb| *rb.linvel())
            .unwrap_or_else(Vector3::zeros)
    }
}

impl PhysicsBody for RapierBody {
    fn move_position(&mut self, target: Vector3<f32>) {
        self.pending_move = Some(target);
    }

    fn apply_impulse(&mut self, impulse: Vector3<f32>) {
        if let Some(rb) = self.bodies.get_mut(self.character) {
            rb.apply_impulse(impulse, true);
        }
    }
}
