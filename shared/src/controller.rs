/*!
Locomotion controller.

Two layers:
- [`ControllerState`]: a plain `Copy` value. Every tick function takes it and returns the
  next one together with the effects to apply. Nothing here touches the host.
- [`LocomotionController`]: owns a state and its settings and pushes the effects to the
  host handles ([`PhysicsBody`], [`AnimationDriver`], [`TintTarget`]).

Gating
- `movement_locked` and sitting gate the motion integrator and the presentation machine
  identically. They are not mutually exclusive.
- Jump ignores the lock and only checks sitting.
- The camera is not gated at all and lives in [`crate::camera`].
*/

use std::time::Duration;

use nalgebra::Vector3;

use crate::{
    host::{AnimationDriver, PhysicsBody, TintTarget},
    input::{InputSnapshot, MovementInput},
    motion::{Pose, integrate, jump_impulse},
    presentation::{PresentationState, SIT, Tint, Transition, transition},
    settings::ControllerSettings,
    startup::StartupSequence,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerState {
    pub movement_locked: bool,
    /// Set once by the startup sequence. Informational; movement logic never reads it.
    pub ready_to_run: bool,
    pub presentation: PresentationState,
    pub startup: StartupSequence,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            movement_locked: true,
            ready_to_run: false,
            presentation: PresentationState::Idle,
            startup: StartupSequence::Inactive,
        }
    }
}

impl ControllerState {
    #[inline]
    pub fn is_sitting(&self) -> bool {
        self.presentation.is_sitting()
    }

    #[inline]
    pub fn is_walking(&self) -> bool {
        self.presentation.is_walking()
    }

    /// Locked or sitting: no motion and no walk/idle transitions.
    #[inline]
    pub fn is_gated(&self) -> bool {
        self.movement_locked || self.is_sitting()
    }

    /// Restart the startup sequence. Returns the tint to apply right away.
    ///
    /// Only the countdown is reset. A lock already released by an earlier activation stays
    /// released.
    pub fn activate(self, startup_lock: Duration) -> (Self, Tint) {
        let (startup, tint) = StartupSequence::begin(startup_lock);
        (Self { startup, ..self }, tint)
    }

    /// Abandon any pending startup countdown. No other field changes.
    pub fn deactivate(self) -> Self {
        Self {
            startup: self.startup.cancel(),
            ..self
        }
    }

    /// Advance the startup countdown. Returns the tint to apply when it unlocks.
    pub fn advance_startup(self, dt: Duration) -> (Self, Option<Tint>) {
        let (startup, unlocked) = self.startup.advance(dt);
        let next = Self { startup, ..self };
        match unlocked {
            Some(tint) => (
                Self {
                    movement_locked: false,
                    ready_to_run: true,
                    ..next
                },
                Some(tint),
            ),
            None => (next, None),
        }
    }

    /// Target position for this fixed tick, or `None` when gated or input is zero.
    pub fn fixed_tick(
        &self,
        input: MovementInput,
        pose: &Pose,
        dt: f32,
        settings: &ControllerSettings,
    ) -> Option<Vector3<f32>> {
        if self.is_gated() {
            return None;
        }
        // Backward motion deliberately shares walk_speed_mps with every other direction.
        integrate(pose, input, settings.walk_speed_mps, dt)
    }

    /// Run the walk/idle machine for one frame.
    pub fn frame(self, input: MovementInput) -> (Self, Option<Transition>) {
        if self.is_gated() {
            return (self, None);
        }
        match transition(self.presentation, input) {
            Some(t) => (
                Self {
                    presentation: t.next,
                    ..self
                },
                Some(t),
            ),
            None => (self, None),
        }
    }

    /// Enter the terminal sitting state. Accepted from any state, even while locked.
    pub fn sit(self) -> (Self, Transition) {
        (
            Self {
                presentation: SIT.next,
                ..self
            },
            SIT,
        )
    }

    /// Impulse to apply for a jump, or `None` while sitting.
    pub fn jump(&self, settings: &ControllerSettings) -> Option<Vector3<f32>> {
        if self.is_sitting() {
            return None;
        }
        Some(jump_impulse(settings.jump_impulse))
    }
}

/// A [`ControllerState`] plus its settings, wired to host handles.
#[derive(Clone, Debug, Default)]
pub struct LocomotionController {
    state: ControllerState,
    settings: ControllerSettings,
}

impl LocomotionController {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            state: ControllerState::default(),
            settings,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Controller became active: restart the startup sequence from Blue.
    pub fn activate<T: TintTarget + ?Sized>(&mut self, tint_target: &mut T) {
        let (state, tint) = self.state.activate(self.settings.startup_lock);
        self.state = state;
        tint_target.set_tint(tint);
        log::debug!(
            "locomotion activated, startup lock {:?}",
            self.settings.startup_lock
        );
    }

    /// Controller became inactive: drop any pending unlock.
    pub fn deactivate(&mut self) {
        if self.state.startup.is_waiting() {
            log::debug!("locomotion deactivated mid-startup, pending unlock abandoned");
        }
        self.state = self.state.deactivate();
    }

    /// Physics tick. Returns true if a move was requested.
    pub fn fixed_tick<B: PhysicsBody + ?Sized>(
        &self,
        input: MovementInput,
        pose: &Pose,
        dt: f32,
        body: &mut B,
    ) -> bool {
        match self.state.fixed_tick(input, pose, dt, &self.settings) {
            Some(target) => {
                body.move_position(target);
                true
            }
            None => false,
        }
    }

    /// Render frame: walk/idle machine first, then the startup countdown.
    pub fn frame<A, T>(
        &mut self,
        input: MovementInput,
        dt: Duration,
        animator: &mut A,
        tint_target: &mut T,
    ) where
        A: AnimationDriver + ?Sized,
        T: TintTarget + ?Sized,
    {
        let (state, t) = self.state.frame(input);
        if let Some(t) = t {
            log::debug!("locomotion {:?} -> {:?}", self.state.presentation, t.next);
            t.apply(animator, tint_target);
        }

        let (state, tint) = state.advance_startup(dt);
        if let Some(tint) = tint {
            log::info!("locomotion unlocked, ready to run");
            tint_target.set_tint(tint);
        }
        self.state = state;
    }

    pub fn sit<A, T>(&mut self, animator: &mut A, tint_target: &mut T)
    where
        A: AnimationDriver + ?Sized,
        T: TintTarget + ?Sized,
    {
        let (state, t) = self.state.sit();
        log::debug!("locomotion {:?} -> {:?}", self.state.presentation, t.next);
        t.apply(animator, tint_target);
        self.state = state;
    }

    /// Returns true if an impulse was applied.
    pub fn jump<B: PhysicsBody + ?Sized>(&self, body: &mut B) -> bool {
        match self.state.jump(&self.settings) {
            Some(impulse) => {
                body.apply_impulse(impulse);
                true
            }
            None => false,
        }
    }

    /// Dispatch the discrete actions in a snapshot. Sit is handled before jump so a
    /// simultaneous press does not jump.
    pub fn handle_actions<A, T, B>(
        &mut self,
        snapshot: &InputSnapshot,
        animator: &mut A,
        tint_target: &mut T,
        body: &mut B,
    ) where
        A: AnimationDriver + ?Sized,
        T: TintTarget + ?Sized,
        B: PhysicsBody + ?Sized,
    {
        if snapshot.sit {
            self.sit(animator, tint_target);
        }
        if snapshot.jump {
            self.jump(body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::AnimTrigger;

    #[derive(Default)]
    struct Host {
        moves: Vec<Vector3<f32>>,
        impulses: Vec<Vector3<f32>>,
        set: Vec<AnimTrigger>,
        reset: Vec<AnimTrigger>,
    }

    impl PhysicsBody for Host {
        fn move_position(&mut self, target: Vector3<f32>) {
            self.moves.push(target);
        }
        fn apply_impulse(&mut self, impulse: Vector3<f32>) {
            self.impulses.push(impulse);
        }
    }

    impl AnimationDriver for Host {
        fn set_trigger(&mut self, trigger: AnimTrigger) {
            self.set.push(trigger);
        }
        fn reset_trigger(&mut self, trigger: AnimTrigger) {
            self.reset.push(trigger);
        }
    }

    #[derive(Default)]
    struct Surface(Option<Tint>);

    impl TintTarget for Surface {
        fn set_tint(&mut self, tint: Tint) {
            self.0 = Some(tint);
        }
    }

    const FRAME: Duration = Duration::from_millis(16);
    const TICK: f32 = 0.02;

    fn origin() -> Pose {
        Pose::from_translation(Vector3::zeros())
    }

    /// Active and past the startup lock.
    fn unlocked() -> (LocomotionController, Host, Surface) {
        let mut c = LocomotionController::default();
        let mut host = Host::default();
        let mut surface = Surface::default();
        c.activate(&mut surface);
        c.frame(MovementInput::ZERO, Duration::from_secs(3), &mut host, &mut surface);
        assert!(!c.state().movement_locked);
        (c, host, surface)
    }

    #[test]
    fn defaults_are_locked_idle() {
        let s = ControllerState::default();
        assert!(s.movement_locked);
        assert!(!s.ready_to_run);
        assert!(!s.is_sitting());
        assert!(!s.is_walking());
        assert_eq!(s.startup, StartupSequence::Inactive);
    }

    #[test]
    fn zero_input_never_moves() {
        let (c, mut host, _) = unlocked();
        for _ in 0..10 {
            assert!(!c.fixed_tick(MovementInput::ZERO, &origin(), TICK, &mut host));
        }
        assert!(host.moves.is_empty());
    }

    #[test]
    fn locked_controller_neither_moves_nor_animates() {
        let mut c = LocomotionController::default();
        let mut host = Host::default();
        let mut surface = Surface::default();
        c.activate(&mut surface);

        for input in [
            MovementInput::new(1.0, 0.0),
            MovementInput::new(-1.0, 0.0),
            MovementInput::new(0.0, 1.0),
        ] {
            assert!(!c.fixed_tick(input, &origin(), TICK, &mut host));
            c.frame(input, FRAME, &mut host, &mut surface);
        }

        assert!(c.state().movement_locked);
        assert!(host.moves.is_empty());
        assert!(host.set.is_empty());
        assert_eq!(surface.0, Some(Tint::Blue));
    }

    #[test]
    fn never_activated_stays_locked() {
        let mut c = LocomotionController::default();
        let mut host = Host::default();
        let mut surface = Surface::default();
        c.frame(MovementInput::new(1.0, 0.0), Duration::from_secs(60), &mut host, &mut surface);
        assert!(c.state().movement_locked);
        assert!(!c.fixed_tick(MovementInput::new(1.0, 0.0), &origin(), TICK, &mut host));
        assert_eq!(surface.0, None);
    }

    #[test]
    fn unlocked_forward_moves_at_walk_speed() {
        let (c, mut host, _) = unlocked();
        assert!(c.fixed_tick(MovementInput::new(1.0, 0.0), &origin(), TICK, &mut host));
        assert_eq!(host.moves.len(), 1);
        assert!((host.moves[0] - Vector3::new(0.0, 0.0, 0.1)).norm() < 1.0e-6);
    }

    #[test]
    fn backward_speed_setting_is_not_applied() {
        let settings = ControllerSettings {
            walk_back_speed_mps: 100.0,
            ..Default::default()
        };
        let mut c = LocomotionController::new(settings);
        let mut host = Host::default();
        let mut surface = Surface::default();
        c.activate(&mut surface);
        c.frame(MovementInput::ZERO, Duration::from_secs(3), &mut host, &mut surface);

        c.fixed_tick(MovementInput::new(-1.0, 0.0), &origin(), 1.0, &mut host);
        assert!((host.moves[0] - Vector3::new(0.0, 0.0, -5.0)).norm() < 1.0e-6);
    }

    #[test]
    fn walk_fires_once_until_input_returns_to_zero() {
        let (mut c, mut host, mut surface) = unlocked();
        for _ in 0..30 {
            c.frame(MovementInput::new(1.0, 0.0), FRAME, &mut host, &mut surface);
        }
        assert_eq!(host.set, vec![AnimTrigger::Walk]);
        assert_eq!(surface.0, Some(Tint::Green));

        // Direction changes while walking do not fire.
        c.frame(MovementInput::new(-1.0, 0.3), FRAME, &mut host, &mut surface);
        assert_eq!(host.set, vec![AnimTrigger::Walk]);

        c.frame(MovementInput::ZERO, FRAME, &mut host, &mut surface);
        assert_eq!(host.set, vec![AnimTrigger::Walk, AnimTrigger::Idle]);

        c.frame(MovementInput::new(1.0, 0.0), FRAME, &mut host, &mut surface);
        assert_eq!(
            host.set,
            vec![AnimTrigger::Walk, AnimTrigger::Idle, AnimTrigger::Walk]
        );
    }

    #[test]
    fn stopping_from_any_walk_goes_idle_once_with_yellow() {
        for input in [
            MovementInput::new(1.0, 0.0),
            MovementInput::new(-1.0, 0.0),
            MovementInput::new(0.0, -1.0),
        ] {
            let (mut c, mut host, mut surface) = unlocked();
            c.frame(input, FRAME, &mut host, &mut surface);
            assert!(c.state().is_walking());

            for _ in 0..5 {
                c.frame(MovementInput::ZERO, FRAME, &mut host, &mut surface);
            }
            let idles = host.set.iter().filter(|t| **t == AnimTrigger::Idle).count();
            assert_eq!(idles, 1);
            assert_eq!(surface.0, Some(Tint::Yellow));
            assert_eq!(c.state().presentation, PresentationState::Idle);
        }
    }

    #[test]
    fn sit_is_terminal_and_gates_everything() {
        let (mut c, mut host, mut surface) = unlocked();
        c.frame(MovementInput::new(1.0, 0.0), FRAME, &mut host, &mut surface);
        c.sit(&mut host, &mut surface);

        assert!(c.state().is_sitting());
        assert_eq!(host.set.last(), Some(&AnimTrigger::Sit));
        assert_eq!(surface.0, Some(Tint::Red));

        let fired = host.set.len();
        for input in [
            MovementInput::ZERO,
            MovementInput::new(1.0, 0.0),
            MovementInput::new(0.0, 1.0),
        ] {
            c.frame(input, FRAME, &mut host, &mut surface);
            assert!(!c.fixed_tick(input, &origin(), TICK, &mut host));
        }
        assert_eq!(host.set.len(), fired);
        assert!(host.moves.is_empty());
        assert_eq!(surface.0, Some(Tint::Red));
    }

    #[test]
    fn sit_from_idle_applies_red() {
        let (mut c, mut host, mut surface) = unlocked();
        c.sit(&mut host, &mut surface);
        assert_eq!(host.set, vec![AnimTrigger::Sit]);
        assert_eq!(surface.0, Some(Tint::Red));
    }

    #[test]
    fn startup_is_blue_and_locked_for_exact_duration() {
        let mut c = LocomotionController::default();
        let mut host = Host::default();
        let mut surface = Surface::default();
        c.activate(&mut surface);
        assert_eq!(surface.0, Some(Tint::Blue));

        c.frame(MovementInput::ZERO, Duration::from_millis(2999), &mut host, &mut surface);
        assert!(c.state().movement_locked);
        assert!(!c.state().ready_to_run);
        assert_eq!(surface.0, Some(Tint::Blue));

        c.frame(MovementInput::ZERO, Duration::from_millis(1), &mut host, &mut surface);
        assert!(!c.state().movement_locked);
        assert!(c.state().ready_to_run);
        assert_eq!(surface.0, Some(Tint::Purple));
    }

    #[test]
    fn reactivation_after_premature_deactivation_restarts_from_blue() {
        let mut c = LocomotionController::default();
        let mut host = Host::default();
        let mut surface = Surface::default();
        c.activate(&mut surface);
        c.frame(MovementInput::ZERO, Duration::from_secs(2), &mut host, &mut surface);
        c.deactivate();

        // The abandoned countdown never fires.
        c.frame(MovementInput::ZERO, Duration::from_secs(5), &mut host, &mut surface);
        assert!(c.state().movement_locked);
        assert_eq!(surface.0, Some(Tint::Blue));

        c.activate(&mut surface);
        assert_eq!(surface.0, Some(Tint::Blue));
        c.frame(MovementInput::ZERO, Duration::from_secs(2), &mut host, &mut surface);
        assert!(c.state().movement_locked);

        c.frame(MovementInput::ZERO, Duration::from_secs(1), &mut host, &mut surface);
        assert!(!c.state().movement_locked);
        assert_eq!(surface.0, Some(Tint::Purple));
    }

    #[test]
    fn reactivation_after_unlock_keeps_movement_unlocked() {
        let (mut c, mut host, mut surface) = unlocked();
        c.deactivate();
        c.activate(&mut surface);
        assert_eq!(surface.0, Some(Tint::Blue));
        assert!(!c.state().movement_locked);
        assert!(c.fixed_tick(MovementInput::new(1.0, 0.0), &origin(), TICK, &mut host));
    }

    #[test]
    fn jump_ignores_lock_but_not_sitting() {
        let mut c = LocomotionController::default();
        let mut host = Host::default();
        let mut surface = Surface::default();
        c.activate(&mut surface);
        assert!(c.state().movement_locked);

        assert!(c.jump(&mut host));
        assert_eq!(host.impulses, vec![Vector3::new(0.0, 5.0, 0.0)]);

        c.sit(&mut host, &mut surface);
        assert!(!c.jump(&mut host));
        assert_eq!(host.impulses.len(), 1);
    }

    #[test]
    fn sit_during_startup_keeps_controller_gated_after_unlock() {
        let mut c = LocomotionController::default();
        let mut host = Host::default();
        let mut surface = Surface::default();
        c.activate(&mut surface);
        c.sit(&mut host, &mut surface);
        assert_eq!(surface.0, Some(Tint::Red));

        c.frame(MovementInput::ZERO, Duration::from_secs(3), &mut host, &mut surface);
        assert!(!c.state().movement_locked);
        assert_eq!(surface.0, Some(Tint::Purple));
        assert!(!c.fixed_tick(MovementInput::new(1.0, 0.0), &origin(), TICK, &mut host));
    }

    #[test]
    fn simultaneous_sit_and_jump_does_not_jump() {
        let (mut c, mut host, mut surface) = unlocked();
        let mut body = Host::default();
        let snapshot = InputSnapshot {
            movement: MovementInput::ZERO,
            sit: true,
            jump: true,
        };
        c.handle_actions(&snapshot, &mut host, &mut surface, &mut body);
        assert!(c.state().is_sitting());
        assert!(body.impulses.is_empty());
    }

    #[test]
    fn pure_state_functions_match_wrapper() {
        let settings = ControllerSettings::default();
        let (s, tint) = ControllerState::default().activate(settings.startup_lock);
        assert_eq!(tint, Tint::Blue);
        let (s, tint) = s.advance_startup(Duration::from_secs(3));
        assert_eq!(tint, Some(Tint::Purple));

        let (s, t) = s.frame(MovementInput::new(0.0, 0.5));
        assert_eq!(t.map(|t| t.next), Some(PresentationState::Strafe));
        assert!(s.fixed_tick(MovementInput::new(0.0, 0.5), &origin(), TICK, &settings).is_some());
    }
}
