use bevy::prelude::*;
use locomotion::{AnimTrigger, AnimationDriver};

/// Trigger-driven animation state for one character.
///
/// Triggers behave like a fire-once latch: `set_trigger` arms one, it stays armed until
/// the graph consumes it on its next evaluation or until `reset_trigger` clears it.
/// Armed triggers are consumed in the order they were set, one per evaluation. Setting
/// an already armed trigger keeps its place. Every clip can be entered from any other clip.
#[derive(Component, Debug, Default)]
pub struct Animator {
    armed: Vec<AnimTrigger>,
    current: Option<AnimTrigger>,
}

impl Animator {
    pub fn current(&self) -> Option<AnimTrigger> {
        self.current
    }

    /// Consume the oldest armed trigger and make its clip current.
    pub fn evaluate(&mut self) -> Option<AnimTrigger> {
        if self.armed.is_empty() {
            return None;
        }
        let fired = self.armed.remove(0);
        self.current = Some(fired);
        Some(fired)
    }
}

impl AnimationDriver for Animator {
    fn set_trigger(&mut self, trigger: AnimTrigger) {
        if !self.armed.contains(&trigger) {
            self.armed.push(trigger);
        }
    }

    fn reset_trigger(&mut self, trigger: AnimTrigger) {
        self.armed.retain(|armed| *armed != trigger);
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(PostUpdate, play_triggered_clips);
}

fn play_triggered_clips(mut animator_q: Query<(Entity, &mut Animator)>) {
    for (entity, mut animator) in &mut animator_q {
        let from = animator.current();
        if let Some(clip) = animator.evaluate() {
            debug!(
                "{entity}: clip {} -> {}",
                from.map_or("none", |c| c.name()),
                clip.name()
            );
        }
    }
}
