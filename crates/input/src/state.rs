use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::action::Action;

/// Held actions for the current tick, plus the set captured at the last
/// tick boundary for edge detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    current: HashSet<Action>,
    previous: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key_down(&mut self, action: Action) {
        if self.current.insert(action) {
            tracing::trace!(action = action.name(), "key down");
        }
    }

    pub fn set_key_up(&mut self, action: Action) {
        if self.current.remove(&action) {
            tracing::trace!(action = action.name(), "key up");
        }
    }

    /// Release every held action, e.g. when the window loses focus and
    /// key-up events would otherwise be missed.
    pub fn release_all(&mut self) {
        self.current.clear();
    }

    pub fn is_key_down(&self, action: Action) -> bool {
        self.current.contains(&action)
    }

    /// Whether the action was held at the last tick boundary.
    pub fn was_key_down(&self, action: Action) -> bool {
        self.previous.contains(&action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.is_key_down(action) && !self.was_key_down(action)
    }

    pub fn just_released(&self, action: Action) -> bool {
        !self.is_key_down(action) && self.was_key_down(action)
    }

    /// Copy the current set into `previous`. Called once per fixed tick,
    /// after the update has consumed the state.
    pub fn snapshot(&mut self) {
        self.previous.clone_from(&self.current);
    }
}

/// Cloneable handle to an [`InputState`] shared between the event source
/// that writes key transitions and the loop that reads them each tick.
#[derive(Debug, Clone, Default)]
pub struct SharedInput(Arc<Mutex<InputState>>);

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the state. A poisoned lock is recovered: key state stays valid
    /// even if a writer panicked mid-update.
    pub fn lock(&self) -> MutexGuard<'_, InputState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn press(&self, action: Action) {
        self.lock().set_key_down(action);
    }

    pub fn release(&self, action: Action) {
        self.lock().set_key_up(action);
    }

    pub fn release_all(&self) {
        self.lock().release_all();
    }

    pub fn is_key_down(&self, action: Action) -> bool {
        self.lock().is_key_down(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_and_up() {
        let mut input = InputState::new();
        assert!(!input.is_key_down(Action::MoveForward));

        input.set_key_down(Action::MoveForward);
        assert!(input.is_key_down(Action::MoveForward));
        assert!(!input.is_key_down(Action::TurnLeft));

        input.set_key_up(Action::MoveForward);
        assert!(!input.is_key_down(Action::MoveForward));
    }

    #[test]
    fn repeated_key_down_is_harmless() {
        let mut input = InputState::new();
        input.set_key_down(Action::TurnLeft);
        input.set_key_down(Action::TurnLeft);
        input.set_key_up(Action::TurnLeft);
        assert!(!input.is_key_down(Action::TurnLeft));
    }

    #[test]
    fn snapshot_does_not_change_current_state() {
        let mut input = InputState::new();
        input.set_key_down(Action::TurnRight);

        let before: Vec<bool> = Action::ALL.iter().map(|a| input.is_key_down(*a)).collect();
        input.snapshot();
        let after: Vec<bool> = Action::ALL.iter().map(|a| input.is_key_down(*a)).collect();
        assert_eq!(before, after);

        input.snapshot();
        let again: Vec<bool> = Action::ALL.iter().map(|a| input.is_key_down(*a)).collect();
        assert_eq!(before, again);
    }

    #[test]
    fn edge_detection_across_ticks() {
        let mut input = InputState::new();
        input.set_key_down(Action::MoveForward);
        assert!(input.just_pressed(Action::MoveForward));

        input.snapshot();
        assert!(!input.just_pressed(Action::MoveForward));
        assert!(input.was_key_down(Action::MoveForward));

        input.set_key_up(Action::MoveForward);
        assert!(input.just_released(Action::MoveForward));

        input.snapshot();
        assert!(!input.just_released(Action::MoveForward));
    }

    #[test]
    fn release_all_clears_current_only() {
        let mut input = InputState::new();
        input.set_key_down(Action::TurnLeft);
        input.set_key_down(Action::MoveForward);
        input.snapshot();
        input.release_all();

        assert!(Action::ALL.iter().all(|a| !input.is_key_down(*a)));
        assert!(input.was_key_down(Action::TurnLeft));
    }

    #[test]
    fn shared_input_crosses_threads() {
        let shared = SharedInput::new();
        let writer = shared.clone();
        std::thread::spawn(move || {
            writer.press(Action::TurnRight);
        })
        .join()
        .unwrap();

        assert!(shared.is_key_down(Action::TurnRight));
        shared.release(Action::TurnRight);
        assert!(!shared.lock().is_key_down(Action::TurnRight));
    }

    #[test]
    fn shared_input_survives_poisoning() {
        let shared = SharedInput::new();
        let poisoner = shared.clone();
        let _ = std::thread::spawn(move || {
            let mut guard = poisoner.lock();
            guard.set_key_down(Action::MoveForward);
            panic!("writer died");
        })
        .join();

        assert!(shared.is_key_down(Action::MoveForward));
    }
}
