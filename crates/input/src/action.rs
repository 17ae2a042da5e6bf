/// A logical control the simulation understands.
///
/// Platform key codes are bound to actions at the edge (see the desktop app);
/// the input state and the world update only ever see actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Rotate counter-clockwise (decreasing angle).
    TurnLeft,
    /// Rotate clockwise (increasing angle).
    TurnRight,
    /// Walk along the facing direction.
    MoveForward,
}

impl Action {
    /// Every recognized action.
    pub const ALL: [Action; 3] = [Action::TurnLeft, Action::TurnRight, Action::MoveForward];

    pub fn name(self) -> &'static str {
        match self {
            Action::TurnLeft => "turn-left",
            Action::TurnRight => "turn-right",
            Action::MoveForward => "move-forward",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_each_action_once() {
        let mut names: Vec<_> = Action::ALL.iter().map(|a| a.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Action::ALL.len());
    }

    #[test]
    fn names_are_kebab_case() {
        assert_eq!(Action::MoveForward.name(), "move-forward");
        assert_eq!(Action::TurnLeft.name(), "turn-left");
    }
}
