#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Jump,
    MoveLeft,
    MoveRight,
    FastFall,
    FreeSpirit,
    Pause,
}

const ACTION_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::Jump => 0,
            InputAction::MoveLeft => 1,
            InputAction::MoveRight => 2,
            InputAction::FastFall => 3,
            InputAction::FreeSpirit => 4,
            InputAction::Pause => 5,
        }
    }
}
