#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Jump,
}

impl InputAction {
    pub const ALL: [InputAction; 3] = [
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::Jump,
    ];

    pub fn token(self) -> &'static str {
        match self {
            InputAction::MoveLeft => "left",
            InputAction::MoveRight => "right",
            InputAction::Jump => "jump",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.token().eq_ignore_ascii_case(token))
    }
}

/// Intent sampled once per tick. No buffering, no edge detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputIntent {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        match action {
            InputAction::MoveLeft => self.left,
            InputAction::MoveRight => self.right,
            InputAction::Jump => self.jump,
        }
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        match action {
            InputAction::MoveLeft => self.left = is_down,
            InputAction::MoveRight => self.right = is_down,
            InputAction::Jump => self.jump = is_down,
        }
        self
    }

    pub fn merged(self, other: InputIntent) -> Self {
        Self {
            left: self.left || other.left,
            right: self.right || other.right,
            jump: self.jump || other.jump,
        }
    }
}
