use macroquad::prelude::{ get_keys_pressed, KeyCode };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TogglePause,
    /// Single step, only while paused
    Step,
    Reset,
    NextScene,
    Quit,
}

pub const BINDINGS: [(KeyCode, Action); 5] = [
    (KeyCode::Space, Action::TogglePause),
    (KeyCode::N, Action::Step),
    (KeyCode::R, Action::Reset),
    (KeyCode::Tab, Action::NextScene),
    (KeyCode::Escape, Action::Quit),
];

pub fn action_for(key: KeyCode) -> Option<Action> {
    BINDINGS.iter()
        .find(|(bound, _)| *bound == key)
        .map(|&(_, action)| action)
}

/// Actions whose key went down this frame, in binding order
pub fn pressed_actions() -> Vec<Action> {
    let mut actions = get_keys_pressed().into_iter()
        .filter_map(action_for)
        .collect::<Vec<_>>();
    actions.sort_by_key(|action| BINDINGS.iter().position(|(_, bound)| bound == action));
    actions
}
