use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Physical keys the game reacts to. Whatever owns the OS window translates
/// its own key events into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    R,
    Up,
    Down,
    Enter,
    Space,
    Digit1,
    Digit2,
    Digit3,
}

/// Raw input state for a single frame.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub keys_held: HashSet<Key>,
    pub keys_pressed: HashSet<Key>,
    /// Horizontal mouse motion since the last frame, in pixels.
    pub mouse_delta_x: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down this frame.
    pub fn press(&mut self, key: Key) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn is_key_held(&self, key: Key) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: Key) -> bool { self.keys_pressed.contains(&key) }
}

/// Logical game actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    MenuUp,
    MenuDown,
    Confirm,
    /// Continue out of the shop; also starts from the main menu.
    Continue,
    Restart,
    SelectPerk1,
    SelectPerk2,
    SelectPerk3,
}

/// Maps logical actions to one or more keys.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<Key>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, key: Key) {
        self.bindings.entry(action).or_default().push(key);
    }

    /// Returns true if the action was triggered this frame (pressed).
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|k| input.is_key_pressed(*k)))
    }

    /// Returns true if the action is currently being held.
    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|k| input.is_key_held(*k)))
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

impl ActionMap<Action> {
    /// WASD movement, W/S or arrows for menus, Enter/Space to pick, 1–3 for
    /// perks, Space to leave the shop and R to restart after a win.
    pub fn default_bindings() -> Self {
        let mut map = Self::new();
        map.bind(Action::MoveForward, Key::W);
        map.bind(Action::MoveBack, Key::S);
        map.bind(Action::StrafeLeft, Key::A);
        map.bind(Action::StrafeRight, Key::D);
        map.bind(Action::MenuUp, Key::W);
        map.bind(Action::MenuUp, Key::Up);
        map.bind(Action::MenuDown, Key::S);
        map.bind(Action::MenuDown, Key::Down);
        map.bind(Action::Confirm, Key::Enter);
        map.bind(Action::Continue, Key::Space);
        map.bind(Action::Restart, Key::R);
        map.bind(Action::SelectPerk1, Key::Digit1);
        map.bind(Action::SelectPerk2, Key::Digit2);
        map.bind(Action::SelectPerk3, Key::Digit3);
        map
    }
}
