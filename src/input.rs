use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;
use std::collections::HashSet;

/// Window-level actions handled by the game loop rather than by a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAction {
    Quit,
    ToggleFpsDisplay,
}

/// Snapshot of the keyboard for one frame
///
/// States read two views of the keyboard:
/// - `is_held` for continuous input (walking, menu selection the way a pad works)
/// - `was_pressed` for one-shot input that must not repeat while the key stays down
///   (dismissing a popup slide)
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    held: HashSet<Keycode>,
    pressed: HashSet<Keycode>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    /// Builds a snapshot where `keys` are held and were pressed this frame
    pub fn pressing(keys: &[Keycode]) -> Self {
        KeySet {
            held: keys.iter().copied().collect(),
            pressed: keys.iter().copied().collect(),
        }
    }

    #[cfg(test)]
    /// Builds a snapshot where `keys` are held down from an earlier frame
    pub fn holding(keys: &[Keycode]) -> Self {
        KeySet {
            held: keys.iter().copied().collect(),
            pressed: HashSet::new(),
        }
    }

    pub fn is_held(&self, key: Keycode) -> bool {
        self.held.contains(&key)
    }

    pub fn was_pressed(&self, key: Keycode) -> bool {
        self.pressed.contains(&key)
    }

    pub fn any_held(&self, keys: &[Keycode]) -> bool {
        keys.iter().any(|key| self.is_held(*key))
    }
}

/// Drains SDL2 events once per frame
///
/// Key-down events become the "pressed this frame" set, the keyboard state
/// becomes the "held" set, and a few events are lifted into [`SystemAction`]s.
pub struct InputSystem;

impl InputSystem {
    pub fn new() -> Self {
        InputSystem
    }

    pub fn poll(&self, event_pump: &mut EventPump) -> (KeySet, Vec<SystemAction>) {
        let mut keys = KeySet::new();
        let mut actions = Vec::new();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => actions.push(SystemAction::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if key == Keycode::F5 {
                        actions.push(SystemAction::ToggleFpsDisplay);
                    }
                    keys.pressed.insert(key);
                }
                _ => {}
            }
        }

        keys.held = event_pump
            .keyboard_state()
            .pressed_scancodes()
            .filter_map(Keycode::from_scancode)
            .collect();
        // A tap shorter than a frame is released before the state snapshot
        keys.held.extend(keys.pressed.iter().copied());

        (keys, actions)
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}
