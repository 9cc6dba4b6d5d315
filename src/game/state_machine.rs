// Screen state lifecycle and the machine that switches between screens
//
// Every screen follows the same lifecycle:
// 1. `startup` when it becomes active, receiving the shared GameInfo
// 2. `update` once per frame until it marks itself done
// 3. `cleanup` when the machine leaves it, handing the GameInfo on
//
// The machine owns one instance of every screen and reuses it on each visit.
// Sound requests queued on a state's core are collected by the machine and
// handed to the game loop with `drain_sounds`.

use crate::error::GameError;
use crate::input::KeySet;
use crate::sound::SoundCommand;
use crate::sprite::Gfx;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::collections::HashMap;

use super::{GameInfo, StateId};

/// Bookkeeping every screen carries
#[derive(Debug, Clone)]
pub struct StateCore {
    pub start_time: u64,
    pub current_time: u64,
    pub done: bool,
    pub next: StateId,
    pub game_info: GameInfo,
    pub sounds: Vec<SoundCommand>,
}

impl StateCore {
    pub fn new(next: StateId) -> Self {
        StateCore {
            start_time: 0,
            current_time: 0,
            done: false,
            next,
            game_info: GameInfo::default(),
            sounds: Vec::new(),
        }
    }

    /// Resets the lifecycle for a new visit
    pub fn begin(&mut self, current_time: u64, persist: GameInfo) {
        self.start_time = current_time;
        self.current_time = current_time;
        self.done = false;
        self.game_info = persist;
    }

    /// Milliseconds since `startup`
    pub fn elapsed(&self) -> u64 {
        self.current_time.saturating_sub(self.start_time)
    }

    pub fn play_sound(&mut self, command: SoundCommand) {
        self.sounds.push(command);
    }

    /// Ends the visit and hands the game info on
    pub fn finish(&mut self) -> GameInfo {
        self.done = false;
        std::mem::take(&mut self.game_info)
    }
}

/// A game screen driven by the [`StateMachine`]
pub trait State {
    fn core(&self) -> &StateCore;

    fn core_mut(&mut self) -> &mut StateCore;

    fn startup(&mut self, current_time: u64, persist: GameInfo);

    fn update(&mut self, keys: &KeySet, current_time: u64);

    fn draw(&self, canvas: &mut Canvas<Window>, gfx: &Gfx) -> Result<(), String>;

    fn is_done(&self) -> bool {
        self.core().done
    }

    fn next(&self) -> StateId {
        self.core().next
    }

    /// Leaves the screen and returns the game info for the next one
    fn cleanup(&mut self) -> GameInfo {
        self.core_mut().finish()
    }
}

pub struct StateMachine {
    states: HashMap<StateId, Box<dyn State>>,
    current: StateId,
    previous: Option<StateId>,
    sounds: Vec<SoundCommand>,
}

impl StateMachine {
    pub fn new() -> Self {
        StateMachine {
            states: HashMap::new(),
            current: StateId::MainMenu,
            previous: None,
            sounds: Vec::new(),
        }
    }

    pub fn register(&mut self, id: StateId, state: Box<dyn State>) {
        self.states.insert(id, state);
    }

    /// Activates the first screen
    pub fn setup(&mut self, start: StateId, current_time: u64, persist: GameInfo) -> Result<(), GameError> {
        let state = self
            .states
            .get_mut(&start)
            .ok_or_else(|| GameError::UnknownState(start.to_string()))?;
        state.startup(current_time, persist);
        self.current = start;
        self.previous = None;
        log::info!("Starting in {}", start);
        Ok(())
    }

    #[cfg(test)]
    pub fn current(&self) -> StateId {
        self.current
    }

    #[cfg(test)]
    pub fn previous(&self) -> Option<StateId> {
        self.previous
    }

    /// Sound requests queued since the last call, oldest first
    pub fn drain_sounds(&mut self) -> Result<Vec<SoundCommand>, GameError> {
        self.collect_sounds()?;
        Ok(std::mem::take(&mut self.sounds))
    }

    fn collect_sounds(&mut self) -> Result<(), GameError> {
        let queued = std::mem::take(&mut self.active_mut()?.core_mut().sounds);
        self.sounds.extend(queued);
        Ok(())
    }

    /// Runs one frame: switch screens if the active one is done, then update it
    pub fn update(&mut self, keys: &KeySet, current_time: u64) -> Result<(), GameError> {
        if self.active()?.is_done() {
            self.flip(current_time)?;
        }
        self.active_mut()?.update(keys, current_time);
        Ok(())
    }

    /// Moves to the screen the active one names as next
    pub fn flip(&mut self, current_time: u64) -> Result<(), GameError> {
        let next = self.active()?.next();
        if !self.states.contains_key(&next) {
            return Err(GameError::UnknownState(next.to_string()));
        }

        let persist = self.active_mut()?.cleanup();
        self.collect_sounds()?;
        self.previous = Some(self.current);
        self.current = next;
        self.active_mut()?.startup(current_time, persist);

        if let Some(previous) = self.previous {
            log::info!("State change: {} -> {}", previous, next);
        }
        Ok(())
    }

    pub fn draw(&self, canvas: &mut Canvas<Window>, gfx: &Gfx) -> Result<(), String> {
        self.active()?.draw(canvas, gfx)
    }

    fn active(&self) -> Result<&dyn State, GameError> {
        self.states
            .get(&self.current)
            .map(|state| state.as_ref())
            .ok_or_else(|| GameError::UnknownState(self.current.to_string()))
    }

    fn active_mut(&mut self) -> Result<&mut Box<dyn State>, GameError> {
        let current = self.current;
        self.states
            .get_mut(&current)
            .ok_or_else(|| GameError::UnknownState(current.to_string()))
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::Track;

    /// Finishes after a fixed number of updates and bumps the score on startup
    struct CountdownState {
        core: StateCore,
        frames_left: u32,
        frames: u32,
        updates: u32,
    }

    impl CountdownState {
        fn new(next: StateId, frames: u32) -> Self {
            CountdownState {
                core: StateCore::new(next),
                frames_left: frames,
                frames,
                updates: 0,
            }
        }
    }

    impl State for CountdownState {
        fn cleanup(&mut self) -> GameInfo {
            self.core.play_sound(SoundCommand::StopMusic);
            self.core.finish()
        }

        fn core(&self) -> &StateCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut StateCore {
            &mut self.core
        }

        fn startup(&mut self, current_time: u64, mut persist: GameInfo) {
            persist.score += 100;
            self.core.begin(current_time, persist);
            self.core.play_sound(SoundCommand::PlayMusic(Track::MainTheme));
            self.frames_left = self.frames;
        }

        fn update(&mut self, _keys: &KeySet, current_time: u64) {
            self.core.current_time = current_time;
            self.updates += 1;
            self.frames_left = self.frames_left.saturating_sub(1);
            if self.frames_left == 0 {
                self.core.done = true;
            }
        }

        fn draw(&self, _canvas: &mut Canvas<Window>, _gfx: &Gfx) -> Result<(), String> {
            Ok(())
        }
    }

    fn two_state_machine() -> StateMachine {
        let mut machine = StateMachine::new();
        machine.register(StateId::MainMenu, Box::new(CountdownState::new(StateId::LoadScreen, 1)));
        machine.register(StateId::LoadScreen, Box::new(CountdownState::new(StateId::MainMenu, 2)));
        machine
    }

    #[test]
    fn test_setup_unknown_state_fails() {
        let mut machine = StateMachine::new();
        let result = machine.setup(StateId::Level1, 0, GameInfo::default());
        assert!(matches!(result, Err(GameError::UnknownState(_))));
    }

    #[test]
    fn test_flip_happens_on_frame_after_done() {
        let mut machine = two_state_machine();
        let keys = KeySet::new();
        machine.setup(StateId::MainMenu, 0, GameInfo::default()).unwrap();

        // Menu finishes during its first update but stays current until the next frame
        machine.update(&keys, 16).unwrap();
        assert_eq!(machine.current(), StateId::MainMenu);

        machine.update(&keys, 32).unwrap();
        assert_eq!(machine.current(), StateId::LoadScreen);
        assert_eq!(machine.previous(), Some(StateId::MainMenu));
    }

    #[test]
    fn test_game_info_carried_across_flips() {
        let mut machine = two_state_machine();
        let keys = KeySet::new();
        machine.setup(StateId::MainMenu, 0, GameInfo::default()).unwrap();

        for frame in 1..=4 {
            machine.update(&keys, frame * 16).unwrap();
        }

        // Menu startup (+100), load screen startup (+100), back in menu (+100)
        assert_eq!(machine.current(), StateId::MainMenu);
        assert_eq!(machine.active().unwrap().core().game_info.score, 300);
    }

    #[test]
    fn test_startup_time_recorded() {
        let mut machine = two_state_machine();
        let keys = KeySet::new();
        machine.setup(StateId::MainMenu, 0, GameInfo::default()).unwrap();
        machine.update(&keys, 16).unwrap();
        machine.update(&keys, 5000).unwrap();

        let core = machine.active().unwrap().core();
        assert_eq!(core.start_time, 5000);
        assert!(!core.done);
    }

    #[test]
    fn test_flip_to_unregistered_state_fails() {
        let mut machine = StateMachine::new();
        machine.register(StateId::MainMenu, Box::new(CountdownState::new(StateId::Level1, 1)));
        machine.setup(StateId::MainMenu, 0, GameInfo::default()).unwrap();

        let result = machine.flip(10);
        assert!(matches!(result, Err(GameError::UnknownState(_))));
        assert_eq!(machine.current(), StateId::MainMenu);
    }

    #[test]
    fn test_sounds_drained_in_order_across_flip() {
        let mut machine = two_state_machine();
        let keys = KeySet::new();
        machine.setup(StateId::MainMenu, 0, GameInfo::default()).unwrap();
        assert_eq!(
            machine.drain_sounds().unwrap(),
            vec![SoundCommand::PlayMusic(Track::MainTheme)]
        );

        machine.update(&keys, 16).unwrap();
        assert!(machine.drain_sounds().unwrap().is_empty());

        // Leaving the menu stops its music before the load screen starts its own
        machine.update(&keys, 32).unwrap();
        assert_eq!(
            machine.drain_sounds().unwrap(),
            vec![
                SoundCommand::StopMusic,
                SoundCommand::PlayMusic(Track::MainTheme),
            ]
        );
    }
}
