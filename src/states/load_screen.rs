//! Loading screens
//!
//! Three timed interstitials share one implementation, selected by
//! [`LoadScreenKind`]:
//!
//! - `Standard`: "PREPARING LEVEL..." with a filling progress bar, then the level
//! - `GameOver`: big "GAME OVER" and the final score, then the main menu
//! - `TimeOut`: the "TIME UP" HUD, then another try (or game over with no lives left)
//!
//! Each screen is a timeline measured from `startup`: a showing phase, then
//! optionally a short blackout and a one-frame-ish flash of the level's sky colour
//! before handing over. The game-over screen plays its own music while it is up.

use crate::animation::progress;
use crate::constants::{BLACK, GOLD, LEVEL_FLASH, RED, WHITE};
use crate::game::{GameInfo, State, StateCore, StateId};
use crate::input::KeySet;
use crate::sound::{SoundCommand, Track};
use crate::sprite::Gfx;
use crate::text::draw_text_centered;
use crate::ui::{InfoState, OverheadInfo, ProgressBar};
use sdl2::render::Canvas;
use sdl2::video::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadScreenKind {
    Standard,
    GameOver,
    TimeOut,
}

/// Phase boundaries in milliseconds since startup; each phase lasts until its bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    pub showing_until: u64,
    pub blackout_until: Option<u64>,
    pub flash_until: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Showing,
    Blackout,
    Flash,
    Finished,
}

impl Timeline {
    pub fn phase_at(&self, elapsed: u64) -> LoadPhase {
        if elapsed < self.showing_until {
            return LoadPhase::Showing;
        }
        if let Some(until) = self.blackout_until {
            if elapsed < until {
                return LoadPhase::Blackout;
            }
        }
        if let Some(until) = self.flash_until {
            if elapsed < until {
                return LoadPhase::Flash;
            }
        }
        LoadPhase::Finished
    }
}

impl LoadScreenKind {
    pub fn timeline(self) -> Timeline {
        match self {
            LoadScreenKind::Standard => Timeline {
                showing_until: 2400,
                blackout_until: Some(2600),
                flash_until: Some(2635),
            },
            LoadScreenKind::GameOver => Timeline {
                showing_until: 7000,
                blackout_until: Some(7200),
                flash_until: Some(7235),
            },
            LoadScreenKind::TimeOut => Timeline {
                showing_until: 2400,
                blackout_until: None,
                flash_until: None,
            },
        }
    }

    pub fn info_state(self) -> InfoState {
        match self {
            LoadScreenKind::Standard => InfoState::LoadScreen,
            LoadScreenKind::GameOver => InfoState::GameOver,
            LoadScreenKind::TimeOut => InfoState::TimeOut,
        }
    }

    /// Screen to show afterwards, decided from the game info at startup
    pub fn next_state(self, game_info: &GameInfo) -> StateId {
        match self {
            LoadScreenKind::Standard => StateId::Level1,
            LoadScreenKind::GameOver => StateId::MainMenu,
            LoadScreenKind::TimeOut if game_info.lives == 0 => StateId::GameOver,
            LoadScreenKind::TimeOut => StateId::LoadScreen,
        }
    }
}

pub struct LoadScreen {
    core: StateCore,
    kind: LoadScreenKind,
    phase: LoadPhase,
    overhead_info: OverheadInfo,
    progress_bar: ProgressBar,
}

impl LoadScreen {
    pub fn new(kind: LoadScreenKind) -> Self {
        let game_info = GameInfo::default();
        LoadScreen {
            core: StateCore::new(kind.next_state(&game_info)),
            kind,
            phase: LoadPhase::Showing,
            overhead_info: OverheadInfo::new(&game_info, kind.info_state()),
            progress_bar: ProgressBar::new(),
        }
    }

    #[cfg(test)]
    pub fn kind(&self) -> LoadScreenKind {
        self.kind
    }

    #[cfg(test)]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Fraction of the showing phase that has passed
    pub fn progress(&self) -> f32 {
        progress(self.core.elapsed(), self.kind.timeline().showing_until)
    }

    fn draw_message(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        match self.kind {
            LoadScreenKind::Standard => {
                draw_text_centered(canvas, "PREPARING LEVEL...", 400, 250, GOLD, 4)?;
                self.progress_bar.render(canvas, 300, 320, self.progress())?;
            }
            LoadScreenKind::GameOver => {
                draw_text_centered(canvas, "GAME OVER", 400, 200, RED, 8)?;
                let score = format!("FINAL SCORE: {}", self.core.game_info.score);
                draw_text_centered(canvas, &score, 400, 350, WHITE, 3)?;
            }
            LoadScreenKind::TimeOut => {}
        }
        Ok(())
    }
}

impl State for LoadScreen {
    fn core(&self) -> &StateCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore {
        &mut self.core
    }

    fn startup(&mut self, current_time: u64, persist: GameInfo) {
        self.core.next = self.kind.next_state(&persist);
        self.overhead_info = OverheadInfo::new(&persist, self.kind.info_state());
        self.core.begin(current_time, persist);
        self.phase = LoadPhase::Showing;
        if self.kind == LoadScreenKind::GameOver {
            self.core.play_sound(SoundCommand::PlayMusic(Track::GameOver));
        }
        log::debug!("{:?} load screen, next: {}", self.kind, self.core.next);
    }

    fn cleanup(&mut self) -> GameInfo {
        if self.kind == LoadScreenKind::GameOver {
            self.core.play_sound(SoundCommand::StopMusic);
        }
        self.core.finish()
    }

    fn update(&mut self, _keys: &KeySet, current_time: u64) {
        self.core.current_time = current_time;
        self.phase = self.kind.timeline().phase_at(self.core.elapsed());

        match self.phase {
            LoadPhase::Showing => self.overhead_info.update(&self.core.game_info, current_time),
            LoadPhase::Finished => self.core.done = true,
            LoadPhase::Blackout | LoadPhase::Flash => {}
        }
    }

    fn draw(&self, canvas: &mut Canvas<Window>, gfx: &Gfx) -> Result<(), String> {
        let background = match self.phase {
            LoadPhase::Flash => LEVEL_FLASH,
            _ => BLACK,
        };
        canvas.set_draw_color(background);
        canvas.clear();

        if self.phase == LoadPhase::Showing {
            self.draw_message(canvas)?;
            self.overhead_info.draw(canvas, gfx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until(screen: &mut LoadScreen, start: u64, end: u64) {
        let keys = KeySet::new();
        let mut now = start;
        while now <= end {
            screen.update(&keys, now);
            now += 5;
        }
    }

    #[test]
    fn test_standard_timeline() {
        let timeline = LoadScreenKind::Standard.timeline();
        assert_eq!(timeline.phase_at(0), LoadPhase::Showing);
        assert_eq!(timeline.phase_at(2399), LoadPhase::Showing);
        assert_eq!(timeline.phase_at(2400), LoadPhase::Blackout);
        assert_eq!(timeline.phase_at(2599), LoadPhase::Blackout);
        assert_eq!(timeline.phase_at(2600), LoadPhase::Flash);
        assert_eq!(timeline.phase_at(2634), LoadPhase::Flash);
        assert_eq!(timeline.phase_at(2635), LoadPhase::Finished);
    }

    #[test]
    fn test_game_over_timeline() {
        let timeline = LoadScreenKind::GameOver.timeline();
        assert_eq!(timeline.phase_at(6999), LoadPhase::Showing);
        assert_eq!(timeline.phase_at(7000), LoadPhase::Blackout);
        assert_eq!(timeline.phase_at(7200), LoadPhase::Flash);
        assert_eq!(timeline.phase_at(7235), LoadPhase::Finished);
    }

    #[test]
    fn test_time_out_has_no_blackout_or_flash() {
        let timeline = LoadScreenKind::TimeOut.timeline();
        assert_eq!(timeline.phase_at(2399), LoadPhase::Showing);
        assert_eq!(timeline.phase_at(2400), LoadPhase::Finished);
    }

    #[test]
    fn test_next_states() {
        let info = GameInfo::default();
        assert_eq!(LoadScreenKind::Standard.next_state(&info), StateId::Level1);
        assert_eq!(LoadScreenKind::GameOver.next_state(&info), StateId::MainMenu);
        assert_eq!(LoadScreenKind::TimeOut.next_state(&info), StateId::LoadScreen);

        let out_of_lives = GameInfo {
            lives: 0,
            ..Default::default()
        };
        assert_eq!(LoadScreenKind::TimeOut.next_state(&out_of_lives), StateId::GameOver);
    }

    #[test]
    fn test_info_states() {
        assert_eq!(LoadScreenKind::Standard.info_state(), InfoState::LoadScreen);
        assert_eq!(LoadScreenKind::GameOver.info_state(), InfoState::GameOver);
        assert_eq!(LoadScreenKind::TimeOut.info_state(), InfoState::TimeOut);
    }

    #[test]
    fn test_standard_screen_finishes_after_flash() {
        let mut screen = LoadScreen::new(LoadScreenKind::Standard);
        screen.startup(10_000, GameInfo::default());

        run_until(&mut screen, 10_000, 12_610);
        assert_eq!(screen.phase(), LoadPhase::Flash);
        assert!(!screen.is_done());

        run_until(&mut screen, 12_635, 12_640);
        assert_eq!(screen.phase(), LoadPhase::Finished);
        assert!(screen.is_done());
        assert_eq!(screen.next(), StateId::Level1);
    }

    #[test]
    fn test_progress_fills_over_showing_phase() {
        let mut screen = LoadScreen::new(LoadScreenKind::Standard);
        let keys = KeySet::new();
        screen.startup(1000, GameInfo::default());

        screen.update(&keys, 1000);
        assert_eq!(screen.progress(), 0.0);
        screen.update(&keys, 2200);
        assert_eq!(screen.progress(), 0.5);
        screen.update(&keys, 9000);
        assert_eq!(screen.progress(), 1.0);
    }

    #[test]
    fn test_time_out_next_uses_lives_at_startup() {
        let mut screen = LoadScreen::new(LoadScreenKind::TimeOut);
        screen.startup(
            0,
            GameInfo {
                lives: 0,
                ..Default::default()
            },
        );
        assert_eq!(screen.next(), StateId::GameOver);

        screen.startup(0, GameInfo::default());
        assert_eq!(screen.next(), StateId::LoadScreen);
    }

    #[test]
    fn test_restart_resets_phase_and_done() {
        let mut screen = LoadScreen::new(LoadScreenKind::TimeOut);
        screen.startup(0, GameInfo::default());
        run_until(&mut screen, 0, 2500);
        assert!(screen.is_done());

        let info = screen.cleanup();
        screen.startup(3000, info);
        assert!(!screen.is_done());
        assert_eq!(screen.phase(), LoadPhase::Showing);
    }

    #[test]
    fn test_game_info_passes_through() {
        let mut screen = LoadScreen::new(LoadScreenKind::GameOver);
        let info = GameInfo {
            score: 2500,
            lives: 0,
            ..Default::default()
        };
        screen.startup(0, info.clone());
        assert_eq!(screen.cleanup(), info);
    }

    #[test]
    fn test_game_over_music_starts_and_stops() {
        let mut screen = LoadScreen::new(LoadScreenKind::GameOver);
        screen.startup(0, GameInfo::default());
        assert_eq!(
            screen.core().sounds,
            vec![SoundCommand::PlayMusic(Track::GameOver)]
        );

        screen.core_mut().sounds.clear();
        screen.cleanup();
        assert_eq!(screen.core().sounds, vec![SoundCommand::StopMusic]);
    }

    #[test]
    fn test_other_screens_are_silent() {
        for kind in [LoadScreenKind::Standard, LoadScreenKind::TimeOut] {
            let mut screen = LoadScreen::new(kind);
            screen.startup(0, GameInfo::default());
            screen.cleanup();
            assert!(screen.core().sounds.is_empty(), "{:?} queued sounds", kind);
        }
    }
}
