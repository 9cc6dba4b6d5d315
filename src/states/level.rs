//! World 1-1
//!
//! A walkable stretch of the level background with the HUD clock running.
//! On a fresh run the configured slides are shown first; the clock is paused
//! while a slide is up and X moves to the next one. When the clock runs out
//! Mario loses a life and the time-out screen takes over.
//!
//! The camera only scrolls forward; Mario cannot walk back past its left edge.

use crate::constants::{BACKGROUND_MULTIPLIER, GROUND_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH, SIZE_MULTIPLIER};
use crate::game::{GameInfo, LevelState, State, StateCore, StateId};
use crate::gui::SlideShow;
use crate::input::KeySet;
use crate::sound::{Effect, SoundCommand, Track};
use crate::sprite::{Backdrop, Gfx, SpriteRegion};
use crate::ui::{InfoState, OverheadInfo};
use sdl2::keyboard::Keycode;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Horizontal walking speed in pixels per frame
const WALK_SPEED: i32 = 5;

/// Mario's start offset from the left edge of the camera
const START_OFFSET_X: i32 = 110;

/// Camera keeps Mario at least this far from the left edge of the screen
const CAMERA_LEAD: i32 = 300;

/// Clock value at which the hurry-up sound plays
const HURRY_TIME: u32 = 100;

pub struct Level {
    core: StateCore,
    level_time: u32,
    level_width: u32,
    slide_images: Vec<String>,
    slides: SlideShow,
    overhead_info: OverheadInfo,
    background: Backdrop,
    mario: SpriteRegion,
    mario_x: i32,
    camera_x: i32,
    hurry_played: bool,
}

impl Level {
    /// `level_width` is the scaled background width; Mario and the camera stay inside it
    ///
    /// The clock starts at `level_time`, at least 1 so a level never ends before it is shown.
    pub fn new(level_time: u32, level_width: u32, slide_images: Vec<String>) -> Self {
        let level_time = level_time.max(1);
        Level {
            core: StateCore::new(StateId::TimeOut),
            level_time,
            level_width: level_width.max(SCREEN_WIDTH),
            slide_images,
            slides: SlideShow::new(),
            overhead_info: OverheadInfo::with_level_time(&GameInfo::default(), InfoState::Level, level_time),
            background: Backdrop::new("level_1", BACKGROUND_MULTIPLIER),
            mario: SpriteRegion::new("mario_bros", 178, 32, 12, 16, SIZE_MULTIPLIER),
            mario_x: START_OFFSET_X,
            camera_x: 0,
            hurry_played: false,
        }
    }

    #[cfg(test)]
    pub fn mario_x(&self) -> i32 {
        self.mario_x
    }

    #[cfg(test)]
    pub fn camera_x(&self) -> i32 {
        self.camera_x
    }

    #[cfg(test)]
    pub fn clock(&self) -> u32 {
        self.overhead_info.clock()
    }

    #[cfg(test)]
    pub fn slides(&self) -> &SlideShow {
        &self.slides
    }

    #[cfg(test)]
    pub fn game_info(&self) -> &GameInfo {
        &self.core.game_info
    }

    fn max_mario_x(&self) -> i32 {
        let (width, _) = self.mario.scaled_size();
        self.level_width as i32 - width as i32
    }

    fn walk(&mut self, keys: &KeySet) {
        let mut dx = 0;
        if keys.is_held(Keycode::Left) {
            dx -= WALK_SPEED;
        }
        if keys.is_held(Keycode::Right) {
            dx += WALK_SPEED;
        }
        if dx == 0 {
            return;
        }

        self.mario_x = (self.mario_x + dx).clamp(self.camera_x, self.max_mario_x());

        let max_camera = self.level_width as i32 - SCREEN_WIDTH as i32;
        if self.mario_x - self.camera_x > CAMERA_LEAD {
            self.camera_x = (self.mario_x - CAMERA_LEAD).min(max_camera);
        }
    }

    fn time_up(&mut self) {
        let info = &mut self.core.game_info;
        info.lose_life();
        info.mario_dead = true;
        info.level_state = Some(LevelState::TimeUp);
        info.camera_start_x = 0;
        info.record_top_score();

        log::info!("Time up, {} lives left", info.lives);
        self.core.play_sound(SoundCommand::StopMusic);
        self.core.next = StateId::TimeOut;
        self.core.done = true;
    }
}

impl State for Level {
    fn core(&self) -> &StateCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore {
        &mut self.core
    }

    fn startup(&mut self, current_time: u64, mut persist: GameInfo) {
        // Slides introduce a run; retries after a time-out skip them
        let fresh_run = persist.level_state.is_none();

        persist.mario_dead = false;
        persist.level_state = Some(LevelState::Playing);

        self.overhead_info = OverheadInfo::with_level_time(&persist, InfoState::Level, self.level_time);
        self.camera_x = persist.camera_start_x.max(0);
        self.mario_x = (self.camera_x + START_OFFSET_X).min(self.max_mario_x());
        self.core.begin(current_time, persist);
        self.core.next = StateId::TimeOut;
        self.hurry_played = false;
        self.core.play_sound(SoundCommand::PlayMusic(Track::MainTheme));

        if fresh_run {
            self.slides.start(self.slide_images.iter().cloned(), current_time);
        } else {
            self.slides.start(Vec::<String>::new(), current_time);
        }
    }

    fn update(&mut self, keys: &KeySet, current_time: u64) {
        self.core.current_time = current_time;
        if self.core.done {
            return;
        }

        if self.slides.is_active() {
            self.overhead_info.set_paused(true);
            if keys.was_pressed(Keycode::X) {
                self.slides.advance(current_time);
            }
        } else {
            self.overhead_info.set_paused(false);
            self.walk(keys);
        }

        self.overhead_info.update(&self.core.game_info, current_time);
        if self.slides.is_active() {
            return;
        }

        if !self.hurry_played && self.overhead_info.clock() == HURRY_TIME {
            self.hurry_played = true;
            self.core.play_sound(SoundCommand::PlayEffect(Effect::OutOfTime));
        }
        if self.overhead_info.time_is_up() {
            self.time_up();
        }
    }

    fn cleanup(&mut self) -> GameInfo {
        self.core.play_sound(SoundCommand::StopMusic);
        self.core.finish()
    }

    fn draw(&self, canvas: &mut Canvas<Window>, gfx: &Gfx) -> Result<(), String> {
        let screen = Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT);
        let viewport = Rect::new(self.camera_x, 0, SCREEN_WIDTH, SCREEN_HEIGHT);
        self.background.render(canvas, gfx, viewport, screen)?;

        let mut mario_rect = self.mario.dest_at(self.mario_x - self.camera_x, 0);
        mario_rect.set_bottom(GROUND_HEIGHT);
        self.mario.render(canvas, gfx, mario_rect)?;

        self.overhead_info.draw(canvas, gfx)?;
        self.slides.draw(canvas, gfx, self.core.current_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL_WIDTH: u32 = 3000;

    fn level_with_slides(slides: &[&str]) -> Level {
        Level::new(3, LEVEL_WIDTH, slides.iter().map(|s| s.to_string()).collect())
    }

    fn step(level: &mut Level, keys: &KeySet, from: u64, to: u64) -> u64 {
        let mut now = from;
        while now <= to {
            level.update(keys, now);
            now += 16;
        }
        now
    }

    #[test]
    fn test_fresh_run_shows_slides_and_pauses_clock() {
        let mut level = level_with_slides(&["slide_1", "slide_2"]);
        level.startup(0, GameInfo::default());
        assert!(level.slides().is_active());

        step(&mut level, &KeySet::new(), 0, 5000);
        assert_eq!(level.clock(), 3);
        assert!(!level.is_done());
    }

    #[test]
    fn test_x_advances_slides_once_per_press() {
        let mut level = level_with_slides(&["slide_1", "slide_2"]);
        level.startup(0, GameInfo::default());

        level.update(&KeySet::pressing(&[Keycode::X]), 16);
        assert_eq!(level.slides().popup().image(), Some("slide_2"));

        // Holding X does not skip the next slide
        level.update(&KeySet::holding(&[Keycode::X]), 32);
        assert_eq!(level.slides().popup().image(), Some("slide_2"));
        assert!(level.slides().is_active());

        level.update(&KeySet::pressing(&[Keycode::X]), 48);
        assert!(!level.slides().is_active());
    }

    #[test]
    fn test_retry_skips_slides() {
        let mut level = level_with_slides(&["slide_1"]);
        level.startup(
            0,
            GameInfo {
                level_state: Some(LevelState::TimeUp),
                ..Default::default()
            },
        );
        assert!(!level.slides().is_active());
        assert_eq!(level.game_info().level_state, Some(LevelState::Playing));
    }

    #[test]
    fn test_clock_runs_out_costs_a_life() {
        let mut level = level_with_slides(&[]);
        level.startup(
            0,
            GameInfo {
                score: 900,
                top_score: 100,
                ..Default::default()
            },
        );

        step(&mut level, &KeySet::new(), 0, 1300);
        assert!(level.is_done());
        assert_eq!(level.next(), StateId::TimeOut);

        let info = level.cleanup();
        assert_eq!(info.lives, 2);
        assert!(info.mario_dead);
        assert_eq!(info.level_state, Some(LevelState::TimeUp));
        assert_eq!(info.top_score, 900);
    }

    #[test]
    fn test_walking_moves_camera() {
        let mut level = Level::new(400, LEVEL_WIDTH, Vec::new());
        level.startup(0, GameInfo::default());
        assert_eq!(level.mario_x(), START_OFFSET_X);

        let right = KeySet::holding(&[Keycode::Right]);
        for frame in 0..100 {
            level.update(&right, frame * 16);
        }
        assert_eq!(level.mario_x(), START_OFFSET_X + 100 * WALK_SPEED);
        assert_eq!(level.camera_x(), level.mario_x() - CAMERA_LEAD);
    }

    #[test]
    fn test_walking_stays_inside_level() {
        let mut level = Level::new(400, LEVEL_WIDTH, Vec::new());
        level.startup(0, GameInfo::default());

        let left = KeySet::holding(&[Keycode::Left]);
        for frame in 0..100 {
            level.update(&left, frame * 16);
        }
        assert_eq!(level.mario_x(), 0);
        assert_eq!(level.camera_x(), 0);

        let right = KeySet::holding(&[Keycode::Right]);
        for frame in 100..1000 {
            level.update(&right, frame * 16);
        }
        assert_eq!(level.mario_x(), LEVEL_WIDTH as i32 - 30);
        assert_eq!(level.camera_x(), (LEVEL_WIDTH - SCREEN_WIDTH) as i32);
    }

    #[test]
    fn test_no_walking_during_slides() {
        let mut level = level_with_slides(&["slide_1"]);
        level.startup(0, GameInfo::default());
        level.update(&KeySet::holding(&[Keycode::Right]), 16);
        assert_eq!(level.mario_x(), START_OFFSET_X);
    }

    #[test]
    fn test_cannot_walk_back_past_camera() {
        let mut level = Level::new(400, LEVEL_WIDTH, Vec::new());
        level.startup(0, GameInfo::default());

        let right = KeySet::holding(&[Keycode::Right]);
        for frame in 0..200 {
            level.update(&right, frame * 16);
        }
        let camera = level.camera_x();
        assert!(camera > 0);

        let left = KeySet::holding(&[Keycode::Left]);
        for frame in 200..400 {
            level.update(&left, frame * 16);
        }
        assert_eq!(level.camera_x(), camera);
        assert_eq!(level.mario_x(), camera);
        assert!(level.mario_x() - level.camera_x() >= 0);
    }

    #[test]
    fn test_zero_level_time_waits_for_slides() {
        let mut level = Level::new(0, LEVEL_WIDTH, vec!["slide_1".to_string()]);
        level.startup(0, GameInfo::default());

        step(&mut level, &KeySet::new(), 0, 2000);
        assert!(!level.is_done());
        assert!(level.slides().is_active());

        // One tick of clock once the slide is closed
        level.update(&KeySet::pressing(&[Keycode::X]), 2016);
        step(&mut level, &KeySet::new(), 2032, 2500);
        assert!(level.is_done());
    }

    #[test]
    fn test_music_and_hurry_sound() {
        let mut level = Level::new(HURRY_TIME + 1, LEVEL_WIDTH, Vec::new());
        level.startup(0, GameInfo::default());
        assert_eq!(level.core().sounds, vec![SoundCommand::PlayMusic(Track::MainTheme)]);
        level.core_mut().sounds.clear();

        step(&mut level, &KeySet::new(), 0, 800);
        assert_eq!(level.clock(), HURRY_TIME - 1);
        assert_eq!(level.core().sounds, vec![SoundCommand::PlayEffect(Effect::OutOfTime)]);

        level.core_mut().sounds.clear();
        level.cleanup();
        assert_eq!(level.core().sounds, vec![SoundCommand::StopMusic]);
    }
}
