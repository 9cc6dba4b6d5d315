//! Overhead info (HUD)
//!
//! The strip of text along the top of every screen, plus the extra lines each
//! screen shows below it:
//!
//! | Screen      | Extra content                                  |
//! |-------------|------------------------------------------------|
//! | MainMenu    | "1 PLAYER GAME", "2 PLAYER GAME", top score    |
//! | LoadScreen  | "WORLD 1-1", Mario icon with remaining lives   |
//! | Level       | the level clock, counting down                 |
//! | GameOver    | nothing (the screen draws its own banner)      |
//! | TimeOut     | "TIME UP"                                      |
//!
//! The HUD mirrors [`GameInfo`] through `update`, so it never holds the game
//! info itself.

use crate::constants::WHITE;
use crate::game::GameInfo;
use crate::sprite::{Gfx, SpriteRegion};
use crate::text::{draw_text, draw_text_centered};
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Milliseconds per tick of the level clock
pub const CLOCK_TICK_MS: u64 = 400;

pub const DEFAULT_LEVEL_TIME: u32 = 401;

const TEXT_SCALE: u32 = 3;
const LABEL_Y: i32 = 30;
const VALUE_Y: i32 = 56;

/// Which screen the HUD is drawn for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoState {
    MainMenu,
    LoadScreen,
    Level,
    GameOver,
    TimeOut,
}

pub struct OverheadInfo {
    state: InfoState,
    score: u32,
    coin_total: u32,
    lives: u32,
    top_score: u32,
    clock: u32,
    last_tick: Option<u64>,
    paused: bool,
    coin_icon: SpriteRegion,
    life_icon: SpriteRegion,
}

impl OverheadInfo {
    pub fn new(game_info: &GameInfo, state: InfoState) -> Self {
        Self::with_level_time(game_info, state, DEFAULT_LEVEL_TIME)
    }

    pub fn with_level_time(game_info: &GameInfo, state: InfoState, level_time: u32) -> Self {
        OverheadInfo {
            state,
            score: game_info.score,
            coin_total: game_info.coin_total,
            lives: game_info.lives,
            top_score: game_info.top_score,
            clock: level_time,
            last_tick: None,
            paused: false,
            coin_icon: SpriteRegion::new("item_objects", 1, 160, 5, 8, 3.0),
            life_icon: SpriteRegion::new("mario_bros", 178, 32, 12, 16, 2.5),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> InfoState {
        self.state
    }

    /// Copies the latest game info and advances the level clock
    pub fn update(&mut self, game_info: &GameInfo, now: u64) {
        self.score = game_info.score;
        self.coin_total = game_info.coin_total;
        self.lives = game_info.lives;
        self.top_score = game_info.top_score.max(game_info.score);

        if self.state == InfoState::Level && !self.paused {
            self.tick_clock(now);
        }
    }

    fn tick_clock(&mut self, now: u64) {
        match self.last_tick {
            None => self.last_tick = Some(now),
            Some(last) if now.saturating_sub(last) >= CLOCK_TICK_MS && self.clock > 0 => {
                self.clock -= 1;
                self.last_tick = Some(now);
            }
            Some(_) => {}
        }
    }

    /// Stops or restarts the level clock; the tick in progress restarts on resume
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused && !paused {
            self.last_tick = None;
        }
        self.paused = paused;
    }

    pub fn clock(&self) -> u32 {
        self.clock
    }

    pub fn time_is_up(&self) -> bool {
        self.state == InfoState::Level && self.clock == 0
    }

    pub fn score_text(&self) -> String {
        format!("{:06}", self.score)
    }

    pub fn coin_text(&self) -> String {
        format!("x{:02}", self.coin_total)
    }

    pub fn clock_text(&self) -> String {
        format!("{:03}", self.clock)
    }

    pub fn lives_text(&self) -> String {
        format!("x  {}", self.lives)
    }

    pub fn top_score_text(&self) -> String {
        format!("TOP - {:06}", self.top_score)
    }

    pub fn draw(&self, canvas: &mut Canvas<Window>, gfx: &Gfx) -> Result<(), String> {
        self.draw_top_bar(canvas, gfx)?;

        match self.state {
            InfoState::MainMenu => {
                draw_text(canvas, "1 PLAYER GAME", 272, 360, WHITE, TEXT_SCALE)?;
                draw_text(canvas, "2 PLAYER GAME", 272, 405, WHITE, TEXT_SCALE)?;
                draw_text(canvas, &self.top_score_text(), 290, 465, WHITE, TEXT_SCALE)?;
            }
            InfoState::LoadScreen => {
                draw_text_centered(canvas, "WORLD 1-1", 400, 180, WHITE, TEXT_SCALE)?;
                self.life_icon.render(canvas, gfx, self.life_icon.dest_at(320, 390))?;
                draw_text(canvas, &self.lives_text(), 380, 400, WHITE, TEXT_SCALE)?;
            }
            InfoState::Level => {
                draw_text(canvas, &self.clock_text(), 645, VALUE_Y, WHITE, TEXT_SCALE)?;
            }
            InfoState::GameOver => {}
            InfoState::TimeOut => {
                draw_text_centered(canvas, "TIME UP", 400, 300, WHITE, TEXT_SCALE)?;
            }
        }

        Ok(())
    }

    fn draw_top_bar(&self, canvas: &mut Canvas<Window>, gfx: &Gfx) -> Result<(), String> {
        draw_text(canvas, "MARIO", 75, LABEL_Y, WHITE, TEXT_SCALE)?;
        draw_text(canvas, "WORLD", 472, LABEL_Y, WHITE, TEXT_SCALE)?;
        draw_text(canvas, "TIME", 625, LABEL_Y, WHITE, TEXT_SCALE)?;

        draw_text(canvas, &self.score_text(), 75, VALUE_Y, WHITE, TEXT_SCALE)?;
        self.coin_icon.render(canvas, gfx, self.coin_icon.dest_at(280, VALUE_Y - 1))?;
        draw_text(canvas, &self.coin_text(), 300, VALUE_Y, WHITE, TEXT_SCALE)?;
        draw_text(canvas, "1-1", 491, VALUE_Y, WHITE, TEXT_SCALE)?;
        Ok(())
    }
}
