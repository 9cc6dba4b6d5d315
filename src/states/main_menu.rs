//! Main menu
//!
//! Title banner over the level background, with a mushroom cursor choosing
//! between a one- and two-player game. Starting a one-player game resets the
//! game info (keeping the top score) and moves on to the loading screen.

use crate::animation::blink_visible;
use crate::config::MenuText;
use crate::constants::{
    BACKGROUND_MULTIPLIER, GOLD, GROUND_HEIGHT, NEAR_BLACK, SCREEN_HEIGHT, SCREEN_WIDTH,
    SIZE_MULTIPLIER, SKY_BLUE, WHITE,
};
use crate::game::{GameInfo, State, StateCore, StateId, STARTING_LIVES};
use crate::input::KeySet;
use crate::sprite::{Backdrop, Gfx, SpriteRegion};
use crate::text::{draw_text_centered, draw_text_shadowed};
use crate::ui::{InfoState, OverheadInfo};
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

pub const PLAYER1_CURSOR_Y: i32 = 358;
pub const PLAYER2_CURSOR_Y: i32 = 403;
const CURSOR_X: i32 = 220;
const MARIO_X: i32 = 110;

/// Keys that start a one-player game
const START_KEYS: [Keycode; 3] = [Keycode::Return, Keycode::A, Keycode::S];

const BLINK_PERIOD_MS: u64 = 400;

const BANNER_FILL: Color = Color::RGB(10, 10, 40);
const BANNER_BORDER: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Player1,
    Player2,
}

#[derive(Debug, Clone)]
pub struct Cursor {
    pub state: CursorState,
    pub rect: Rect,
    sprite: SpriteRegion,
}

impl Cursor {
    fn new() -> Self {
        let sprite = SpriteRegion::new("item_objects", 24, 160, 8, 8, 3.0);
        Cursor {
            state: CursorState::Player1,
            rect: sprite.dest_at(CURSOR_X, PLAYER1_CURSOR_Y),
            sprite,
        }
    }
}

pub struct MainMenu {
    core: StateCore,
    text: MenuText,
    starting_lives: u32,
    cursor: Cursor,
    mario: SpriteRegion,
    mario_rect: Rect,
    background: Backdrop,
    banner_rect: Rect,
    overhead_info: OverheadInfo,
}

impl MainMenu {
    pub fn new(text: MenuText, starting_lives: u32) -> Self {
        let mario = SpriteRegion::new("mario_bros", 178, 32, 12, 16, SIZE_MULTIPLIER);
        let mario_rect = Self::mario_rect_for(&mario);

        MainMenu {
            core: StateCore::new(StateId::LoadScreen),
            text,
            starting_lives,
            cursor: Cursor::new(),
            mario,
            mario_rect,
            background: Backdrop::new("level_1", BACKGROUND_MULTIPLIER),
            banner_rect: Rect::new(40, 90, 720, 210),
            overhead_info: OverheadInfo::new(&GameInfo::default(), InfoState::MainMenu),
        }
    }

    /// Mario stands at a fixed x with his feet on the ground
    fn mario_rect_for(mario: &SpriteRegion) -> Rect {
        let mut rect = mario.dest_at(MARIO_X, 0);
        rect.set_bottom(GROUND_HEIGHT);
        rect
    }

    #[cfg(test)]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[cfg(test)]
    pub fn mario_rect(&self) -> Rect {
        self.mario_rect
    }

    #[cfg(test)]
    pub fn game_info(&self) -> &GameInfo {
        &self.core.game_info
    }

    fn update_cursor(&mut self, keys: &KeySet) {
        match self.cursor.state {
            CursorState::Player1 => {
                self.cursor.rect.set_y(PLAYER1_CURSOR_Y);
                if keys.is_held(Keycode::Down) {
                    self.cursor.state = CursorState::Player2;
                }
                if keys.any_held(&START_KEYS) {
                    self.core.game_info.reset_with_lives(self.starting_lives);
                    self.core.done = true;
                }
            }
            CursorState::Player2 => {
                self.cursor.rect.set_y(PLAYER2_CURSOR_Y);
                if keys.is_held(Keycode::Up) {
                    self.cursor.state = CursorState::Player1;
                }
            }
        }
    }

    fn draw_banner(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let banner = self.banner_rect;

        canvas.set_draw_color(BANNER_FILL);
        canvas.fill_rect(banner)?;

        canvas.set_draw_color(WHITE);
        for inset in 0..BANNER_BORDER {
            canvas.draw_rect(Rect::new(
                banner.x() + inset as i32,
                banner.y() + inset as i32,
                banner.width() - inset * 2,
                banner.height() - inset * 2,
            ))?;
        }

        let center_x = banner.center().x();

        let title = draw_text_shadowed(
            canvas,
            &self.text.title,
            center_x,
            banner.y() + 30,
            GOLD,
            NEAR_BLACK,
            4,
            6,
        )?;
        let subtitle = draw_text_centered(canvas, &self.text.subtitle, center_x, title.bottom() + 10, SKY_BLUE, 3)?;
        let detail = draw_text_centered(canvas, &self.text.detail, center_x, subtitle.bottom() + 15, WHITE, 2)?;
        draw_text_centered(canvas, &self.text.separator, center_x, detail.bottom() + 5, WHITE, 2)?;

        if blink_visible(self.core.current_time, BLINK_PERIOD_MS) {
            draw_text_centered(canvas, &self.text.start_prompt, center_x, banner.bottom() - 30, GOLD, 2)?;
        }

        Ok(())
    }
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new(MenuText::default(), STARTING_LIVES)
    }
}

impl State for MainMenu {
    fn core(&self) -> &StateCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore {
        &mut self.core
    }

    fn startup(&mut self, current_time: u64, persist: GameInfo) {
        self.overhead_info = OverheadInfo::new(&persist, InfoState::MainMenu);
        self.core.begin(current_time, persist);
        self.core.next = StateId::LoadScreen;
        self.cursor = Cursor::new();
        self.mario_rect = Self::mario_rect_for(&self.mario);
    }

    fn update(&mut self, keys: &KeySet, current_time: u64) {
        self.core.current_time = current_time;
        self.core.game_info.current_time = current_time;
        self.update_cursor(keys);
        self.overhead_info.update(&self.core.game_info, current_time);
    }

    fn draw(&self, canvas: &mut Canvas<Window>, gfx: &Gfx) -> Result<(), String> {
        // Viewport anchored to the bottom of the scaled background
        let viewport = Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT);
        self.background.render(canvas, gfx, viewport, viewport)?;

        self.draw_banner(canvas)?;

        self.mario.render(canvas, gfx, self.mario_rect)?;
        self.cursor.sprite.render(canvas, gfx, self.cursor.rect)?;
        self.overhead_info.draw(canvas, gfx)
    }
}
