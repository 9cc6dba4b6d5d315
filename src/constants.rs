//! Screen geometry, scale factors and the shared palette.

use sdl2::pixels::Color;

pub const SCREEN_WIDTH: u32 = 800;
pub const SCREEN_HEIGHT: u32 = 600;

/// Y coordinate of the top of the ground in screen space
pub const GROUND_HEIGHT: i32 = SCREEN_HEIGHT as i32 - 62;

/// Scale applied to character sprites cut from the sheets
pub const SIZE_MULTIPLIER: f32 = 2.5;

/// Scale applied to the level background image
pub const BACKGROUND_MULTIPLIER: f32 = 2.679;

pub const BLACK: Color = Color::RGB(0, 0, 0);
pub const WHITE: Color = Color::RGB(255, 255, 255);
pub const GOLD: Color = Color::RGB(255, 215, 0);
pub const SKY_BLUE: Color = Color::RGB(39, 145, 251);
pub const RED: Color = Color::RGB(255, 0, 0);
pub const NEAR_BLACK: Color = Color::RGB(19, 15, 48);

/// Colour briefly flashed at the end of a loading screen, before the level appears
pub const LEVEL_FLASH: Color = Color::RGB(106, 150, 252);

/// Transparent colour used by the title and character sheets
pub const SHEET_COLORKEY: Color = Color::RGB(255, 0, 220);
