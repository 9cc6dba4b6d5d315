//! Progress bar component
//!
//! A horizontal bar that fills left to right, drawn with SDL2 rectangles.
//! The loading screen uses it to show how far along the wait is.
//!
//! # Example
//!
//! ```rust
//! use crate::ui::ProgressBar;
//!
//! let bar = ProgressBar::new();
//! bar.render(&mut canvas, 300, 320, elapsed as f32 / 2400.0)?;
//! ```

use crate::constants::{SKY_BLUE, WHITE};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Configuration for progress bar appearance
#[derive(Debug, Clone)]
pub struct ProgressBarStyle {
    /// Full bar width in pixels
    pub width: u32,

    /// Bar height in pixels
    pub height: u32,

    /// Colour of the unfilled part (None leaves it transparent)
    pub background_color: Option<Color>,

    pub fill_color: Color,

    pub border_color: Color,

    /// Border thickness in pixels (0 = no border), drawn inward
    pub border_thickness: u32,
}

impl Default for ProgressBarStyle {
    fn default() -> Self {
        ProgressBarStyle {
            width: 200,
            height: 20,
            background_color: None,
            fill_color: SKY_BLUE,
            border_color: WHITE,
            border_thickness: 2,
        }
    }
}

pub struct ProgressBar {
    style: ProgressBarStyle,
}

impl ProgressBar {
    pub fn new() -> Self {
        ProgressBar {
            style: ProgressBarStyle::default(),
        }
    }

    #[cfg(test)]
    pub fn with_style(style: ProgressBarStyle) -> Self {
        ProgressBar { style }
    }

    #[cfg(test)]
    pub fn style(&self) -> &ProgressBarStyle {
        &self.style
    }

    /// Filled width in pixels for a 0.0-1.0 fraction (clamped)
    pub fn fill_width(&self, fraction: f32) -> u32 {
        (self.style.width as f32 * fraction.clamp(0.0, 1.0)) as u32
    }

    /// Renders the bar with its top-left corner at `(x, y)`
    pub fn render(&self, canvas: &mut Canvas<Window>, x: i32, y: i32, fraction: f32) -> Result<(), String> {
        let outline = Rect::new(x, y, self.style.width, self.style.height);

        if let Some(background) = self.style.background_color {
            canvas.set_draw_color(background);
            canvas.fill_rect(outline)?;
        }

        let fill = self.fill_width(fraction);
        if fill > 0 {
            canvas.set_draw_color(self.style.fill_color);
            canvas.fill_rect(Rect::new(x, y, fill, self.style.height))?;
        }

        canvas.set_draw_color(self.style.border_color);
        for inset in 0..self.style.border_thickness {
            let width = self.style.width.saturating_sub(inset * 2);
            let height = self.style.height.saturating_sub(inset * 2);
            if width == 0 || height == 0 {
                break;
            }
            canvas.draw_rect(Rect::new(x + inset as i32, y + inset as i32, width, height))?;
        }

        Ok(())
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}
