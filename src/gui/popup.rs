//! Image Popup Component
//!
//! Shows a full-size image (a slide) over the current screen: the screen is
//! darkened, the image slides down into the centre, and a hint tells the player
//! which key dismisses it. [`SlideShow`] queues several images and shows them one
//! after another in the same popup.

use crate::animation::Slide;
use crate::constants::WHITE;
use crate::sprite::Gfx;
use crate::text::draw_text_centered;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;
use std::collections::VecDeque;

/// Configuration for popup appearance
#[derive(Debug, Clone)]
pub struct PopupStyle {
    /// Image is scaled to exactly this size
    pub width: u32,
    pub height: u32,

    /// Overlay darkness (0-255, higher = darker)
    pub overlay_alpha: u8,

    pub hint_text: String,
    pub hint_color: Color,
    pub hint_scale: u32,

    /// Distance from the bottom of the screen to the hint's centre line
    pub hint_margin: i32,

    /// Slide-in duration in milliseconds (0 = appear in place)
    pub slide_duration: u64,
}

impl Default for PopupStyle {
    fn default() -> Self {
        PopupStyle {
            width: 800,
            height: 500,
            overlay_alpha: 180,
            hint_text: "PRESS X TO CONTINUE".to_string(),
            hint_color: WHITE,
            hint_scale: 3,
            hint_margin: 60,
            slide_duration: 350,
        }
    }
}

/// A modal image dialog
///
/// # Example
///
/// ```rust
/// let mut popup = PopupImage::new();
/// popup.show("slide_1", current_time);
///
/// // In the draw pass
/// popup.draw(&mut canvas, &gfx, current_time)?;
///
/// if keys.was_pressed(Keycode::X) {
///     popup.hide();
/// }
/// ```
pub struct PopupImage {
    active: bool,
    image: Option<String>,
    slide: Slide,
    style: PopupStyle,
}

impl PopupImage {
    pub fn new() -> Self {
        Self::with_style(PopupStyle::default())
    }

    pub fn with_style(style: PopupStyle) -> Self {
        PopupImage {
            active: false,
            image: None,
            slide: Slide::new(0, 0, 0, 0),
            style,
        }
    }

    /// Opens the popup with the texture stored under `image`
    pub fn show(&mut self, image: &str, now: u64) {
        log::info!("Showing slide: {}", image);
        self.image = Some(image.to_string());
        self.active = true;
        self.slide = Slide::new(-(self.style.height as i32), 0, now, self.style.slide_duration);
    }

    pub fn hide(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    #[cfg(test)]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    #[cfg(test)]
    pub fn style(&self) -> &PopupStyle {
        &self.style
    }

    /// Where the image is drawn at `now` on a screen of the given size
    pub fn image_rect(&self, screen_width: u32, screen_height: u32, now: u64) -> Rect {
        let x = (screen_width as i32 - self.style.width as i32) / 2;
        let y = (screen_height as i32 - self.style.height as i32) / 2 + self.slide.position(now);
        Rect::new(x, y, self.style.width, self.style.height)
    }

    pub fn draw(&self, canvas: &mut Canvas<Window>, gfx: &Gfx, now: u64) -> Result<(), String> {
        if !self.active {
            return Ok(());
        }
        let Some(image) = self.image.as_deref() else {
            return Ok(());
        };
        let texture = gfx.get(image)?;

        let (screen_width, screen_height) = canvas.logical_size();

        canvas.set_blend_mode(BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, self.style.overlay_alpha));
        canvas.fill_rect(None)?;
        canvas.set_blend_mode(BlendMode::None);

        canvas.copy(texture, None, Some(self.image_rect(screen_width, screen_height, now)))?;

        draw_text_centered(
            canvas,
            &self.style.hint_text,
            screen_width as i32 / 2,
            screen_height as i32 - self.style.hint_margin,
            self.style.hint_color,
            self.style.hint_scale,
        )?;

        Ok(())
    }
}

impl Default for PopupImage {
    fn default() -> Self {
        Self::new()
    }
}

/// A queue of images shown one at a time in a [`PopupImage`]
pub struct SlideShow {
    popup: PopupImage,
    queue: VecDeque<String>,
}

impl SlideShow {
    pub fn new() -> Self {
        SlideShow {
            popup: PopupImage::new(),
            queue: VecDeque::new(),
        }
    }

    /// Replaces the queue and shows the first image, if any
    pub fn start<I, S>(&mut self, images: I, now: u64)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queue = images.into_iter().map(Into::into).collect();
        self.popup.hide();
        self.advance(now);
    }

    /// Shows the next queued image, or closes the popup when none are left.
    /// Returns whether an image is showing afterwards.
    pub fn advance(&mut self, now: u64) -> bool {
        match self.queue.pop_front() {
            Some(image) => {
                self.popup.show(&image, now);
                true
            }
            None => {
                self.popup.hide();
                false
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.popup.is_active()
    }

    #[cfg(test)]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    #[cfg(test)]
    pub fn popup(&self) -> &PopupImage {
        &self.popup
    }

    pub fn draw(&self, canvas: &mut Canvas<Window>, gfx: &Gfx, now: u64) -> Result<(), String> {
        self.popup.draw(canvas, gfx, now)
    }
}

impl Default for SlideShow {
    fn default() -> Self {
        Self::new()
    }
}
