//! Screen-Space GUI System
//!
//! UI elements that sit above whatever screen is active, at fixed screen
//! positions. They are stateful (open/closed, what they are showing) and render
//! with SDL2 primitives plus textures from [`crate::sprite::Gfx`].
//!
//! # Available Components
//!
//! - [`popup::PopupImage`] - modal image dialog with a darkened backdrop
//! - [`SlideShow`] - queue of images shown one by one in a popup
//!
//! # Example Usage
//!
//! ```rust
//! use crate::gui::SlideShow;
//!
//! let mut slides = SlideShow::new();
//! slides.start(["slide_1", "slide_2"], current_time);
//!
//! // Handle input
//! if keys.was_pressed(Keycode::X) {
//!     slides.advance(current_time);
//! }
//!
//! // Render
//! slides.draw(&mut canvas, &gfx, current_time)?;
//! ```

pub mod popup;

pub use popup::SlideShow;
