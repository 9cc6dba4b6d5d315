//! HUD Components
//!
//! Stateless or near-stateless drawing components shared by several screens.
//! They render with SDL2 primitives and the bitmap font, at fixed screen
//! coordinates on the 800x600 logical canvas.
//!
//! # Available Components
//!
//! - [`OverheadInfo`] - score / coins / world / time strip and per-screen extras
//! - [`ProgressBar`] - horizontal fill bar used by the loading screen
//!
//! # Example Usage
//!
//! ```rust
//! use crate::ui::{InfoState, OverheadInfo};
//!
//! let mut hud = OverheadInfo::new(&game_info, InfoState::LoadScreen);
//!
//! // Each frame
//! hud.update(&game_info, current_time);
//! hud.draw(&mut canvas, &gfx)?;
//! ```

pub mod overhead_info;
pub mod progress_bar;

pub use overhead_info::{InfoState, OverheadInfo};
pub use progress_bar::ProgressBar;
