//! Game screens
//!
//! Each screen implements [`crate::game::State`] and is registered with the
//! state machine under a [`crate::game::StateId`]:
//!
//! - [`MainMenu`] - title banner and player-count cursor
//! - [`LoadScreen`] - timed interstitials (loading, time up, game over)
//! - [`Level`] - world 1-1 with the slide popup and the level clock

pub mod level;
pub mod load_screen;
pub mod main_menu;

pub use level::Level;
pub use load_screen::{LoadScreen, LoadScreenKind};
pub use main_menu::MainMenu;
