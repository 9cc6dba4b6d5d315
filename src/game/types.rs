// Shared enums and the game info carried between states

use std::fmt;

/// Identifies each screen the state machine can switch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    MainMenu,
    LoadScreen,
    TimeOut,
    GameOver,
    Level1,
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            StateId::MainMenu => "main menu",
            StateId::LoadScreen => "load screen",
            StateId::TimeOut => "time out",
            StateId::GameOver => "game over",
            StateId::Level1 => "level 1",
        };
        write!(f, "{}", name)
    }
}

/// What the level was doing when it handed control back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    Playing,
    TimeUp,
}

pub const STARTING_LIVES: u32 = 3;

/// Progress shared by every screen
///
/// Each state receives this in `startup` and hands it back in `cleanup`, so
/// score, lives and the top score survive screen changes.
#[derive(Debug, Clone, PartialEq)]
pub struct GameInfo {
    pub coin_total: u32,
    pub score: u32,
    pub lives: u32,
    pub top_score: u32,
    /// Game clock in milliseconds at the last menu update
    pub current_time: u64,
    pub level_state: Option<LevelState>,
    pub camera_start_x: i32,
    pub mario_dead: bool,
}

impl Default for GameInfo {
    fn default() -> Self {
        GameInfo {
            coin_total: 0,
            score: 0,
            lives: STARTING_LIVES,
            top_score: 0,
            current_time: 0,
            level_state: None,
            camera_start_x: 0,
            mario_dead: false,
        }
    }
}

impl GameInfo {
    /// Starts a fresh run after a game over; the top score is kept
    pub fn reset(&mut self) {
        self.coin_total = 0;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.current_time = 0;
        self.level_state = None;
    }

    /// `reset` with a configured number of lives
    pub fn reset_with_lives(&mut self, lives: u32) {
        self.reset();
        self.lives = lives;
    }

    pub fn record_top_score(&mut self) {
        if self.score > self.top_score {
            self.top_score = self.score;
        }
    }

    /// Takes one life; returns true when that was the last one
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_game_info() {
        let info = GameInfo::default();
        assert_eq!(info.lives, 3);
        assert_eq!(info.score, 0);
        assert_eq!(info.level_state, None);
        assert!(!info.mario_dead);
    }

    #[test]
    fn test_reset_keeps_top_score_and_camera() {
        let mut info = GameInfo {
            coin_total: 12,
            score: 4500,
            lives: 0,
            top_score: 9000,
            current_time: 123_456,
            level_state: Some(LevelState::TimeUp),
            camera_start_x: 640,
            mario_dead: true,
        };
        info.reset();

        assert_eq!(info.coin_total, 0);
        assert_eq!(info.score, 0);
        assert_eq!(info.lives, 3);
        assert_eq!(info.current_time, 0);
        assert_eq!(info.level_state, None);
        assert_eq!(info.top_score, 9000);
        assert_eq!(info.camera_start_x, 640);
    }

    #[test]
    fn test_reset_with_lives_matches_reset() {
        let mut plain = GameInfo { score: 800, top_score: 900, ..GameInfo::default() };
        let mut custom = plain.clone();
        plain.reset();
        custom.reset_with_lives(5);

        assert_eq!(custom.lives, 5);
        assert_eq!(custom.score, plain.score);
        assert_eq!(custom.top_score, plain.top_score);
    }

    #[test]
    fn test_record_top_score() {
        let mut info = GameInfo::default();
        info.score = 300;
        info.record_top_score();
        assert_eq!(info.top_score, 300);

        info.score = 100;
        info.record_top_score();
        assert_eq!(info.top_score, 300);
    }

    #[test]
    fn test_lose_life() {
        let mut info = GameInfo::default();
        assert!(!info.lose_life());
        assert!(!info.lose_life());
        assert!(info.lose_life());
        assert_eq!(info.lives, 0);
        // Never underflows
        assert!(info.lose_life());
        assert_eq!(info.lives, 0);
    }
}
