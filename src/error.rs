use std::fmt;

/// Errors raised while setting up or running the game
#[derive(Debug)]
pub enum GameError {
    /// SDL2 reported a failure (SDL hands these back as plain strings)
    Sdl(String),

    /// Reading a config file or an asset directory failed
    Io(std::io::Error),

    /// Config file is not valid JSON for [`crate::config::GameConfig`]
    Config(serde_json::Error),

    /// A sprite sheet or slide was requested but never loaded
    MissingTexture(String),

    /// The state machine was asked to switch to a state it does not own
    UnknownState(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::Sdl(msg) => write!(f, "SDL error: {}", msg),
            GameError::Io(e) => write!(f, "IO error: {}", e),
            GameError::Config(e) => write!(f, "Config error: {}", e),
            GameError::MissingTexture(name) => write!(f, "Texture not loaded: {}", name),
            GameError::UnknownState(name) => write!(f, "No state registered for {}", name),
        }
    }
}

impl std::error::Error for GameError {}

impl From<String> for GameError {
    fn from(msg: String) -> Self {
        GameError::Sdl(msg)
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::Io(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Config(err)
    }
}

impl From<GameError> for String {
    fn from(error: GameError) -> Self {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_texture_message() {
        let err = GameError::MissingTexture("item_objects".to_string());
        assert_eq!(err.to_string(), "Texture not loaded: item_objects");
    }

    #[test]
    fn test_converts_into_string() {
        let msg: String = GameError::Sdl("no video device".to_string()).into();
        assert_eq!(msg, "SDL error: no video device");
    }
}
