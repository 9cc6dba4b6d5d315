//! Music and sound effects
//!
//! States never touch the mixer. They queue [`SoundCommand`]s on their
//! [`crate::game::StateCore`], the state machine collects them, and the game
//! loop hands them to the [`SoundPlayer`] once per frame.
//!
//! The player is built from [`AudioConfig`]. If the audio device cannot be
//! opened, or a file is missing, a warning is logged and that sound is silent.

use sdl2::mixer::{self, Channel, Chunk, InitFlag, Music, Sdl2MixerContext};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const MIXER_CHUNK_SIZE: i32 = 1024;
const MIXER_CHANNELS: i32 = 8;
const MAX_VOLUME: i32 = 128;

/// Background music, one playing at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    MainTheme,
    GameOver,
}

/// One-shot effects played over the music
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Level clock dropped to the hurry-up mark
    OutOfTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCommand {
    PlayMusic(Track),
    StopMusic,
    PlayEffect(Effect),
}

/// Audio files and volumes, part of [`crate::config::GameConfig`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,

    /// 0-128, SDL_mixer's scale
    pub music_volume: i32,
    pub effect_volume: i32,

    pub main_theme: String,
    pub game_over: String,
    pub out_of_time: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            enabled: true,
            music_volume: 64,
            effect_volume: 96,
            main_theme: "resources/music/main_theme.ogg".to_string(),
            game_over: "resources/music/game_over.ogg".to_string(),
            out_of_time: "resources/sound/out_of_time.wav".to_string(),
        }
    }
}

impl AudioConfig {
    pub fn track_path(&self, track: Track) -> &str {
        match track {
            Track::MainTheme => &self.main_theme,
            Track::GameOver => &self.game_over,
        }
    }

    pub fn effect_path(&self, effect: Effect) -> &str {
        match effect {
            Effect::OutOfTime => &self.out_of_time,
        }
    }
}

/// Which track is on, so repeated requests do not restart the music
#[derive(Debug, Default)]
pub struct MusicState {
    current: Option<Track>,
}

impl MusicState {
    /// Returns the command if it changes what is heard, `None` if it is a no-op
    pub fn filter(&mut self, command: SoundCommand) -> Option<SoundCommand> {
        match command {
            SoundCommand::PlayMusic(track) if self.current == Some(track) => None,
            SoundCommand::PlayMusic(track) => {
                self.current = Some(track);
                Some(command)
            }
            SoundCommand::StopMusic if self.current.is_none() => None,
            SoundCommand::StopMusic => {
                self.current = None;
                Some(command)
            }
            SoundCommand::PlayEffect(_) => Some(command),
        }
    }
}

/// Owns the mixer and every loaded sound
pub struct SoundPlayer {
    opened: bool,
    _context: Option<Sdl2MixerContext>,
    music: HashMap<Track, Music<'static>>,
    effects: HashMap<Effect, Chunk>,
    state: MusicState,
}

impl SoundPlayer {
    /// A player that accepts commands and plays nothing
    pub fn silent() -> Self {
        SoundPlayer {
            opened: false,
            _context: None,
            music: HashMap::new(),
            effects: HashMap::new(),
            state: MusicState::default(),
        }
    }

    /// Opens the audio device and loads every configured file
    ///
    /// Never fails: audio problems only cost the sounds involved.
    pub fn open(config: &AudioConfig) -> Self {
        if !config.enabled {
            log::info!("Audio disabled in config");
            return Self::silent();
        }

        if let Err(e) = mixer::open_audio(
            mixer::DEFAULT_FREQUENCY,
            mixer::DEFAULT_FORMAT,
            mixer::DEFAULT_CHANNELS,
            MIXER_CHUNK_SIZE,
        ) {
            log::warn!("Could not open audio device, running silent: {}", e);
            return Self::silent();
        }

        let context = match mixer::init(InitFlag::OGG) {
            Ok(context) => Some(context),
            Err(e) => {
                log::warn!("OGG support unavailable: {}", e);
                None
            }
        };
        mixer::allocate_channels(MIXER_CHANNELS);
        Music::set_volume(config.music_volume.clamp(0, MAX_VOLUME));

        let mut music = HashMap::new();
        for track in [Track::MainTheme, Track::GameOver] {
            let path = config.track_path(track);
            match Music::from_file(path) {
                Ok(loaded) => {
                    music.insert(track, loaded);
                }
                Err(e) => log::warn!("Skipping music {}: {}", path, e),
            }
        }

        let mut effects = HashMap::new();
        for effect in [Effect::OutOfTime] {
            let path = config.effect_path(effect);
            match Chunk::from_file(path) {
                Ok(mut chunk) => {
                    chunk.set_volume(config.effect_volume.clamp(0, MAX_VOLUME));
                    effects.insert(effect, chunk);
                }
                Err(e) => log::warn!("Skipping sound {}: {}", path, e),
            }
        }

        log::info!("Audio ready: {} tracks, {} effects", music.len(), effects.len());
        SoundPlayer {
            opened: true,
            _context: context,
            music,
            effects,
            state: MusicState::default(),
        }
    }

    pub fn apply(&mut self, commands: impl IntoIterator<Item = SoundCommand>) {
        for command in commands {
            if let Some(command) = self.state.filter(command) {
                log::debug!("Sound: {:?}", command);
                self.output(command);
            }
        }
    }

    fn output(&self, command: SoundCommand) {
        if !self.opened {
            return;
        }
        match command {
            SoundCommand::PlayMusic(track) => {
                if let Some(music) = self.music.get(&track) {
                    if let Err(e) = music.play(-1) {
                        log::warn!("Could not play {:?}: {}", track, e);
                    }
                }
            }
            SoundCommand::StopMusic => Music::halt(),
            SoundCommand::PlayEffect(effect) => {
                if let Some(chunk) = self.effects.get(&effect) {
                    if let Err(e) = Channel::all().play(chunk, 0) {
                        log::warn!("Could not play {:?}: {}", effect, e);
                    }
                }
            }
        }
    }
}

impl Drop for SoundPlayer {
    fn drop(&mut self) {
        if self.opened {
            Music::halt();
            // Sounds must be freed before the device closes
            self.music.clear();
            self.effects.clear();
            mixer::close_audio();
        }
    }
}
