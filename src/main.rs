use sdl2::image::InitFlag;

mod animation;
mod config;
mod constants;
mod error;
mod game;
mod gui;
mod input;
mod sound;
mod sprite;
mod states;
mod text;
mod ui;

use config::GameConfig;
use constants::{BACKGROUND_MULTIPLIER, SCREEN_HEIGHT, SCREEN_WIDTH, SHEET_COLORKEY};
use game::{Control, GameInfo, StateId, StateMachine};
use sound::SoundPlayer;
use sprite::{Backdrop, Gfx};
use states::{Level, LoadScreen, LoadScreenKind, MainMenu};

/// Loads the configured slides, skipping any that fail, and returns their texture keys
fn load_slides<'a>(
    gfx: &mut Gfx<'a>,
    texture_creator: &'a sdl2::render::TextureCreator<sdl2::video::WindowContext>,
    paths: &[String],
) -> Vec<String> {
    let mut keys = Vec::new();
    for path in paths {
        match gfx.load_slide(texture_creator, path) {
            Ok(key) => keys.push(key),
            Err(e) => log::warn!("Skipping slide {}: {}", path, e),
        }
    }
    keys
}

fn build_state_machine(config: &GameConfig, level_width: u32, slides: Vec<String>) -> Result<StateMachine, String> {
    let mut machine = StateMachine::new();
    machine.register(
        StateId::MainMenu,
        Box::new(MainMenu::new(config.menu.clone(), config.starting_lives)),
    );
    machine.register(StateId::LoadScreen, Box::new(LoadScreen::new(LoadScreenKind::Standard)));
    machine.register(StateId::TimeOut, Box::new(LoadScreen::new(LoadScreenKind::TimeOut)));
    machine.register(StateId::GameOver, Box::new(LoadScreen::new(LoadScreenKind::GameOver)));
    machine.register(
        StateId::Level1,
        Box::new(Level::new(config.level_time, level_width, slides)),
    );

    let mut persist = GameInfo::default();
    persist.reset_with_lives(config.starting_lives);
    machine.setup(StateId::MainMenu, 0, persist)?;
    Ok(machine)
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::discover()?;

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(InitFlag::PNG | InitFlag::JPG)?;
    let audio_subsystem = match sdl_context.audio() {
        Ok(audio) => Some(audio),
        Err(e) => {
            log::warn!("No audio subsystem: {}", e);
            None
        }
    };

    let scale = config.window_scale.max(1);
    let window_width = SCREEN_WIDTH * scale;
    let window_height = SCREEN_HEIGHT * scale;
    log::info!("Window scale: {}x (window: {}x{})", scale, window_width, window_height);

    let window = video_subsystem
        .window(&config.window_title, window_width, window_height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

    // Logical size keeps every screen in 800x600 coordinates whatever the window scale
    canvas
        .set_logical_size(SCREEN_WIDTH, SCREEN_HEIGHT)
        .map_err(|e| e.to_string())?;

    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump()?;

    let mut gfx = Gfx::new();
    gfx.load_dir(
        &texture_creator,
        &config.graphics_dir,
        SHEET_COLORKEY,
        &config.colorkey_overrides,
    )?;
    let slides = load_slides(&mut gfx, &texture_creator, &config.slides);

    let level_width = Backdrop::new("level_1", BACKGROUND_MULTIPLIER).scaled_width(&gfx)?;

    let machine = build_state_machine(&config, level_width, slides)?;
    let sound = if audio_subsystem.is_some() {
        SoundPlayer::open(&config.audio)
    } else {
        SoundPlayer::silent()
    };
    let mut control = Control::new(machine, sound, &config.window_title, config.fps);

    log::info!("Controls: arrows move, A / S / Enter start, X closes slides, F5 toggles FPS");
    control.run(&mut canvas, &mut event_pump, &gfx)
}
