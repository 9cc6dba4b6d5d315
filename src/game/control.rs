// Main game loop
//
// Control owns the state machine and runs the fixed-rate loop:
// poll input -> update active state -> play queued sounds -> draw -> present -> sleep.
// The game clock handed to states is milliseconds since the loop started.

use crate::constants::BLACK;
use crate::input::{InputSystem, SystemAction};
use crate::sound::SoundPlayer;
use crate::sprite::Gfx;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;
use std::time::{Duration, Instant};

use super::StateMachine;

const FPS_SAMPLE_COUNT: usize = 30;

/// Rolling average of frame times for the title-bar readout
pub struct FrameTimer {
    samples: [f64; FPS_SAMPLE_COUNT],
    index: usize,
}

impl FrameTimer {
    pub fn new(target_fps: u32) -> Self {
        FrameTimer {
            samples: [1.0 / target_fps.max(1) as f64; FPS_SAMPLE_COUNT],
            index: 0,
        }
    }

    pub fn record(&mut self, frame_seconds: f64) {
        self.samples[self.index] = frame_seconds;
        self.index = (self.index + 1) % FPS_SAMPLE_COUNT;
    }

    pub fn fps(&self) -> f64 {
        let average = self.samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        if average > 0.0 { 1.0 / average } else { 0.0 }
    }
}

pub struct Control {
    machine: StateMachine,
    input: InputSystem,
    sound: SoundPlayer,
    caption: String,
    frame_duration: Duration,
    show_fps: bool,
    timer: FrameTimer,
}

impl Control {
    pub fn new(machine: StateMachine, sound: SoundPlayer, caption: &str, fps: u32) -> Self {
        let fps = fps.max(1);
        Control {
            machine,
            input: InputSystem::new(),
            sound,
            caption: caption.to_string(),
            frame_duration: Duration::from_nanos(1_000_000_000 / fps as u64),
            show_fps: false,
            timer: FrameTimer::new(fps),
        }
    }

    /// Runs until the window is closed
    pub fn run(
        &mut self,
        canvas: &mut Canvas<Window>,
        event_pump: &mut EventPump,
        gfx: &Gfx,
    ) -> Result<(), String> {
        let clock_start = Instant::now();
        let mut last_frame = clock_start;

        'running: loop {
            let (keys, actions) = self.input.poll(event_pump);
            for action in actions {
                match action {
                    SystemAction::Quit => break 'running,
                    SystemAction::ToggleFpsDisplay => {
                        self.show_fps = !self.show_fps;
                        log::debug!("FPS display: {}", if self.show_fps { "ON" } else { "OFF" });
                        if !self.show_fps {
                            set_title(canvas, &self.caption)?;
                        }
                    }
                }
            }

            let now = clock_start.elapsed().as_millis() as u64;
            self.machine.update(&keys, now)?;
            self.sound.apply(self.machine.drain_sounds()?);

            canvas.set_draw_color(BLACK);
            canvas.clear();
            self.machine.draw(canvas, gfx)?;
            canvas.present();

            if self.show_fps {
                let title = format!("{} - {:.2} FPS", self.caption, self.timer.fps());
                set_title(canvas, &title)?;
            }

            let spent = last_frame.elapsed();
            if spent < self.frame_duration {
                std::thread::sleep(self.frame_duration - spent);
            }
            self.timer.record(last_frame.elapsed().as_secs_f64());
            last_frame = Instant::now();
        }

        log::info!("Window closed, exiting");
        Ok(())
    }
}

fn set_title(canvas: &mut Canvas<Window>, title: &str) -> Result<(), String> {
    canvas
        .window_mut()
        .set_title(title)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_timer_starts_at_target() {
        let timer = FrameTimer::new(60);
        assert!((timer.fps() - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_frame_timer_tracks_slow_frames() {
        let mut timer = FrameTimer::new(60);
        for _ in 0..FPS_SAMPLE_COUNT {
            timer.record(0.05);
        }
        assert!((timer.fps() - 20.0).abs() < 0.01);
    }
}
