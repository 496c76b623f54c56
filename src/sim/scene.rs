//! The scene: bird + pipe field + background
//!
//! Owns one tick of simulation (`update`), one frame (`paint`), restart and
//! input dispatch. The timing around them lives in `crate::runner`.

use std::sync::Arc;

use super::bird::Bird;
use super::pipes::PipeField;
use crate::error::Result;
use crate::platform::{Canvas, Event, TextureId, TextureProvider};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ticking and accepting jumps
    Running,
    /// Bird died; banners are up and the simulation is suspended
    GameOverDisplay,
    /// Loop has ended
    Stopped,
}

#[derive(Debug)]
pub struct Scene {
    /// Frames painted since creation (never reset)
    time: u64,
    background: TextureId,
    bird: Arc<Bird>,
    pipes: PipeField,
    phase: GamePhase,
    tuning: Tuning,
}

impl Scene {
    /// Validate `tuning` and load every texture the scene needs.
    ///
    /// On failure, whatever was already loaded is released before returning.
    pub fn new(provider: &mut impl TextureProvider, tuning: &Tuning, seed: u64) -> Result<Self> {
        tuning.validate()?;
        let background = provider.load("background")?;
        let bird = match Bird::load(provider, tuning) {
            Ok(bird) => bird,
            Err(e) => {
                provider.release(background);
                return Err(e);
            }
        };
        let pipes = match PipeField::load(provider, tuning, seed) {
            Ok(pipes) => pipes,
            Err(e) => {
                provider.release(background);
                bird.destroy(provider);
                return Err(e);
            }
        };

        log::info!("Scene created with seed {seed}");
        Ok(Self::from_parts(background, bird, pipes, tuning))
    }

    pub fn from_parts(background: TextureId, bird: Bird, pipes: PipeField, tuning: &Tuning) -> Self {
        Self {
            time: 0,
            background,
            bird: Arc::new(bird),
            pipes,
            phase: GamePhase::Running,
            tuning: tuning.clone(),
        }
    }

    /// One simulation tick
    pub fn update(&mut self) {
        self.bird.update();
        self.pipes.update();
        self.pipes.touch(&self.bird);
    }

    /// Draw background, bird and pipes, then present
    pub fn paint(&mut self, canvas: &mut impl Canvas) -> Result<()> {
        self.time += 1;
        canvas.clear()?;
        canvas.copy(self.background, None)?;
        self.bird.paint(canvas)?;
        self.pipes.paint(canvas)?;
        canvas.present()
    }

    /// Fresh round: bird back at spawn, pipes re-laid, score zeroed
    pub fn restart(&mut self) {
        log::info!("Restarting");
        self.bird.restart();
        self.pipes.restart();
        self.phase = GamePhase::Running;
    }

    /// Dispatch one platform event. Returns `true` when the loop should stop.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Quit => {
                self.phase = GamePhase::Stopped;
                true
            }
            Event::Press => {
                if self.phase == GamePhase::Running {
                    self.bird.jump();
                }
                false
            }
            // Keyboard has no binding yet
            Event::Key(_) => false,
            Event::Release | Event::Motion { .. } | Event::Window => false,
            Event::Other => {
                log::warn!("Unhandled event {event:?}");
                false
            }
        }
    }

    /// Shared handle for inspecting the bird from outside the loop
    pub fn bird(&self) -> Arc<Bird> {
        Arc::clone(&self.bird)
    }

    pub fn pipes(&self) -> &PipeField {
        &self.pipes
    }

    pub fn score(&self) -> u32 {
        self.pipes.score()
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Release every texture the scene holds.
    ///
    /// Bird handles still held elsewhere keep the state readable, but its
    /// frames are released here all the same.
    pub fn destroy(self, provider: &mut impl TextureProvider) {
        provider.release(self.background);
        self.pipes.destroy(provider);
        match Arc::try_unwrap(self.bird) {
            Ok(bird) => bird.destroy(provider),
            Err(shared) => {
                log::warn!("Bird still shared at teardown");
                for texture in shared.frames() {
                    provider.release(texture);
                }
            }
        }
    }
}
