//! The pipe field: a fixed set of pipes scrolled, recycled and scored
//!
//! Pipes are never added or removed after construction. A pipe that leaves
//! the screen on the left is moved back behind the rightmost one with a new
//! shape. The field also owns the score.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bird::Bird;
use super::pipe::{Orientation, Pipe};
use crate::error::Result;
use crate::platform::{Canvas, TextureId, TextureProvider};
use crate::tuning::Tuning;

#[derive(Debug)]
pub struct PipeField {
    texture: TextureId,
    /// Insertion order is spawn order; recycling never reorders
    pipes: Vec<Pipe>,
    rng: Pcg32,
    /// Pipes the bird has cleared since the last restart
    passed: u32,
    /// Pipes that cleared the bird and left the screen within one scroll,
    /// credited by the next `touch` if the bird survives it
    pending: u32,
    tuning: Tuning,
}

impl PipeField {
    pub fn new(texture: TextureId, tuning: &Tuning, seed: u64) -> Self {
        let mut field = Self {
            texture,
            pipes: Vec::with_capacity(tuning.pipe_count),
            rng: Pcg32::seed_from_u64(seed),
            passed: 0,
            pending: 0,
            tuning: tuning.clone(),
        };
        field.layout();
        field
    }

    /// Validate `tuning`, load the `pipe` texture and build the field
    pub fn load(provider: &mut impl TextureProvider, tuning: &Tuning, seed: u64) -> Result<Self> {
        tuning.validate()?;
        let texture = provider.load("pipe")?;
        Ok(Self::new(texture, tuning, seed))
    }

    /// Spawn layout: evenly spaced from `pipe_first_x`, fresh shapes
    fn layout(&mut self) {
        self.pipes.clear();
        for i in 0..self.tuning.pipe_count {
            let x = self.tuning.pipe_first_x + i as i32 * self.tuning.pipe_spacing;
            let pipe = Pipe::random(&mut self.rng, x, &self.tuning);
            self.pipes.push(pipe);
        }
    }

    /// Scroll every pipe left and recycle the ones that left the screen
    pub fn update(&mut self) {
        for pipe in &mut self.pipes {
            pipe.x -= self.tuning.pipe_speed;
        }
        for i in 0..self.pipes.len() {
            if self.pipes[i].is_offscreen() {
                self.recycle(i);
            }
        }
    }

    fn recycle(&mut self, index: usize) {
        let rightmost = self
            .pipes
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, p)| p.x)
            .max();
        let x = match rightmost {
            Some(x) => (x + self.tuning.pipe_spacing).max(self.tuning.playfield_width),
            None => self.tuning.playfield_width,
        };

        let pipe = &mut self.pipes[index];
        if !pipe.passed && pipe.right() < self.tuning.bird_x {
            self.pending += 1;
        }
        pipe.x = x;
        pipe.passed = false;
        pipe.reroll(&mut self.rng, &self.tuning);
        log::trace!("Recycled pipe {index} to x={x}");
    }

    /// Collide the bird against every pipe, then credit cleared pipes
    pub fn touch(&mut self, bird: &Bird) {
        for pipe in &self.pipes {
            bird.touch(pipe);
        }

        let pending = std::mem::take(&mut self.pending);
        if bird.is_dead() {
            return;
        }
        self.passed += pending;
        for pipe in &mut self.pipes {
            if !pipe.passed && pipe.right() < bird.x() {
                pipe.passed = true;
                self.passed += 1;
            }
        }
    }

    /// Reset the score and put every pipe back at its spawn slot
    pub fn restart(&mut self) {
        self.passed = 0;
        self.pending = 0;
        self.layout();
    }

    /// Pipes cleared since the last restart
    pub fn score(&self) -> u32 {
        self.passed
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn paint(&self, canvas: &mut impl Canvas) -> Result<()> {
        let height = self.tuning.playfield_height;
        for pipe in &self.pipes {
            let rect = pipe.solid_rect(height);
            match pipe.orientation {
                Orientation::GapAtTop => canvas.copy(self.texture, Some(rect))?,
                Orientation::GapAtBottom => canvas.copy_flipped(self.texture, rect)?,
            }
        }
        Ok(())
    }

    pub fn destroy(self, provider: &mut impl TextureProvider) {
        provider.release(self.texture);
    }
}
