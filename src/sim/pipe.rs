//! A single pipe: a solid segment anchored to the floor or the ceiling

use rand::Rng;

use crate::platform::Rect;
use crate::tuning::Tuning;

/// Which side of the pipe is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Solid segment rises from the floor; the opening is above it
    GapAtTop,
    /// Solid segment hangs from the ceiling; the opening is below it
    GapAtBottom,
}

/// A pipe entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipe {
    /// Leading (left) edge
    pub x: i32,
    /// Solid segment height, measured from the anchored edge
    pub h: i32,
    pub w: i32,
    pub orientation: Orientation,
    /// Bird has already been credited for this pipe
    pub passed: bool,
}

impl Pipe {
    /// A pipe at `x` with a randomly rolled shape
    pub fn random<R: Rng>(rng: &mut R, x: i32, tuning: &Tuning) -> Self {
        let mut pipe = Self {
            x,
            h: tuning.pipe_min_height,
            w: tuning.pipe_width,
            orientation: Orientation::GapAtTop,
            passed: false,
        };
        pipe.reroll(rng, tuning);
        pipe
    }

    /// Pick a new height and orientation
    pub fn reroll<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) {
        self.h = tuning.pipe_min_height + rng.random_range(0..tuning.pipe_height_range);
        self.orientation = if rng.random_bool(0.5) {
            Orientation::GapAtBottom
        } else {
            Orientation::GapAtTop
        };
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Fully scrolled past the left edge of the playfield
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0
    }

    /// World-space vertical extent of the solid segment as `(bottom, top)`,
    /// with 0 at the floor
    pub fn solid_span(&self, playfield_height: i32) -> (i32, i32) {
        match self.orientation {
            Orientation::GapAtTop => (0, self.h),
            Orientation::GapAtBottom => (playfield_height - self.h, playfield_height),
        }
    }

    /// Screen-space rectangle covered by the solid segment
    pub fn solid_rect(&self, playfield_height: i32) -> Rect {
        match self.orientation {
            Orientation::GapAtTop => Rect::new(self.x, playfield_height - self.h, self.w, self.h),
            Orientation::GapAtBottom => Rect::new(self.x, 0, self.w, self.h),
        }
    }
}
