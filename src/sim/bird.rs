//! The bird: vertical physics, jump impulse, and pipe collision
//!
//! All mutable state sits behind one reader/writer lock so the bird can be
//! inspected from another context while the loop task updates it.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::pipe::{Orientation, Pipe};
use crate::error::Result;
use crate::platform::{Canvas, Rect, TextureId, TextureProvider};
use crate::tuning::Tuning;

/// Number of wing-flap animation frames
pub const BIRD_FRAMES: usize = 4;

/// Mutable bird state (copied out by `Bird::snapshot`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdState {
    /// Animation tick counter, survives restarts
    pub time: u64,
    /// Height of the bird's center above the floor
    pub y: f64,
    /// Positive speed moves the bird down (`y -= speed` each tick)
    pub speed: f64,
    pub dead: bool,
}

#[derive(Debug)]
pub struct Bird {
    state: RwLock<BirdState>,
    textures: [TextureId; BIRD_FRAMES],
    x: i32,
    w: i32,
    h: i32,
    gravity: f64,
    jump_speed: f64,
    spawn_y: f64,
    frame_ticks: u64,
    playfield_height: i32,
}

impl Bird {
    pub fn new(textures: [TextureId; BIRD_FRAMES], tuning: &Tuning) -> Self {
        Self {
            state: RwLock::new(BirdState {
                time: 0,
                y: tuning.spawn_y,
                speed: 0.0,
                dead: false,
            }),
            textures,
            x: tuning.bird_x,
            w: tuning.bird_w,
            h: tuning.bird_h,
            gravity: tuning.gravity,
            jump_speed: tuning.jump_speed,
            spawn_y: tuning.spawn_y,
            frame_ticks: tuning.frame_ticks.max(1),
            playfield_height: tuning.playfield_height,
        }
    }

    /// Load `bird_frame_1` .. `bird_frame_4` and build the bird
    pub fn load(provider: &mut impl TextureProvider, tuning: &Tuning) -> Result<Self> {
        let mut textures = [TextureId(0); BIRD_FRAMES];
        for i in 0..BIRD_FRAMES {
            match provider.load(&format!("bird_frame_{}", i + 1)) {
                Ok(id) => textures[i] = id,
                Err(e) => {
                    // Don't leak the frames that did load
                    for loaded in &textures[..i] {
                        provider.release(*loaded);
                    }
                    return Err(e);
                }
            }
        }
        Ok(Self::new(textures, tuning))
    }

    fn read(&self) -> RwLockReadGuard<'_, BirdState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BirdState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance one tick: integrate position, check bounds, apply gravity
    pub fn update(&self) {
        let mut s = self.write();
        s.time += 1;
        s.y -= s.speed;
        if s.y < 0.0 || s.y > f64::from(self.playfield_height) {
            s.dead = true;
        }
        s.speed += self.gravity;
    }

    /// Replace the current speed with an upward impulse
    pub fn jump(&self) {
        self.write().speed = -self.jump_speed;
    }

    /// Kill the bird if it overlaps the pipe's solid segment.
    ///
    /// Touching an edge exactly is not a hit.
    pub fn touch(&self, pipe: &Pipe) {
        let hit = {
            let s = self.read();
            self.overlaps(s.y, pipe)
        };
        if hit {
            self.write().dead = true;
        }
    }

    fn overlaps(&self, y: f64, pipe: &Pipe) -> bool {
        if pipe.x > self.x + self.w || pipe.right() < self.x {
            return false;
        }

        let y = y as i32;
        let bottom = y - self.h / 2;
        let top = y + self.h / 2;
        let (solid_bottom, solid_top) = pipe.solid_span(self.playfield_height);
        match pipe.orientation {
            Orientation::GapAtTop => solid_top > bottom,
            Orientation::GapAtBottom => solid_bottom < top,
        }
    }

    /// Back to the spawn point, alive. The animation counter keeps running.
    pub fn restart(&self) {
        let mut s = self.write();
        s.y = self.spawn_y;
        s.speed = 0.0;
        s.dead = false;
    }

    pub fn is_dead(&self) -> bool {
        self.read().dead
    }

    pub fn snapshot(&self) -> BirdState {
        *self.read()
    }

    /// Fixed left edge
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Draw the current animation frame
    pub fn paint(&self, canvas: &mut impl Canvas) -> Result<()> {
        let s = self.read();
        let rect = Rect::new(
            self.x,
            (self.playfield_height - s.y as i32) - self.h / 2,
            self.w,
            self.h,
        );
        let frame = (s.time / self.frame_ticks) as usize % BIRD_FRAMES;
        canvas.copy(self.textures[frame], Some(rect))
    }

    pub(super) fn frames(&self) -> [TextureId; BIRD_FRAMES] {
        self.textures
    }

    /// Release the animation frames; consumes the bird so it happens once
    pub fn destroy(self, provider: &mut impl TextureProvider) {
        for texture in self.frames() {
            provider.release(texture);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessBackend;
    use crate::platform::testing::{Op, Recorder};
    use proptest::prelude::*;

    fn bird() -> Bird {
        Bird::new(
            [TextureId(1), TextureId(2), TextureId(3), TextureId(4)],
            &Tuning::default(),
        )
    }

    fn bird_at(y: f64) -> Bird {
        let b = bird();
        b.write().y = y;
        b
    }

    fn pipe(x: i32, h: i32, orientation: Orientation) -> Pipe {
        Pipe {
            x,
            h,
            w: 50,
            orientation,
            passed: false,
        }
    }

    #[test]
    fn test_spawn_state() {
        let s = bird().snapshot();
        assert_eq!(s.y, 300.0);
        assert_eq!(s.speed, 0.0);
        assert!(!s.dead);
        assert_eq!(s.time, 0);
    }

    #[test]
    fn test_update_integrates_then_accelerates() {
        let b = bird();
        b.update();
        let s = b.snapshot();
        // Position moves with the old speed (0), gravity applies afterwards
        assert_eq!(s.y, 300.0);
        assert!((s.speed - 0.12).abs() < 1e-12);
        assert_eq!(s.time, 1);

        b.update();
        let s = b.snapshot();
        assert!((s.y - 299.88).abs() < 1e-9);
    }

    #[test]
    fn test_jump_overrides_speed() {
        let b = bird();
        for _ in 0..30 {
            b.update();
        }
        b.jump();
        assert_eq!(b.snapshot().speed, -5.0);
        b.jump();
        assert_eq!(b.snapshot().speed, -5.0);
    }

    #[test]
    fn test_jump_moves_up() {
        let b = bird();
        b.jump();
        b.update();
        assert_eq!(b.snapshot().y, 305.0);
    }

    #[test]
    fn test_falls_to_death_without_input() {
        let b = bird();
        for _ in 0..200 {
            b.update();
        }
        assert!(b.is_dead());
        assert!(b.snapshot().y < 0.0);
    }

    #[test]
    fn test_ceiling_kills() {
        let b = bird_at(599.0);
        b.write().speed = -2.0;
        b.update();
        assert!(b.is_dead());
    }

    #[test]
    fn test_death_persists_until_restart() {
        let b = bird_at(1.0);
        b.write().speed = 5.0;
        b.update();
        assert!(b.is_dead());

        // Climbing back into bounds does not revive
        b.jump();
        for _ in 0..3 {
            b.update();
        }
        assert!(b.snapshot().y > 0.0);
        assert!(b.is_dead());

        b.restart();
        assert!(!b.is_dead());
    }

    #[test]
    fn test_restart_keeps_animation_time() {
        let b = bird();
        for _ in 0..25 {
            b.update();
        }
        b.jump();
        b.restart();
        let s = b.snapshot();
        assert_eq!(s.time, 25);
        assert_eq!(s.y, 300.0);
        assert_eq!(s.speed, 0.0);
        assert!(!s.dead);
    }

    #[test]
    fn test_touch_no_horizontal_overlap() {
        // Bird spans x 20..70
        let b = bird_at(300.0);
        b.touch(&pipe(71, 599, Orientation::GapAtTop));
        b.touch(&pipe(-31, 599, Orientation::GapAtTop));
        assert!(!b.is_dead());
    }

    #[test]
    fn test_touch_horizontal_edges_overlap() {
        let b = bird_at(300.0);
        b.touch(&pipe(70, 599, Orientation::GapAtTop));
        assert!(b.is_dead());

        let b = bird_at(300.0);
        b.touch(&pipe(-30, 599, Orientation::GapAtTop));
        assert!(b.is_dead());
    }

    #[test]
    fn test_touch_floor_pipe() {
        // Bird bottom edge = 300 - 21 = 279
        let b = bird_at(300.0);
        b.touch(&pipe(40, 278, Orientation::GapAtTop));
        assert!(!b.is_dead());

        b.touch(&pipe(40, 280, Orientation::GapAtTop));
        assert!(b.is_dead());
    }

    #[test]
    fn test_touch_ceiling_pipe() {
        // Bird top edge = 300 + 21 = 321; pipe bottom edge = 600 - h
        let b = bird_at(300.0);
        b.touch(&pipe(40, 278, Orientation::GapAtBottom));
        assert!(!b.is_dead());

        b.touch(&pipe(40, 280, Orientation::GapAtBottom));
        assert!(b.is_dead());
    }

    #[test]
    fn test_touch_exact_edge_is_not_a_hit() {
        let b = bird_at(300.0);
        b.touch(&pipe(40, 279, Orientation::GapAtTop));
        assert!(!b.is_dead());

        b.touch(&pipe(40, 600 - 321, Orientation::GapAtBottom));
        assert!(!b.is_dead());
    }

    #[test]
    fn test_touch_is_idempotent() {
        let b = bird_at(300.0);
        let p = pipe(40, 500, Orientation::GapAtTop);
        b.touch(&p);
        b.touch(&p);
        assert!(b.is_dead());
        b.restart();
        assert!(!b.is_dead());
    }

    #[test]
    fn test_paint_picks_frame_and_rect() {
        let b = bird();
        for _ in 0..10 {
            b.update();
        }
        // y = 300 - 0.12 * (0 + 1 + ... + 9) = 294.6
        let mut canvas = Recorder::default();
        b.paint(&mut canvas).unwrap();
        assert_eq!(
            canvas.ops,
            vec![Op::Copy(TextureId(2), Some(Rect::new(20, 285, 50, 43)))]
        );

        for _ in 0..30 {
            b.update();
        }
        let mut canvas = Recorder::default();
        b.paint(&mut canvas).unwrap();
        assert!(matches!(canvas.ops[0], Op::Copy(TextureId(1), _)));
    }

    #[test]
    fn test_load_and_destroy_release_frames() {
        let mut backend = HeadlessBackend::new(None);
        let b = Bird::load(&mut backend, &Tuning::default()).unwrap();
        assert_eq!(backend.live_textures(), 4);
        b.destroy(&mut backend);
        assert_eq!(backend.live_textures(), 0);
    }

    #[test]
    fn test_failed_load_releases_partial_frames() {
        struct FailThird(HeadlessBackend);
        impl TextureProvider for FailThird {
            fn load(&mut self, name: &str) -> Result<TextureId> {
                if name == "bird_frame_3" {
                    return Err(crate::error::Error::TextureLoad {
                        name: name.into(),
                        reason: "corrupt".into(),
                    });
                }
                self.0.load(name)
            }
            fn release(&mut self, texture: TextureId) {
                self.0.release(texture)
            }
        }

        let mut provider = FailThird(HeadlessBackend::new(None));
        assert!(Bird::load(&mut provider, &Tuning::default()).is_err());
        assert_eq!(provider.0.live_textures(), 0);
    }

    #[test]
    fn test_shared_reads_while_updating() {
        use std::sync::Arc;

        let b = Arc::new(bird());
        let reader = {
            let b = Arc::clone(&b);
            std::thread::spawn(move || {
                let mut last = 0;
                for _ in 0..1000 {
                    let t = b.snapshot().time;
                    assert!(t >= last);
                    last = t;
                }
            })
        };
        for _ in 0..1000 {
            b.update();
        }
        reader.join().unwrap();
        assert_eq!(b.snapshot().time, 1000);
    }

    proptest! {
        #[test]
        fn prop_gravity_adds_exactly_per_tick(ticks in 1usize..300, jump_at in proptest::option::of(0usize..300)) {
            let b = bird();
            if let Some(j) = jump_at {
                for _ in 0..j.min(ticks) {
                    b.update();
                }
                b.jump();
            }
            let mut prev = b.snapshot().speed;
            for _ in 0..ticks {
                b.update();
                let speed = b.snapshot().speed;
                prop_assert!(speed >= prev);
                prop_assert!((speed - prev - 0.12).abs() < 1e-9);
                prev = speed;
            }
        }

        #[test]
        fn prop_out_of_bounds_is_fatal(y in -100.0f64..700.0, speed in -10.0f64..10.0) {
            let b = bird_at(y);
            b.write().speed = speed;
            b.update();
            let s = b.snapshot();
            if s.y < 0.0 || s.y > 600.0 {
                prop_assert!(s.dead);
            }
            if s.dead {
                for _ in 0..5 {
                    b.update();
                    prop_assert!(b.is_dead());
                }
            }
        }
    }
}
