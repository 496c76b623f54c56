//! Game tuning and timing constants
//!
//! Defaults reproduce the classic feel. A JSON file may override any subset
//! of fields; missing fields keep their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Bird ===
    /// Speed added every tick (pixels/tick²)
    pub gravity: f64,
    /// Upward speed set by a jump (pixels/tick)
    pub jump_speed: f64,
    /// Height of the bird's center after spawn/restart
    pub spawn_y: f64,
    /// Fixed left edge of the bird
    pub bird_x: i32,
    pub bird_w: i32,
    pub bird_h: i32,
    /// Ticks each animation frame is shown
    pub frame_ticks: u64,

    // === Playfield ===
    pub playfield_width: i32,
    pub playfield_height: i32,

    // === Pipes ===
    pub pipe_count: usize,
    pub pipe_width: i32,
    /// Pixels scrolled per tick
    pub pipe_speed: i32,
    /// Distance between consecutive pipes' leading edges
    pub pipe_spacing: i32,
    /// Leading edge of the first pipe at spawn
    pub pipe_first_x: i32,
    /// Shortest solid segment
    pub pipe_min_height: i32,
    /// Random extra height added to `pipe_min_height` (exclusive upper bound)
    pub pipe_height_range: i32,

    // === Timing ===
    /// Simulation tick period (ms)
    pub tick_ms: u64,
    /// How long each game-over banner stays up (ms)
    pub banner_hold_ms: u64,
    /// How long the title banner stays up (ms)
    pub title_hold_ms: u64,
    pub banner_point_size: u32,

    /// Drop presses that were queued while the game-over banners were shown
    pub discard_input_on_restart: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.12,
            jump_speed: 5.0,
            spawn_y: 300.0,
            bird_x: 20,
            bird_w: 50,
            bird_h: 43,
            frame_ticks: 10,

            playfield_width: 900,
            playfield_height: 600,

            pipe_count: 5,
            pipe_width: 50,
            pipe_speed: 2,
            pipe_spacing: 200,
            pipe_first_x: 800,
            pipe_min_height: 100,
            pipe_height_range: 300,

            tick_ms: 10,
            banner_hold_ms: 1000,
            title_hold_ms: 2000,
            banner_point_size: 30,

            discard_input_on_restart: false,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        fn bad(field: &'static str, reason: &str) -> Error {
            Error::Tuning {
                field,
                reason: reason.to_string(),
            }
        }

        if self.tick_ms == 0 {
            return Err(bad("tick_ms", "must be positive"));
        }
        if self.frame_ticks == 0 {
            return Err(bad("frame_ticks", "must be positive"));
        }
        if self.pipe_count == 0 {
            return Err(bad("pipe_count", "at least one pipe is required"));
        }
        if self.pipe_width <= 0 {
            return Err(bad("pipe_width", "must be positive"));
        }
        if self.bird_w <= 0 || self.bird_h <= 0 {
            return Err(bad("bird_w", "bird size must be positive"));
        }
        if self.pipe_speed <= 0 {
            return Err(bad("pipe_speed", "must be positive"));
        }
        if self.pipe_spacing <= self.pipe_width {
            return Err(bad("pipe_spacing", "must exceed pipe_width"));
        }
        if self.pipe_height_range <= 0 {
            return Err(bad("pipe_height_range", "must be positive"));
        }
        if self.playfield_width <= 0 || self.playfield_height <= 0 {
            return Err(bad("playfield_height", "playfield must be non-empty"));
        }
        if self.pipe_min_height < 0 {
            return Err(bad("pipe_min_height", "must not be negative"));
        }
        match self.pipe_min_height.checked_add(self.pipe_height_range) {
            Some(tallest) if tallest <= self.playfield_height => {}
            _ => {
                return Err(bad(
                    "pipe_height_range",
                    "pipe_min_height + pipe_height_range must fit the playfield",
                ));
            }
        }
        if self.banner_point_size == 0 {
            return Err(bad("banner_point_size", "must be positive"));
        }
        if !(self.gravity.is_finite() && self.jump_speed.is_finite()) {
            return Err(bad("gravity", "must be finite"));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn banner_hold(&self) -> Duration {
        Duration::from_millis(self.banner_hold_ms)
    }

    pub fn title_hold(&self) -> Duration {
        Duration::from_millis(self.title_hold_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.2, "pipe_count": 3 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.2);
        assert_eq!(tuning.pipe_count, 3);
        assert_eq!(tuning.jump_speed, 5.0);
        assert_eq!(tuning.tick_period(), Duration::from_millis(10));
    }

    #[test]
    fn test_rejects_zero_tick() {
        let err = Tuning::from_json(r#"{ "tick_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::Tuning { field: "tick_ms", .. }));
    }

    #[test]
    fn test_rejects_overlapping_pipes() {
        let tuning = Tuning {
            pipe_spacing: 40,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_pipes_taller_than_playfield() {
        let err = Tuning::from_json(r#"{ "pipe_min_height": 400, "pipe_height_range": 300 }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Tuning { field: "pipe_height_range", .. }));

        let tuning = Tuning {
            pipe_min_height: i32::MAX,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());

        let tuning = Tuning {
            pipe_min_height: -5,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(Error::Tuning { field: "pipe_min_height", .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(Error::Config(_))
        ));
    }
}
