//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only (one `update` per tick, no `dt`)
//! - Seeded RNG for pipe shapes
//! - Pipes iterated in spawn order
//! - Rendering only through the `platform` traits

pub mod bird;
pub mod pipe;
pub mod pipes;
pub mod scene;

pub use bird::{BIRD_FRAMES, Bird, BirdState};
pub use pipe::{Orientation, Pipe};
pub use pipes::PipeField;
pub use scene::{GamePhase, Scene};
