//! Flappy - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Simulation (bird physics, pipe field, collisions, scene)
//! - `runner`: Event/tick loop that drives a scene
//! - `platform`: Render surface, texture and input abstractions
//! - `tuning`: Data-driven game balance and timing
//! - `error`: Error taxonomy

pub mod error;
pub mod platform;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use tuning::Tuning;
