pub mod autopilot;
pub mod camera;
pub mod collectible;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod levels;
pub mod map;
pub mod pathfinding;
pub mod pursuer;
pub mod renderer;
pub mod shop;

pub use error::{Error, Result};
