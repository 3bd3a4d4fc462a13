use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pathfinding::PathStrategy;

// ── ScreenConfig ──────────────────────────────────────────────────────────────

/// Internal render resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self { width: 1280, height: 720 }
    }
}

impl ScreenConfig {
    /// Returns `0.0` when `height` is zero to avoid division by zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }
}

// ── PlayerConfig ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Walking speed in cells per second before perks.
    pub base_speed: f32,
    /// Radians of rotation per pixel of horizontal mouse motion.
    pub mouse_sensitivity: f32,
    /// Collectibles closer than this are picked up.
    pub pickup_radius: f32,
    /// Seconds a speed boost lasts before the Long Boost perk.
    pub boost_duration: f32,
    /// Movement multiplier while boosted.
    pub boost_multiplier: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            base_speed: 3.0,
            mouse_sensitivity: 0.003,
            pickup_radius: 0.7,
            boost_duration: 10.0,
            boost_multiplier: 2.0,
        }
    }
}

// ── PursuerConfig ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuerConfig {
    pub speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    /// Distance at which `GameEvent::PursuerNear` starts firing.
    pub proximity_alert: f32,
    pub strategy: PathStrategy,
}

impl Default for PursuerConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            detection_range: 15.0,
            attack_range: 1.5,
            proximity_alert: 2.7,
            strategy: PathStrategy::ShortestPath,
        }
    }
}

// ── GameConfig ────────────────────────────────────────────────────────────────

/// Complete tunable configuration. Every field has a default, so a config
/// file only needs to list what it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub fov_degrees: f32,
    /// Walls at or beyond this distance are drawn fully black.
    pub fog_distance: f32,
    pub player: PlayerConfig,
    pub pursuer: PursuerConfig,
    /// Seconds spent on the loading screen between levels.
    pub loading_duration: f32,
    /// Seconds the stab overlay lasts once the pursuer attacks.
    pub stab_duration: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            fov_degrees: 60.0,
            fog_distance: 10.0,
            player: PlayerConfig::default(),
            pursuer: PursuerConfig::default(),
            loading_duration: 1.5,
            stab_duration: 2.0,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }

    #[inline]
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}
