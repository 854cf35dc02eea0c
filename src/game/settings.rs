use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::model::{Bounds, Difficulty};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default = "default_height")]
    pub height: f64,

    /// Clear space kept between cities and the edge of the drawing area.
    #[serde(default = "default_margin")]
    pub margin: f64,

    #[serde(default = "default_reveal_interval_ms")]
    pub reveal_interval_ms: u64,

    /// Seeds the session's generator; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

// Helper functions for default values
fn default_width() -> f64 {
    800.0
}
fn default_height() -> f64 {
    600.0
}
fn default_margin() -> f64 {
    25.0
}
fn default_reveal_interval_ms() -> u64 {
    500
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            difficulty: Difficulty::default(),
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            reveal_interval_ms: default_reveal_interval_ms(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Defaults overridden by `TSP_DIFFICULTY`, `TSP_SEED` and `TSP_REVEAL_MS`.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        if let Some(difficulty) = parse_env::<Difficulty>("TSP_DIFFICULTY") {
            settings.difficulty = difficulty;
        }
        settings.seed = parse_env::<u64>("TSP_SEED");
        if let Some(interval) = parse_env::<u64>("TSP_REVEAL_MS") {
            settings.reveal_interval_ms = interval;
        }
        settings
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Time between reveal ticks. Never zero, so pumping the session by this
    /// amount always delivers a tick.
    pub fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.reveal_interval_ms.max(1))
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(target: "settings", "Ignoring unparseable {}={:?}", name, value);
            None
        }
    }
}
