use anyhow::{Context, Result};
use matchtwo_core::{BoardConfig, Coord, FlipTiming, SessionConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub rows: Coord,
    pub cols: Coord,
    /// Degrees per second.
    pub rotation_speed: f32,
    pub max_angle: f32,
    /// Seconds simulated per tick.
    pub tick: f32,
    pub max_ticks: u32,
    pub seed: Option<u64>,
    /// Click through the table layout instead of picking coordinates directly.
    pub pointer: bool,
    pub viewport: (f32, f32),
}

impl Default for Settings {
    fn default() -> Self {
        let board = BoardConfig::default();
        let timing = FlipTiming::default();
        Self {
            rows: board.rows(),
            cols: board.cols(),
            rotation_speed: timing.rotation_speed,
            max_angle: timing.max_angle,
            tick: 1.0 / 60.0,
            max_ticks: 100_000,
            seed: None,
            pointer: true,
            viewport: (1920.0, 980.0),
        }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid settings")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn session_config(&self, seed: u64) -> Result<SessionConfig> {
        let board = BoardConfig::new((self.rows, self.cols))
            .with_context(|| format!("cannot play on a {}x{} board", self.rows, self.cols))?;
        if !(self.tick.is_finite() && self.tick > 0.0) {
            anyhow::bail!("tick must be a positive number of seconds, got {}", self.tick);
        }
        if !(self.rotation_speed.is_finite() && self.rotation_speed > 0.0) {
            anyhow::bail!(
                "rotation_speed must be a positive number of degrees per second, got {}",
                self.rotation_speed
            );
        }
        Ok(SessionConfig {
            board,
            timing: FlipTiming::new(self.rotation_speed, self.max_angle),
            seed,
        })
    }
}
