//! Scene layout and behaviour settings.
//!
//! Every field has a default taken from the shipped end scene, so an empty
//! JSON object (or no file at all) reproduces it exactly.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Size of the line buffer scene files are read with.
pub const MAX_SCENE_LINE: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub max_line_len: usize,
    pub hud: HudLayout,
    pub menu: MenuLayout,
    pub reset: ResetValues,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            max_line_len: MAX_SCENE_LINE,
            hud: HudLayout::default(),
            menu: MenuLayout::default(),
            reset: ResetValues::default(),
        }
    }
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Parsing {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.max_line_len < 2 {
            anyhow::bail!("max_line_len must be at least 2, got {}", config.max_line_len);
        }
        Ok(config)
    }
}

/// Which way a counter walks its bucket while placing digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitOrder {
    /// Bucket entry 0 holds the least significant digit.
    Forward,
    /// The last bucket entry holds the least significant digit.
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterLayout {
    pub x: f32,
    pub y: f32,
    pub order: DigitOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudLayout {
    pub number_width: f32,
    pub coin: CounterLayout,
    pub time: CounterLayout,
    pub score: CounterLayout,
    pub life: CounterLayout,
    pub item_x: f32,
    pub item_step: f32,
    pub item_board_offset: f32,
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            number_width: 8.0,
            coin: CounterLayout { x: 180.0, y: 219.0, order: DigitOrder::Forward },
            time: CounterLayout { x: 180.0, y: 227.0, order: DigitOrder::Reverse },
            score: CounterLayout { x: 140.0, y: 227.0, order: DigitOrder::Forward },
            life: CounterLayout { x: 77.0, y: 227.0, order: DigitOrder::Reverse },
            item_x: 207.0,
            item_step: 24.0,
            item_board_offset: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Navigation {
    /// Up and down both flip the cursor, as the shipped scene does.
    #[default]
    Toggle,
    /// Up selects "continue", down selects "quit".
    Directional,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuLayout {
    pub x: f32,
    pub continue_y: f32,
    pub quit_y: f32,
    pub navigation: Navigation,
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self {
            x: 140.0,
            continue_y: 102.0,
            quit_y: 109.0,
            navigation: Navigation::Toggle,
        }
    }
}

/// Game state written when the player picks "continue".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetValues {
    pub lives: i32,
    pub player_x: f32,
    pub player_y: f32,
    pub map_scene: i32,
}

impl Default for ResetValues {
    fn default() -> Self {
        Self {
            lives: 2,
            player_x: 48.0,
            player_y: 80.0,
            map_scene: 1,
        }
    }
}
