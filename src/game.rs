//! Game-wide state the end scene reads from and writes back to.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// What the scene needs from the surrounding game.
pub trait GameState {
    fn coin(&self) -> i32;
    fn time(&self) -> i32;
    fn score(&self) -> i32;
    fn lives(&self) -> i32;
    /// Collected item states, one per item slot.
    fn items(&self) -> &[i32];

    fn set_coin(&mut self, coin: i32);
    fn set_score(&mut self, score: i32);
    fn set_lives(&mut self, lives: i32);
    fn set_player_position(&mut self, x: f32, y: f32);
    fn reset_items(&mut self);

    fn switch_scene(&mut self, scene: i32);
    fn set_camera(&mut self, x: f32, y: f32);
    /// End the session.
    fn exit(&mut self);
}

/// Plain in-memory game state, also the JSON shape of `--state` files.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub coin: i32,
    pub time: i32,
    pub score: i32,
    pub lives: i32,
    pub items: Vec<i32>,
    pub player: (f32, f32),
    pub camera: (f32, f32),
    /// Scene switch requested this session, if any.
    pub next_scene: Option<i32>,
    pub exit_requested: bool,
}

impl Session {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("Parsing {}", path.display()))
    }
}

impl GameState for Session {
    fn coin(&self) -> i32 {
        self.coin
    }

    fn time(&self) -> i32 {
        self.time
    }

    fn score(&self) -> i32 {
        self.score
    }

    fn lives(&self) -> i32 {
        self.lives
    }

    fn items(&self) -> &[i32] {
        &self.items
    }

    fn set_coin(&mut self, coin: i32) {
        self.coin = coin;
    }

    fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    fn set_lives(&mut self, lives: i32) {
        self.lives = lives;
    }

    fn set_player_position(&mut self, x: f32, y: f32) {
        self.player = (x, y);
    }

    fn reset_items(&mut self) {
        self.items.clear();
    }

    fn switch_scene(&mut self, scene: i32) {
        tracing::info!("switching to scene {scene}");
        self.next_scene = Some(scene);
    }

    fn set_camera(&mut self, x: f32, y: f32) {
        self.camera = (x, y);
    }

    fn exit(&mut self) {
        tracing::info!("session exit requested");
        self.exit_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_partial_json() {
        let session: Session = serde_json::from_str(r#"{ "coin": 205, "items": [1, 0, 2] }"#).unwrap();
        assert_eq!(session.coin(), 205);
        assert_eq!(session.items(), &[1, 0, 2]);
        assert_eq!(session.lives(), 0);
        assert_eq!(session.next_scene, None);
    }
}
