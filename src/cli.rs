use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::scene::controller::Key;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Scene description file
    pub input: PathBuf,
    /// JSON layout / behaviour overrides
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// JSON game state (coin, time, score, lives, items)
    #[arg(long)]
    pub state: Option<PathBuf>,
    /// Id reported for the scene
    #[arg(long, default_value_t = 5)]
    pub scene_id: i32,
    /// Frames to run before and after the key presses
    #[arg(long, default_value_t = 1)]
    pub frames: u32,
    /// Frame time in milliseconds
    #[arg(long, default_value_t = 16)]
    pub dt: u32,
    /// Keys to press, in order
    #[arg(long = "key", value_enum)]
    pub keys: Vec<KeyArg>,
    /// Write the JSON snapshot here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyArg {
    Up,
    Down,
    Confirm,
}

impl From<KeyArg> for Key {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::Up => Key::Up,
            KeyArg::Down => Key::Down,
            KeyArg::Confirm => Key::Confirm,
        }
    }
}
