//! The functional core: tokenizing, section parsing, object classification
//! and the HUD arithmetic the scene runs every frame.
pub mod classifier;
pub mod hud;
pub mod lexer;
pub mod section_parser;

pub use section_parser::{Section, parse_scene};
