use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::processor::section_parser::Section;

/// Failures that stop a scene from loading at all.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("cannot open scene file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read scene file {} at line {line}", path.display())]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// Problems with a single row. The row is skipped (or kept with a missing
/// reference) and loading continues.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("{section} row needs at least {expected} tokens, got {found}")]
    TooFewTokens {
        section: Section,
        expected: usize,
        found: usize,
    },
    #[error("animation {animation} has a sprite id without a frame time")]
    DanglingFrame { animation: i32 },
    #[error("texture {texture} not found for sprite {sprite}")]
    MissingTexture { sprite: i32, texture: i32 },
    #[error("animation {animation} not found for animation set {set}")]
    MissingAnimation { set: i32, animation: i32 },
    /// A warning on an object that was still placed, without an animation
    /// set. The object counts in [`LoadReport::objects`], so a scene can be
    /// fully placed and still not be [`LoadReport::is_clean`].
    #[error("animation set {set} not found for object type {object_type}")]
    MissingAnimationSet { set: i32, object_type: i32 },
    #[error("invalid object type: {0}")]
    UnknownObjectType(i32),
}

/// A row problem with the line it came from. Reference checks run after the
/// whole file is read and carry no line.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: Option<usize>,
    pub error: RowError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

/// What a load pass produced besides the scene itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub objects: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    /// No diagnostics at all, warnings on placed objects included.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic {
            line: Some(12),
            error: RowError::TooFewTokens {
                section: Section::Textures,
                expected: 5,
                found: 3,
            },
        };
        assert_eq!(d.to_string(), "line 12: TEXTURES row needs at least 5 tokens, got 3");

        let d = Diagnostic {
            line: None,
            error: RowError::MissingAnimation { set: 2, animation: 9 },
        };
        assert_eq!(d.to_string(), "animation 9 not found for animation set 2");
    }
}
