//! Section state machine over scene description lines.
//!
//! Lines are fed one at a time. Headers switch the current section, `#`
//! lines are comments, everything else is a row for the current section.
//! Bad rows become diagnostics; they never stop the load.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Diagnostic, LoadReport, RowError};
use crate::model::{Animation, AnimationSet, Frame, ObjectPayload, Rect, Rgb, Sprite, Texture};
use crate::registry::Resources;
use crate::scene::Scene;

use super::classifier::{ObjectRow, classify};
use super::lexer::{atof, atoi, split};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Unknown,
    Textures,
    Sprites,
    Animations,
    AnimationSets,
    Objects,
}

impl Section {
    /// Section for a header line. `None` means the line is not a header.
    pub fn from_header(line: &str) -> Option<Self> {
        let section = match line {
            "[TEXTURES]" => Self::Textures,
            "[SPRITES]" => Self::Sprites,
            "[ANIMATIONS]" => Self::Animations,
            "[ANIMATION_SETS]" => Self::AnimationSets,
            "[OBJECTS]" => Self::Objects,
            l if l.starts_with('[') => Self::Unknown,
            _ => return None,
        };
        Some(section)
    }

    fn name(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Textures => "TEXTURES",
            Self::Sprites => "SPRITES",
            Self::Animations => "ANIMATIONS",
            Self::AnimationSets => "ANIMATION_SETS",
            Self::Objects => "OBJECTS",
        }
    }

    /// Fewest tokens a row of this section can have.
    fn min_tokens(self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::Textures => 5,
            Self::Sprites => 6,
            Self::Animations => 3,
            Self::AnimationSets => 2,
            Self::Objects => 4,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a whole description held in memory.
pub fn parse_scene<'l, I>(lines: I, resources: &mut Resources, scene: &mut Scene) -> LoadReport
where
    I: IntoIterator<Item = &'l str>,
{
    let mut parser = SceneParser::new(resources, scene);
    for (i, line) in lines.into_iter().enumerate() {
        parser.feed(i + 1, line);
    }
    parser.finish()
}

pub struct SceneParser<'a> {
    section: Section,
    resources: &'a mut Resources,
    scene: &'a mut Scene,
    diagnostics: Vec<Diagnostic>,
    placed: usize,
}

impl<'a> SceneParser<'a> {
    pub fn new(resources: &'a mut Resources, scene: &'a mut Scene) -> Self {
        Self {
            section: Section::Unknown,
            resources,
            scene,
            diagnostics: Vec::new(),
            placed: 0,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Handle one line; `line_no` is 1-based and only used for diagnostics.
    pub fn feed(&mut self, line_no: usize, line: &str) {
        let line = line.trim_end();

        if line.is_empty() || line.starts_with('#') {
            return;
        }

        if let Some(section) = Section::from_header(line) {
            if section == Section::Unknown {
                tracing::debug!("line {line_no}: skipping unknown section {line}");
            }
            self.section = section;
            return;
        }

        let tokens = split(line);
        let needed = self.section.min_tokens();
        if self.section != Section::Unknown && tokens.len() < needed {
            self.report(
                Some(line_no),
                RowError::TooFewTokens {
                    section: self.section,
                    expected: needed,
                    found: tokens.len(),
                },
            );
            return;
        }

        let res = match self.section {
            Section::Unknown => Ok(()),
            Section::Textures => self.parse_texture(&tokens),
            Section::Sprites => self.parse_sprite(&tokens),
            Section::Animations => self.parse_animation(&tokens),
            Section::AnimationSets => self.parse_animation_set(&tokens),
            Section::Objects => self.parse_object(&tokens),
        };

        if let Err(e) = res {
            self.report(Some(line_no), e);
        }
    }

    /// Check animation set references against the final animation table.
    pub fn finish(mut self) -> LoadReport {
        let mut unresolved: Vec<(i32, i32)> = self
            .resources
            .animation_sets
            .iter()
            .flat_map(|(set_id, set)| set.animations.iter().map(move |a| (set_id, *a)))
            .filter(|(_, animation)| !self.resources.animations.contains(*animation))
            .collect();
        unresolved.sort_unstable();
        unresolved.dedup();

        for (set, animation) in unresolved {
            self.report(None, RowError::MissingAnimation { set, animation });
        }

        LoadReport {
            objects: self.placed,
            diagnostics: self.diagnostics,
        }
    }

    fn report(&mut self, line: Option<usize>, error: RowError) {
        let diagnostic = Diagnostic { line, error };
        tracing::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    // ─────────────────────────────────────────────────────
    // Row parsers; arity has been checked by `feed`
    // ─────────────────────────────────────────────────────

    fn parse_texture(&mut self, tokens: &[&str]) -> Result<(), RowError> {
        let id = atoi(tokens[0]);
        let texture = Texture {
            path: PathBuf::from(tokens[1]),
            transparent: Rgb::clamped(atoi(tokens[2]), atoi(tokens[3]), atoi(tokens[4])),
        };
        self.resources.textures.add(id, texture);
        Ok(())
    }

    fn parse_sprite(&mut self, tokens: &[&str]) -> Result<(), RowError> {
        let id = atoi(tokens[0]);
        let texture = atoi(tokens[5]);
        if !self.resources.textures.contains(texture) {
            return Err(RowError::MissingTexture { sprite: id, texture });
        }

        let rect = Rect {
            left: atoi(tokens[1]),
            top: atoi(tokens[2]),
            right: atoi(tokens[3]),
            bottom: atoi(tokens[4]),
        };
        self.resources.sprites.add(id, Sprite { rect, texture });
        Ok(())
    }

    fn parse_animation(&mut self, tokens: &[&str]) -> Result<(), RowError> {
        let id = atoi(tokens[0]);
        let pairs = &tokens[1..];
        if pairs.len() % 2 != 0 {
            return Err(RowError::DanglingFrame { animation: id });
        }

        let frames = pairs
            .chunks_exact(2)
            .map(|pair| Frame {
                sprite: atoi(pair[0]),
                time_ms: u32::try_from(atoi(pair[1])).unwrap_or(0),
            })
            .collect();
        self.resources.animations.add(id, Animation { frames });
        Ok(())
    }

    fn parse_animation_set(&mut self, tokens: &[&str]) -> Result<(), RowError> {
        let id = atoi(tokens[0]);
        // unknown ids stay as placeholders; `finish` reports them
        let animations = tokens[1..].iter().map(|t| atoi(t)).collect();
        self.resources.animation_sets.add(id, AnimationSet { animations });
        Ok(())
    }

    fn parse_object(&mut self, tokens: &[&str]) -> Result<(), RowError> {
        let payload = match tokens.len() {
            5 => ObjectPayload::Setting { value: atoi(tokens[4]) },
            6 => ObjectPayload::Switch {
                x: atof(tokens[4]),
                y: atof(tokens[5]),
            },
            _ => ObjectPayload::None,
        };
        let row = ObjectRow {
            object_type: atoi(tokens[0]),
            x: atof(tokens[1]),
            y: atof(tokens[2]),
            animation_set: atoi(tokens[3]),
            payload,
        };

        let Some(id) = classify(&row, &*self.resources, &mut *self.scene)? else {
            return Ok(());
        };
        self.placed += 1;

        let has_set = self.scene.object(id).is_some_and(|o| o.animation_set.is_some());
        if !has_set {
            return Err(RowError::MissingAnimationSet {
                set: row.animation_set,
                object_type: row.object_type,
            });
        }
        Ok(())
    }
}
