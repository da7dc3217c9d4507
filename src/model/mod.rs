use std::path::PathBuf;

use serde::Serialize;

use crate::registry::Resources;

/// Scene file object type codes.
pub const OBJECT_TYPE_TAG: i32 = 0;
pub const OBJECT_TYPE_OBJECT: i32 = 1;
pub const OBJECT_TYPE_ENVIRONMENT: i32 = 2;
pub const OBJECT_TYPE_BOARD: i32 = 16;
pub const OBJECT_TYPE_NUMBER: i32 = 22;
pub const OBJECT_TYPE_SPEEDBAR: i32 = 23;
pub const OBJECT_TYPE_ITEM: i32 = 24;

/// At most this many item icons are kept on the end board.
pub const MAX_ITEMS: usize = 3;

/// ─────────────────────────────────────────────────────
/// Resources
/// ─────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Build a colour from already parsed channels, clamping each to 0..=255.
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        let channel = |v: i32| v.clamp(0, u8::MAX as i32) as u8;
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }
}

/// A texture as the scene knows it: where to load it from and which colour
/// is see-through. The pixels themselves belong to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub path: PathBuf,
    pub transparent: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub rect: Rect,
    pub texture: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub sprite: i32,
    pub time_ms: u32,
}

/// Ordered frames; never empty once registered.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub frames: Vec<Frame>,
}

/// Animations referenced by id. An id that does not resolve stays in place
/// so that animation indices keep their meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSet {
    pub animations: Vec<i32>,
}

impl AnimationSet {
    pub fn resolve<'r>(&self, resources: &'r Resources) -> Vec<Option<&'r Animation>> {
        self.animations
            .iter()
            .map(|id| resources.animations.get(*id))
            .collect()
    }
}

/// ─────────────────────────────────────────────────────
/// Game objects
/// ─────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectKind {
    /// Menu cursor next to "continue" / "quit".
    Tag,
    PlainObject,
    Environment,
    Board,
    /// One HUD digit.
    Number,
    SpeedBar,
    /// Collected item icon.
    Item,
}

impl ObjectKind {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            OBJECT_TYPE_TAG => Some(Self::Tag),
            OBJECT_TYPE_OBJECT => Some(Self::PlainObject),
            OBJECT_TYPE_ENVIRONMENT => Some(Self::Environment),
            OBJECT_TYPE_BOARD => Some(Self::Board),
            OBJECT_TYPE_NUMBER => Some(Self::Number),
            OBJECT_TYPE_SPEEDBAR => Some(Self::SpeedBar),
            OBJECT_TYPE_ITEM => Some(Self::Item),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Tag => OBJECT_TYPE_TAG,
            Self::PlainObject => OBJECT_TYPE_OBJECT,
            Self::Environment => OBJECT_TYPE_ENVIRONMENT,
            Self::Board => OBJECT_TYPE_BOARD,
            Self::Number => OBJECT_TYPE_NUMBER,
            Self::SpeedBar => OBJECT_TYPE_SPEEDBAR,
            Self::Item => OBJECT_TYPE_ITEM,
        }
    }
}

/// Trailing tokens of an `[OBJECTS]` row. A single value is a setting, two
/// values are a switch coordinate; the two never mix.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectPayload {
    #[default]
    None,
    Setting { value: i32 },
    Switch { x: f32, y: f32 },
}

impl ObjectPayload {
    /// Setting discriminant; rows without one read as 0.
    pub fn setting(&self) -> i32 {
        match self {
            Self::Setting { value } => *value,
            _ => 0,
        }
    }
}

/// Index of an object inside its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectId(pub usize);

/// Position inside the current animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationClock {
    pub frame: usize,
    pub elapsed_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub kind: ObjectKind,
    pub x: f32,
    pub y: f32,
    pub animation_set: Option<i32>,
    pub payload: ObjectPayload,
    /// Selects the animation inside the set: digit for numbers, item state
    /// for items, 0 for everything else.
    pub state: i32,
    pub clock: AnimationClock,
}

impl GameObject {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            x: 0.0,
            y: 0.0,
            animation_set: None,
            payload: ObjectPayload::None,
            state: 0,
            clock: AnimationClock::default(),
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Changing state restarts the animation.
    pub fn set_state(&mut self, state: i32) {
        if self.state != state {
            self.state = state;
            self.clock = AnimationClock::default();
        }
    }

    /// HUD digit placement.
    pub fn show_digit(&mut self, x: f32, y: f32, digit: u8) {
        self.set_position(x, y);
        self.set_state(digit as i32);
    }

    /// The animation currently playing, if the set and the entry resolve.
    pub fn current_animation<'r>(&self, resources: &'r Resources) -> Option<&'r Animation> {
        let set = resources.animation_sets.get(self.animation_set?)?;
        let index = usize::try_from(self.state).ok()?;
        let animation_id = *set.animations.get(index)?;
        resources.animations.get(animation_id)
    }

    /// Sprite id of the frame on screen right now.
    pub fn current_sprite(&self, resources: &Resources) -> Option<i32> {
        let animation = self.current_animation(resources)?;
        animation
            .frames
            .get(self.clock.frame % animation.frames.len().max(1))
            .map(|f| f.sprite)
    }

    /// Per-frame step. Every role animates the same way; siblings are
    /// visible for roles that need to look at the rest of the scene.
    pub fn update(&mut self, dt_ms: u32, _siblings: &Siblings<'_>, resources: &Resources) {
        let Some(animation) = self.current_animation(resources) else {
            return;
        };
        let frames = &animation.frames;
        if frames.is_empty() {
            return;
        }

        self.clock.frame %= frames.len();
        self.clock.elapsed_ms = self.clock.elapsed_ms.saturating_add(dt_ms);

        // zero-length frames would spin forever
        let loop_ms = frames.iter().fold(0u32, |acc, f| acc.saturating_add(f.time_ms));
        if loop_ms == 0 {
            return;
        }
        // a whole loop lands on the same frame
        self.clock.elapsed_ms %= loop_ms;

        while self.clock.elapsed_ms >= frames[self.clock.frame].time_ms {
            self.clock.elapsed_ms -= frames[self.clock.frame].time_ms;
            self.clock.frame = (self.clock.frame + 1) % frames.len();
        }
    }
}

/// Read view of every object except the one being updated, in placement
/// order. The updating object sees itself through `&mut self` instead.
#[derive(Debug, Clone, Copy)]
pub struct Siblings<'a> {
    pub before: &'a [GameObject],
    pub after: &'a [GameObject],
}

impl<'a> Siblings<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a GameObject> {
        self.before.iter().chain(self.after.iter())
    }

    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Visit every object in order, handing each the view of the others.
pub fn for_each_with_siblings(
    objects: &mut [GameObject],
    mut f: impl FnMut(&mut GameObject, &Siblings<'_>),
) {
    for i in 0..objects.len() {
        let (before, rest) = objects.split_at_mut(i);
        if let Some((current, after)) = rest.split_first_mut() {
            f(current, &Siblings { before, after });
        }
    }
}
