//! Resource registries keyed by integer id.
//!
//! `Resources` bundles the four stores a scene file can fill. It is owned by
//! the application and handed to every scene load, so loads that share it
//! are serialized by `&mut` access rather than by global state.

use std::collections::HashMap;

use crate::model::{Animation, AnimationSet, Sprite, Texture};

#[derive(Debug, Clone)]
pub struct Registry<T> {
    label: &'static str,
    entries: HashMap<i32, T>,
}

impl<T> Registry<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: HashMap::new(),
        }
    }

    /// Insert or replace the entry for `id`.
    pub fn add(&mut self, id: i32, value: T) {
        if self.entries.insert(id, value).is_some() {
            tracing::debug!("{} {} replaced", self.label, id);
        }
    }

    pub fn get(&self, id: i32) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &T)> {
        self.entries.iter().map(|(id, v)| (*id, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub type Textures = Registry<Texture>;
pub type Sprites = Registry<Sprite>;
pub type Animations = Registry<Animation>;
pub type AnimationSets = Registry<AnimationSet>;

#[derive(Debug, Clone)]
pub struct Resources {
    pub textures: Textures,
    pub sprites: Sprites,
    pub animations: Animations,
    pub animation_sets: AnimationSets,
}

impl Resources {
    pub fn new() -> Self {
        Self {
            textures: Registry::new("texture"),
            sprites: Registry::new("sprite"),
            animations: Registry::new("animation"),
            animation_sets: Registry::new("animation set"),
        }
    }

    /// Application teardown; scenes never call this.
    pub fn clear(&mut self) {
        self.textures.clear();
        self.sprites.clear();
        self.animations.clear();
        self.animation_sets.clear();
        tracing::info!("resources released");
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rect, Rgb};

    #[test]
    fn test_add_get_replace() {
        let mut textures = Textures::new("texture");
        assert!(textures.get(1).is_none());

        textures.add(
            1,
            Texture {
                path: "a.png".into(),
                transparent: Rgb::clamped(0, 0, 0),
            },
        );
        textures.add(
            1,
            Texture {
                path: "b.png".into(),
                transparent: Rgb::clamped(255, 0, 255),
            },
        );

        assert_eq!(textures.len(), 1);
        assert_eq!(textures.get(1).map(|t| t.path.as_path()), Some(std::path::Path::new("b.png")));
    }

    #[test]
    fn test_clear_empties_every_store() {
        let mut res = Resources::new();
        res.sprites.add(
            5,
            Sprite {
                rect: Rect { left: 0, top: 0, right: 16, bottom: 16 },
                texture: 1,
            },
        );
        res.animation_sets.add(2, AnimationSet { animations: vec![9] });
        assert!(!res.sprites.is_empty());

        res.clear();
        assert!(res.sprites.is_empty());
        assert!(res.animation_sets.is_empty());
    }
}
