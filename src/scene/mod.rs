//! The end-of-level scene: load, per-frame update, render, unload.

pub mod controller;

use std::path::{Path, PathBuf};

use crate::config::SceneConfig;
use crate::error::{LoadReport, SceneError};
use crate::game::GameState;
use crate::model::{GameObject, ObjectId, for_each_with_siblings};
use crate::parser;
use crate::processor::hud::{self, Counter, CounterBuckets};
use crate::processor::section_parser::parse_scene;
use crate::registry::Resources;
use crate::render::{DrawCommand, Renderer};

use controller::{Key, MenuEvent};

/// Owns every object it places; the named handles and buckets are indices
/// into `objects`.
#[derive(Debug, Clone)]
pub struct Scene {
    id: i32,
    path: PathBuf,
    config: SceneConfig,
    pub(crate) objects: Vec<GameObject>,
    pub(crate) tag: Option<ObjectId>,
    pub(crate) board: Option<ObjectId>,
    pub(crate) speed_bar: Option<ObjectId>,
    pub(crate) counters: CounterBuckets,
    pub(crate) items: Vec<ObjectId>,
}

impl Scene {
    pub fn new(id: i32, path: impl Into<PathBuf>, config: SceneConfig) -> Self {
        Self {
            id,
            path: path.into(),
            config,
            objects: Vec::new(),
            tag: None,
            board: None,
            speed_bar: None,
            counters: CounterBuckets::default(),
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id.0)
    }

    pub fn tag(&self) -> Option<&GameObject> {
        self.tag.and_then(|id| self.object(id))
    }

    pub fn board(&self) -> Option<&GameObject> {
        self.board.and_then(|id| self.object(id))
    }

    pub fn speed_bar(&self) -> Option<&GameObject> {
        self.speed_bar.and_then(|id| self.object(id))
    }

    pub fn tag_id(&self) -> Option<ObjectId> {
        self.tag
    }

    pub fn board_id(&self) -> Option<ObjectId> {
        self.board
    }

    pub fn speed_bar_id(&self) -> Option<ObjectId> {
        self.speed_bar
    }

    pub fn counter(&self, counter: Counter) -> &[ObjectId] {
        self.counters.get(counter)
    }

    pub fn items(&self) -> &[ObjectId] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ─────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────

    /// Read the scene file and populate the scene and `resources`.
    pub fn load(&mut self, resources: &mut Resources) -> Result<LoadReport, SceneError> {
        tracing::info!("Start loading scene resources from {}", self.path.display());
        let lines = parser::read_lines(&self.path, self.config.max_line_len)?;
        let report = self.load_lines(lines.iter().map(String::as_str), resources);
        tracing::info!(
            "Done loading scene resources {} ({} objects, {} diagnostics)",
            self.path.display(),
            report.objects,
            report.diagnostics.len()
        );
        Ok(report)
    }

    /// Same as [`Scene::load`] for a description already in memory,
    /// including the line length bound.
    pub fn load_from_str(&mut self, src: &str, resources: &mut Resources) -> LoadReport {
        let max_len = self.config.max_line_len;
        let lines: Vec<_> = src.lines().map(|l| parser::bound_line(l, max_len)).collect();
        self.load_lines(lines.iter().map(|l| l.as_ref()), resources)
    }

    fn load_lines<'l>(
        &mut self,
        lines: impl IntoIterator<Item = &'l str>,
        resources: &mut Resources,
    ) -> LoadReport {
        if !self.is_empty() {
            tracing::debug!("scene {} reloaded without unload, dropping old objects", self.id);
            self.unload();
        }
        parse_scene(lines, resources, self)
    }

    /// Advance objects, then sync the HUD with `game`.
    pub fn update(&mut self, dt_ms: u32, resources: &Resources, game: &mut impl GameState) {
        for_each_with_siblings(&mut self.objects, |current, siblings| {
            current.update(dt_ms, siblings, resources);
        });

        for counter in Counter::ALL {
            let value = match counter {
                Counter::Coin => game.coin(),
                Counter::Time => game.time(),
                Counter::Score => game.score(),
                Counter::Life => game.lives(),
            };
            self.show_counter(counter, value);
        }

        self.show_items(game.items());

        // this scene never scrolls
        game.set_camera(0.0, 0.0);
    }

    fn show_counter(&mut self, counter: Counter, value: i32) {
        let layout = &self.config.hud;
        let bucket = self.counters.get(counter);
        let slots =
            hud::layout_counter(bucket.len(), counter.layout(layout), layout.number_width, value);

        for slot in slots {
            let id = bucket[slot.bucket_index];
            if let Some(number) = self.objects.get_mut(id.0) {
                number.show_digit(slot.x, slot.y, slot.digit);
            }
        }
    }

    fn show_items(&mut self, states: &[i32]) {
        if self.items.is_empty() {
            return;
        }
        let board_y = self.board().map(|b| b.y);
        debug_assert!(board_y.is_some(), "item strip needs a board in scene {}", self.id);
        let Some(board_y) = board_y else {
            tracing::warn!("scene {} has items but no board, item strip skipped", self.id);
            return;
        };

        let slots = hud::layout_items(self.items.len(), board_y, &self.config.hud, states);
        for (id, slot) in self.items.iter().zip(slots) {
            if let Some(item) = self.objects.get_mut(id.0) {
                item.set_state(slot.state);
                item.set_position(slot.x, slot.y);
            }
        }
    }

    /// Draw every object in placement order.
    pub fn render(&self, resources: &Resources, renderer: &mut impl Renderer) {
        for obj in &self.objects {
            let Some(sprite_id) = obj.current_sprite(resources) else {
                continue;
            };
            let Some(sprite) = resources.sprites.get(sprite_id) else {
                continue;
            };
            renderer.draw(DrawCommand {
                sprite: sprite_id,
                texture: sprite.texture,
                x: obj.x,
                y: obj.y,
            });
        }
    }

    /// Drop all objects and handles. Registries stay untouched.
    pub fn unload(&mut self) {
        self.objects.clear();
        self.tag = None;
        self.board = None;
        self.speed_bar = None;
        self.counters.clear();
        self.items.clear();

        tracing::info!("Scene {} unloaded", self.path.display());
    }

    // ─────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────

    pub fn on_key_down(&mut self, code: i32, game: &mut impl GameState) -> MenuEvent {
        let key = Key::from_code(code);
        let Some(tag) = self.tag.and_then(|id| self.objects.get_mut(id.0)) else {
            tracing::warn!("key {code:#x} pressed but scene {} has no tag", self.id);
            return MenuEvent::Ignored;
        };
        controller::handle_key_down(key, tag, &self.config.menu, &self.config.reset, game)
    }

    pub fn on_key_up(&mut self, code: i32) {
        tracing::trace!("key up {code:#x}");
    }

    /// Held-key polling hook; the end menu only reacts to key edges.
    pub fn key_state(&mut self, _pressed: &[i32]) {}
}
