//! Routes a parsed `[OBJECTS]` row to its role inside the scene.

use crate::error::RowError;
use crate::model::{GameObject, MAX_ITEMS, ObjectId, ObjectKind, ObjectPayload};
use crate::registry::Resources;
use crate::scene::Scene;

use super::hud::Counter;

/// One `[OBJECTS]` row after tokenizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectRow {
    pub object_type: i32,
    pub x: f32,
    pub y: f32,
    pub animation_set: i32,
    pub payload: ObjectPayload,
}

/// Build the object for `row`, register it with the scene's handles and
/// buckets, and return its id. `Ok(None)` means the row was dropped on
/// purpose (item strip already full).
pub fn classify(
    row: &ObjectRow,
    resources: &Resources,
    scene: &mut Scene,
) -> Result<Option<ObjectId>, RowError> {
    let kind = ObjectKind::from_code(row.object_type)
        .ok_or(RowError::UnknownObjectType(row.object_type))?;

    if kind == ObjectKind::Item && scene.items.len() >= MAX_ITEMS {
        tracing::debug!("item strip full, dropping item at ({}, {})", row.x, row.y);
        return Ok(None);
    }

    let id = ObjectId(scene.objects.len());

    match kind {
        ObjectKind::Tag => scene.tag = Some(id),
        ObjectKind::Board => scene.board = Some(id),
        ObjectKind::SpeedBar => scene.speed_bar = Some(id),
        ObjectKind::Number => match Counter::from_setting(row.payload.setting()) {
            Some(counter) => scene.counters.push(counter, id),
            None => tracing::debug!(
                "number at ({}, {}) has setting {} and belongs to no counter",
                row.x,
                row.y,
                row.payload.setting()
            ),
        },
        ObjectKind::Item => scene.items.push(id),
        ObjectKind::PlainObject | ObjectKind::Environment => {}
    }

    // ── General object setup ─────────────────────────────────────────
    let mut obj = GameObject::new(kind);
    obj.set_position(row.x, row.y);
    obj.animation_set = resources
        .animation_sets
        .contains(row.animation_set)
        .then_some(row.animation_set);
    obj.payload = row.payload;
    scene.objects.push(obj);

    Ok(Some(id))
}
