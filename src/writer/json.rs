//! Dump a scene, what it drew and the resulting game state as JSON.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::LoadReport;
use crate::game::Session;
use crate::model::{ObjectId, ObjectKind, ObjectPayload};
use crate::processor::hud::Counter;
use crate::render::DrawList;
use crate::scene::Scene;
use crate::scene::controller::MenuEvent;

#[derive(Debug, Serialize)]
pub struct ObjectView {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub x: f32,
    pub y: f32,
    pub state: i32,
    pub animation_set: Option<i32>,
    pub payload: ObjectPayload,
}

#[derive(Debug, Serialize)]
pub struct CounterView<'a> {
    pub coin: &'a [ObjectId],
    pub time: &'a [ObjectId],
    pub score: &'a [ObjectId],
    pub life: &'a [ObjectId],
}

#[derive(Debug, Serialize)]
pub struct SceneSnapshot<'a> {
    pub scene: i32,
    pub path: String,
    pub objects: Vec<ObjectView>,
    pub tag: Option<ObjectId>,
    pub board: Option<ObjectId>,
    pub speed_bar: Option<ObjectId>,
    pub counters: CounterView<'a>,
    pub items: &'a [ObjectId],
    pub diagnostics: Vec<String>,
    pub events: &'a [MenuEvent],
    pub draws: &'a DrawList,
    pub session: &'a Session,
}

impl<'a> SceneSnapshot<'a> {
    pub fn capture(
        scene: &'a Scene,
        report: &LoadReport,
        events: &'a [MenuEvent],
        draws: &'a DrawList,
        session: &'a Session,
    ) -> Self {
        let objects = scene
            .objects()
            .iter()
            .enumerate()
            .map(|(i, o)| ObjectView {
                id: ObjectId(i),
                kind: o.kind,
                x: o.x,
                y: o.y,
                state: o.state,
                animation_set: o.animation_set,
                payload: o.payload,
            })
            .collect();

        Self {
            scene: scene.id(),
            path: scene.path().display().to_string(),
            objects,
            tag: scene.tag_id(),
            board: scene.board_id(),
            speed_bar: scene.speed_bar_id(),
            counters: CounterView {
                coin: scene.counter(Counter::Coin),
                time: scene.counter(Counter::Time),
                score: scene.counter(Counter::Score),
                life: scene.counter(Counter::Life),
            },
            items: scene.items(),
            diagnostics: report.diagnostics.iter().map(ToString::to_string).collect(),
            events,
            draws,
            session,
        }
    }
}

pub fn to_string(snapshot: &SceneSnapshot<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

pub fn emit(snapshot: &SceneSnapshot<'_>, out: &Path) -> io::Result<()> {
    let json = to_string(snapshot)?;
    fs::write(out, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::registry::Resources;
    use serde_json::Value;

    #[test]
    fn test_snapshot_shape() {
        let mut res = Resources::new();
        let mut scene = Scene::new(5, "end.txt", SceneConfig::default());
        let report = scene.load_from_str("[OBJECTS]\n0 140 102 1\n22 0 0 1 3\n99 0 0 1\n", &mut res);
        let session = Session::default();
        let draws = DrawList::default();
        let events = [MenuEvent::Ignored];

        let snapshot = SceneSnapshot::capture(&scene, &report, &events, &draws, &session);
        let json: Value = serde_json::from_str(&to_string(&snapshot).unwrap()).unwrap();

        assert_eq!(json["scene"], 5);
        assert_eq!(json["tag"], 0);
        assert_eq!(json["objects"][0]["kind"], "Tag");
        assert_eq!(json["objects"][1]["payload"]["type"], "setting");
        assert_eq!(json["objects"][1]["payload"]["value"], 3);
        assert_eq!(json["counters"]["life"], serde_json::json!([1]));
        assert_eq!(json["board"], Value::Null);
        assert_eq!(json["events"][0], "ignored");
        assert!(json["draws"].as_array().unwrap().is_empty());
        assert!(json["diagnostics"]
            .as_array()
            .unwrap()
            .iter()
            .any(|d| d.as_str() == Some("line 4: invalid object type: 99")));
    }

    #[test]
    fn test_emit_writes_file() {
        let mut res = Resources::new();
        let mut scene = Scene::new(5, "end.txt", SceneConfig::default());
        let report = scene.load_from_str("[OBJECTS]\n16 0 0 1\n", &mut res);
        let session = Session::default();
        let draws = DrawList::default();
        let snapshot = SceneSnapshot::capture(&scene, &report, &[], &draws, &session);

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("scene.json");
        emit(&snapshot, &out).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.contains("\"Board\""));
    }
}
