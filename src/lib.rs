pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod model;
pub mod parser;
pub mod processor;
pub mod registry;
pub mod render;
pub mod scene;
pub mod writer;

use anyhow::Context;
use clap::Parser;

use crate::config::SceneConfig;
use crate::game::Session;
use crate::registry::Resources;
use crate::render::DrawList;
use crate::scene::Scene;
use crate::scene::controller::Key;
use crate::writer::json::SceneSnapshot;

pub fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();

    // 1. ── Configure ──────────────────────────────────────────────────
    let config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    let mut session = match &args.state {
        Some(path) => Session::load(path)?,
        None => Session::default(),
    };

    // 2. ── Load ───────────────────────────────────────────────────────
    let mut resources = Resources::new();
    let mut scene = Scene::new(args.scene_id, &args.input, config);
    let report = scene
        .load(&mut resources)
        .with_context(|| format!("Loading scene {}", args.input.display()))?;

    // 3. ── Simulate ───────────────────────────────────────────────────
    for _ in 0..args.frames {
        scene.update(args.dt, &resources, &mut session);
    }
    let events: Vec<_> = args
        .keys
        .iter()
        .map(|k| scene.on_key_down(Key::from(*k).code(), &mut session))
        .collect();
    for _ in 0..args.frames {
        scene.update(args.dt, &resources, &mut session);
    }

    let mut draws = DrawList::default();
    scene.render(&resources, &mut draws);

    // 4. ── Write outputs ──────────────────────────────────────────────
    let snapshot = SceneSnapshot::capture(&scene, &report, &events, &draws, &session);
    match &args.output {
        Some(out) => writer::json::emit(&snapshot, out)
            .with_context(|| format!("Writing {}", out.display()))?,
        None => println!("{}", writer::json::to_string(&snapshot)?),
    }

    scene.unload();
    resources.clear();
    Ok(())
}
