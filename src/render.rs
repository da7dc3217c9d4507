//! Renderer collaborator. The scene only says which sprite goes where.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawCommand {
    pub sprite: i32,
    pub texture: i32,
    pub x: f32,
    pub y: f32,
}

pub trait Renderer {
    fn draw(&mut self, cmd: DrawCommand);
}

/// Records draw commands instead of drawing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Renderer for DrawList {
    fn draw(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }
}
