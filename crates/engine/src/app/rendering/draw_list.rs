use serde::{Deserialize, Serialize};

use crate::app::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
}

/// Screen-space draw commands, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    FillRect {
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        color: Rgba,
    },
    /// Convex quad; corners may wind either way.
    FillQuad { corners: [Vec2; 4], color: Rgba },
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn clear_to(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn fill_rect(&mut self, left: f32, top: f32, width: f32, height: f32, color: Rgba) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.commands.push(DrawCommand::FillRect {
            left,
            top,
            width,
            height,
            color,
        });
    }

    pub fn fill_quad(&mut self, corners: [Vec2; 4], color: Rgba) {
        self.commands.push(DrawCommand::FillQuad { corners, color });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
