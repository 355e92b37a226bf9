use thiserror::Error;

use crate::app::Vec2;

/// Fraction of the constraining viewport axis left empty on each side.
pub const MARGIN_DIVISOR: f32 = 16.0;
const CONTENT_FRACTION: f32 = (MARGIN_DIVISOR - 2.0) / MARGIN_DIVISOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransformError {
    #[error("viewport must have positive finite dimensions, got {width}x{height}")]
    DegenerateViewport { width: f32, height: f32 },
    #[error("room must have positive finite dimensions, got {width}x{height}")]
    DegenerateRoom { width: f32, height: f32 },
}

/// Screen-space rectangle covered by the room, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ScreenRect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Affine logical-to-screen mapping: `screen = logical * scale + offset`.
///
/// The room keeps its aspect ratio and is centered in the viewport. The axis
/// that runs out of room first gets a `1/16` margin on both ends; the other
/// axis is centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    scale: f32,
    x_offset: f32,
    y_offset: f32,
    borders: ScreenRect,
}

impl DisplayTransform {
    pub fn recompute(
        viewport_width: f32,
        viewport_height: f32,
        room_width: f32,
        room_height: f32,
    ) -> Result<Self, TransformError> {
        if !is_positive_finite(viewport_width) || !is_positive_finite(viewport_height) {
            return Err(TransformError::DegenerateViewport {
                width: viewport_width,
                height: viewport_height,
            });
        }
        if !is_positive_finite(room_width) || !is_positive_finite(room_height) {
            return Err(TransformError::DegenerateRoom {
                width: room_width,
                height: room_height,
            });
        }

        let (scale, borders) = if viewport_width / viewport_height > room_width / room_height {
            let scale = viewport_height * CONTENT_FRACTION / room_height;
            let left = (viewport_width - scale * room_width) / 2.0;
            (
                scale,
                ScreenRect {
                    left,
                    top: viewport_height / MARGIN_DIVISOR,
                    right: viewport_width - left,
                    bottom: viewport_height * (MARGIN_DIVISOR - 1.0) / MARGIN_DIVISOR,
                },
            )
        } else {
            let scale = viewport_width * CONTENT_FRACTION / room_width;
            let top = (viewport_height - scale * room_height) / 2.0;
            (
                scale,
                ScreenRect {
                    left: viewport_width / MARGIN_DIVISOR,
                    top,
                    right: viewport_width * (MARGIN_DIVISOR - 1.0) / MARGIN_DIVISOR,
                    bottom: viewport_height - top,
                },
            )
        };

        Ok(Self {
            scale,
            x_offset: borders.left,
            y_offset: borders.top,
            borders,
        })
    }

    pub fn for_viewport(
        viewport: Viewport,
        room_width: f32,
        room_height: f32,
    ) -> Result<Self, TransformError> {
        Self::recompute(
            viewport.width as f32,
            viewport.height as f32,
            room_width,
            room_height,
        )
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    pub fn y_offset(&self) -> f32 {
        self.y_offset
    }

    pub fn borders(&self) -> ScreenRect {
        self.borders
    }

    pub fn convert(&self, logical: Vec2) -> Vec2 {
        Vec2 {
            x: self.convert_x(logical.x),
            y: self.convert_y(logical.y),
        }
    }

    pub fn convert_x(&self, x: f32) -> f32 {
        x * self.scale + self.x_offset
    }

    pub fn convert_y(&self, y: f32) -> f32 {
        y * self.scale + self.y_offset
    }

    /// Lengths carry no offset.
    pub fn convert_length(&self, length: f32) -> f32 {
        length * self.scale
    }

    pub fn inverse(&self, screen: Vec2) -> Vec2 {
        Vec2 {
            x: (screen.x - self.x_offset) / self.scale,
            y: (screen.y - self.y_offset) / self.scale,
        }
    }
}

fn is_positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
