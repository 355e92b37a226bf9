use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::Vec2;

use super::{DrawCommand, DrawList, Rgba, Viewport};

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);
        let pixels = Self::build_pixels(Arc::clone(&window), width, height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport { width, height },
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub fn render(&mut self, draw_list: &DrawList) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }
        rasterize(
            self.pixels.frame_mut(),
            self.viewport.width,
            self.viewport.height,
            draw_list,
        );
        self.pixels.render()
    }
}

pub(crate) fn rasterize(frame: &mut [u8], width: u32, height: u32, draw_list: &DrawList) {
    for command in draw_list.commands() {
        match command {
            DrawCommand::Clear(color) => fill_frame(frame, *color),
            DrawCommand::FillRect {
                left,
                top,
                width: rect_width,
                height: rect_height,
                color,
            } => fill_rect_clipped(
                frame,
                width,
                height,
                *left,
                *top,
                *rect_width,
                *rect_height,
                *color,
            ),
            DrawCommand::FillQuad { corners, color } => {
                fill_quad_clipped(frame, width, height, corners, *color)
            }
        }
    }
}

fn fill_frame(frame: &mut [u8], color: Rgba) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&color.0);
    }
}

#[allow(clippy::too_many_arguments)]
fn fill_rect_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    left: f32,
    top: f32,
    rect_width: f32,
    rect_height: f32,
    color: Rgba,
) {
    let x_start = first_covered_px(left, width);
    let x_end = first_covered_px(left + rect_width, width);
    let y_start = first_covered_px(top, height);
    let y_end = first_covered_px(top + rect_height, height);
    for y in y_start..y_end {
        fill_span(frame, width, y, x_start, x_end, color);
    }
}

/// Scanline fill sampled at pixel centres.
fn fill_quad_clipped(frame: &mut [u8], width: u32, height: u32, corners: &[Vec2; 4], color: Rgba) {
    if corners.iter().any(|corner| !corner.is_finite()) {
        return;
    }
    let min_y = corners.iter().map(|c| c.y).fold(f32::INFINITY, f32::min);
    let max_y = corners.iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max);
    let y_start = clamp_px(min_y.floor(), height);
    let y_end = clamp_px(max_y.ceil(), height);

    for y in y_start..y_end {
        let sample_y = y as f32 + 0.5;
        let mut span: Option<(f32, f32)> = None;
        for index in 0..corners.len() {
            let a = corners[index];
            let b = corners[(index + 1) % corners.len()];
            let crosses =
                (a.y <= sample_y && b.y > sample_y) || (b.y <= sample_y && a.y > sample_y);
            if !crosses {
                continue;
            }
            let x = a.x + (sample_y - a.y) * (b.x - a.x) / (b.y - a.y);
            span = Some(match span {
                Some((lo, hi)) => (lo.min(x), hi.max(x)),
                None => (x, x),
            });
        }
        let Some((lo, hi)) = span else {
            continue;
        };
        let x_start = first_covered_px(lo, width);
        let x_end = first_covered_px(hi, width);
        fill_span(frame, width, y, x_start, x_end, color);
    }
}

fn fill_span(frame: &mut [u8], width: u32, y: u32, x_start: u32, x_end: u32, color: Rgba) {
    for x in x_start..x_end {
        write_pixel_rgba_clipped(frame, width as usize, x as usize, y as usize, color);
    }
}

/// Index of the first pixel whose centre lies at or after `edge`.
fn first_covered_px(edge: f32, limit: u32) -> u32 {
    clamp_px((edge - 0.5).ceil(), limit)
}

fn clamp_px(value: f32, limit: u32) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value as u32).min(limit)
}

fn write_pixel_rgba_clipped(frame: &mut [u8], width: usize, x: usize, y: usize, color: Rgba) {
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    frame[byte_offset..end].copy_from_slice(&color.0);
}
