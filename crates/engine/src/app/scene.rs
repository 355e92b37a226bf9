use std::ops::{Add, Mul, Sub};

use super::input::{ActionStates, InputAction};
use super::rendering::{DrawList, Viewport};

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    next_room_pressed: bool,
    actions: ActionStates,
    cursor_position_px: Option<Vec2>,
    pointer_down: bool,
    window_width: u32,
    window_height: u32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        next_room_pressed: bool,
        actions: ActionStates,
        cursor_position_px: Option<Vec2>,
        pointer_down: bool,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        Self {
            quit_requested,
            next_room_pressed,
            actions,
            cursor_position_px,
            pointer_down,
            window_width,
            window_height,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn next_room_pressed(&self) -> bool {
        self.next_room_pressed
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_next_room_pressed(mut self, next_room_pressed: bool) -> Self {
        self.next_room_pressed = next_room_pressed;
        self
    }

    pub fn with_cursor_position_px(mut self, cursor_position_px: Option<Vec2>) -> Self {
        self.cursor_position_px = cursor_position_px;
        self
    }

    pub fn with_pointer_down(mut self, pointer_down: bool) -> Self {
        self.pointer_down = pointer_down;
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_width = window_size.0;
        self.window_height = window_size.1;
        self
    }

    pub fn cursor_position_px(&self) -> Option<Vec2> {
        self.cursor_position_px
    }

    pub fn pointer_down(&self) -> bool {
        self.pointer_down
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// `None` until the window has reported a non-empty size.
    pub fn viewport(&self) -> Option<Viewport> {
        if self.window_width == 0 || self.window_height == 0 {
            return None;
        }
        Some(Viewport {
            width: self.window_width,
            height: self.window_height,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// A scene owns all of its simulation state. The loop drives it with fixed
/// ticks and asks it for a draw list once per presented frame.
pub trait Scene {
    fn load(&mut self, viewport: Viewport);
    /// Called as soon as the window surface changes size, before the next render.
    fn resize(&mut self, viewport: Viewport);
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot);
    fn render(&self, draw_list: &mut DrawList);
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
}
