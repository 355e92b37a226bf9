pub mod app;

pub use app::{
    run_app, AppError, DisplayTransform, DrawCommand, DrawList, InputAction, InputSnapshot,
    LoopConfig, LoopMetricsSnapshot, Renderer, Rgba, Scene, ScreenRect, TransformError, Vec2,
    Viewport, MARGIN_DIVISOR, SLOW_FRAME_ENV_VAR,
};
