mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{
    DisplayTransform, DrawCommand, DrawList, Renderer, Rgba, ScreenRect, TransformError, Viewport,
    MARGIN_DIVISOR,
};
pub use scene::{InputSnapshot, Scene, Vec2};
