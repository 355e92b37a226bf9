mod draw_list;
mod renderer;
mod transform;

pub use draw_list::{DrawCommand, DrawList, Rgba};
pub use renderer::Renderer;
pub use transform::{DisplayTransform, ScreenRect, TransformError, Viewport, MARGIN_DIVISOR};
