mod canvas;
mod theme;

pub use canvas::{CanvasComposer, RenderError, render_png, render_to_surface};
pub use theme::Theme;
