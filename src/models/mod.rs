pub mod canvas_spec;
pub mod config;
pub mod rendered_text;

pub use canvas_spec::{CanvasSpec, Rgb};
pub use config::{AppConfig, TimezonePreset};
pub use rendered_text::{font_size_for, RenderedText};
