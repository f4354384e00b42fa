pub mod svg_to_png;

pub use svg_to_png::ImageRenderer;
