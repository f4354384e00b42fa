pub mod renderer;
pub mod template_service;
pub mod time_formatter;

pub use renderer::RenderService;
pub use template_service::{TemplateError, TemplateService};
