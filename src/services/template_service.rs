use tera::{Context, Tera};

use crate::assets::AssetLoader;
use crate::models::{AppConfig, CanvasSpec, RenderedText};

/// SVG markup for the time image
pub const TIME_TEMPLATE: &str = "time.svg";
/// Index page with the timezone picker
pub const INDEX_TEMPLATE: &str = "index.html";

/// Error type for template rendering
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),
}

/// Service for rendering the embedded Tera templates
///
/// Both templates are autoescaped, so user supplied text cannot break out of
/// the SVG or HTML markup.
pub struct TemplateService {
    tera: Tera,
}

impl TemplateService {
    /// Create a new template service from the embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".svg", ".html"]);
        for name in [TIME_TEMPLATE, INDEX_TEMPLATE] {
            let content = AssetLoader::read_template(name)?;
            tera.add_raw_template(name, &content)?;
        }

        tracing::debug!(
            templates = tera.get_template_names().count(),
            "Template service initialized"
        );

        Ok(Self { tera })
    }

    /// Render the SVG document for one line of text on the given canvas
    pub fn render_time_svg(
        &self,
        rendered: &RenderedText,
        spec: &CanvasSpec,
        font_family: &str,
    ) -> Result<String, TemplateError> {
        let mut context = Context::new();
        context.insert("width", &spec.width);
        context.insert("height", &spec.height);
        context.insert("x", &spec.center_x());
        context.insert("y", &spec.center_y());
        context.insert("background", &spec.background.to_hex());
        context.insert("foreground", &spec.foreground.to_hex());
        context.insert("font_size", &rendered.font_size);
        context.insert("font_family", font_family);
        context.insert("text", &rendered.text);

        Ok(self.tera.render(TIME_TEMPLATE, &context)?)
    }

    /// Render the index page
    pub fn render_index(&self, config: &AppConfig) -> Result<String, TemplateError> {
        let mut context = Context::new();
        context.insert("timezones", &config.timezones);
        context.insert("refresh_seconds", &config.refresh_seconds.max(1));

        Ok(self.tera.render(INDEX_TEMPLATE, &context)?)
    }
}
