use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::assets::AssetLoader;
use crate::error::{ApiError, RenderError};
use crate::models::{AppConfig, CanvasSpec};
use crate::rendering::ImageRenderer;
use crate::services::{time_formatter, TemplateService};

/// High-level render service that combines time formatting and rendering
pub struct RenderService {
    image_renderer: Arc<ImageRenderer>,
    spec: CanvasSpec,
}

impl RenderService {
    /// Build the renderer from the loader's fonts, drawing SVG markup with `templates`
    pub fn new(
        asset_loader: &AssetLoader,
        config: &AppConfig,
        templates: Arc<TemplateService>,
    ) -> Result<Self, RenderError> {
        let renderer =
            ImageRenderer::with_fonts(asset_loader.get_fonts(), &config.font_family, templates)?;
        Ok(Self {
            image_renderer: Arc::new(renderer),
            spec: CanvasSpec::DEFAULT,
        })
    }

    /// Canvas every image is drawn on
    pub fn spec(&self) -> CanvasSpec {
        self.spec
    }

    /// Render the time in `timezone` at instant `now` as PNG
    ///
    /// Uses spawn_blocking to avoid blocking the async runtime during
    /// CPU-intensive rasterization and PNG compression.
    pub async fn render_time(
        &self,
        timezone: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<u8>, ApiError> {
        let text = time_formatter::display_text(timezone, now)?;
        self.render_in_blocking_context(text).await
    }

    /// Same as [`render_time`](Self::render_time) without an async runtime
    pub fn render_time_blocking(
        &self,
        timezone: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<u8>, ApiError> {
        let text = time_formatter::display_text(timezone, now)?;
        Ok(self.image_renderer.render(&text, self.spec)?)
    }

    /// Execute CPU-intensive rendering in a blocking context
    async fn render_in_blocking_context(&self, text: String) -> Result<Vec<u8>, ApiError> {
        let renderer = self.image_renderer.clone();
        let spec = self.spec;

        let png = tokio::task::spawn_blocking(move || renderer.render(&text, spec))
            .await
            .map_err(|e| ApiError::Internal(format!("Render task failed: {e}")))??;

        Ok(png)
    }
}
