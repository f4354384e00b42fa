use crate::error::RenderError;
use crate::models::{CanvasSpec, RenderedText};
use crate::services::TemplateService;
use fontdb::Family;
use resvg::usvg::{self, Transform};
use std::io::Cursor;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Generic CSS families; `with_fonts` points each of them at an installed face
const GENERIC_FAMILIES: &[&str] = &["serif", "sans-serif", "monospace", "cursive", "fantasy"];

/// Family used when the configured one is not installed
const FALLBACK_FAMILY: &str = "sans-serif";

/// Renders a line of text onto a fixed canvas and encodes it as PNG.
///
/// The text is laid out as SVG markup (see `templates/time.svg`) and
/// rasterized with resvg. The font database is built once at construction
/// and only read afterwards, so one renderer can serve concurrent requests.
pub struct ImageRenderer {
    /// Font database for text rendering
    fontdb: Arc<fontdb::Database>,
    templates: Arc<TemplateService>,
    font_family: String,
}

impl ImageRenderer {
    /// Create a new renderer with fonts loaded from the provided data
    ///
    /// `font_family` is used when it names a generic family or one of the
    /// loaded faces; otherwise rendering falls back to `sans-serif`.
    pub fn with_fonts(
        fonts: Vec<(String, std::borrow::Cow<'static, [u8]>)>,
        font_family: &str,
        templates: Arc<TemplateService>,
    ) -> Result<Self, RenderError> {
        let mut fontdb = fontdb::Database::new();

        for (name, data) in fonts {
            fontdb.load_font_data(data.into_owned());
            tracing::debug!(font = %name, "Loaded font");
        }

        // Load system fonts as fallback
        fontdb.load_system_fonts();

        tracing::info!(
            font_count = fontdb.len(),
            "Loaded fonts for text rendering"
        );

        if fontdb.is_empty() {
            tracing::warn!("No fonts available, images will contain the background only");
        } else {
            map_generic_families(&mut fontdb);
        }

        let font_family = resolve_family(&fontdb, font_family);

        Ok(Self {
            fontdb: Arc::new(fontdb),
            templates,
            font_family,
        })
    }

    /// Create a new renderer with no custom fonts (system fonts only)
    pub fn new() -> Result<Self, RenderError> {
        let templates =
            TemplateService::new().map_err(|e| RenderError::Template(e.to_string()))?;
        Self::with_fonts(Vec::new(), FALLBACK_FAMILY, Arc::new(templates))
    }

    /// Family the text is drawn with
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Number of font faces available for drawing text
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Render `text` centered on the canvas and encode it as an opaque RGB PNG.
    pub fn render(&self, text: &str, spec: CanvasSpec) -> Result<Vec<u8>, RenderError> {
        let rendered = RenderedText::new(text);

        tracing::debug!(
            text = %rendered.text,
            font_size = rendered.font_size,
            "Rendering time image"
        );

        let svg = self
            .templates
            .render_time_svg(&rendered, &spec, &self.font_family)
            .map_err(|e| RenderError::Template(e.to_string()))?;
        tracing::trace!(svg = %svg, "Generated SVG");

        let pixmap = self.rasterize_svg(svg.as_bytes(), spec)?;

        let rgb: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue()]
            })
            .collect();

        let png_bytes = encode_png(spec, &rgb)?;

        // Re-compress losslessly; keep the fast encoding if that fails
        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                optimize_alpha: false,
                ..Default::default()
            },
        )
        .unwrap_or(png_bytes);

        Ok(optimized)
    }

    /// Parse and rasterize SVG onto a pixmap pre-filled with the background
    fn rasterize_svg(&self, svg_data: &[u8], spec: CanvasSpec) -> Result<Pixmap, RenderError> {
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_family: self.font_family.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg_data, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let svg_size = tree.size();
        let scale_x = spec.width as f32 / svg_size.width();
        let scale_y = spec.height as f32 / svg_size.height();
        let scale = scale_x.min(scale_y);

        let scaled_width = svg_size.width() * scale;
        let scaled_height = svg_size.height() * scale;
        let offset_x = (spec.width as f32 - scaled_width) / 2.0;
        let offset_y = (spec.height as f32 - scaled_height) / 2.0;

        let mut pixmap =
            Pixmap::new(spec.width, spec.height).ok_or(RenderError::PixmapAllocation)?;
        let bg = spec.background;
        pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));

        let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

/// Point every generic family at a face that is actually installed.
///
/// fontdb's default names for the generic families are often not installed,
/// and usvg silently drops text set in a family it cannot find.
fn map_generic_families(fontdb: &mut fontdb::Database) {
    let mut installed: Vec<String> = fontdb
        .faces()
        .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .collect();
    installed.sort();
    installed.dedup();

    let sans = pick_family(&installed, |n| n.contains("sans") && !n.contains("mono"));
    let serif = pick_family(&installed, |n| n.contains("serif") && !n.contains("sans"));
    let mono = pick_family(&installed, |n| n.contains("mono"));

    let generics: [(Family, Option<&String>, fn(&mut fontdb::Database, String)); 5] = [
        (Family::SansSerif, sans, fontdb::Database::set_sans_serif_family::<String>),
        (Family::Serif, serif, fontdb::Database::set_serif_family::<String>),
        (Family::Monospace, mono, fontdb::Database::set_monospace_family::<String>),
        (Family::Cursive, None, fontdb::Database::set_cursive_family::<String>),
        (Family::Fantasy, None, fontdb::Database::set_fantasy_family::<String>),
    ];

    for (generic, preferred, set_family) in generics {
        let current = fontdb.family_name(&generic).to_string();
        if is_installed(fontdb, &current) {
            continue;
        }
        let Some(replacement) = preferred.or(sans).or(installed.first()).cloned() else {
            continue;
        };
        tracing::debug!(
            generic = ?generic,
            default = %current,
            family = %replacement,
            "Mapped generic font family"
        );
        set_family(fontdb, replacement);
    }
}

fn pick_family(installed: &[String], matches: impl Fn(&str) -> bool) -> Option<&String> {
    installed
        .iter()
        .find(|name| matches(&name.to_ascii_lowercase()))
}

fn is_installed(fontdb: &fontdb::Database, family: &str) -> bool {
    fontdb.faces().any(|face| {
        face.families
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(family))
    })
}

/// Keep `requested` if fontdb can satisfy it, otherwise fall back
fn resolve_family(fontdb: &fontdb::Database, requested: &str) -> String {
    let requested = requested.trim();
    if GENERIC_FAMILIES
        .iter()
        .any(|g| g.eq_ignore_ascii_case(requested))
    {
        return requested.to_string();
    }

    if is_installed(fontdb, requested) {
        requested.to_string()
    } else {
        tracing::warn!(
            requested = %requested,
            fallback = FALLBACK_FAMILY,
            "Font family not available, using fallback"
        );
        FALLBACK_FAMILY.to_string()
    }
}

fn encode_png(spec: CanvasSpec, rgb: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, spec.width, spec.height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
