//! Asset loading with embedded fallbacks
//!
//! This module provides a unified interface for loading assets (fonts, config,
//! templates) with the following behavior:
//!
//! - If an env var is NOT set: use embedded assets only (no filesystem access)
//! - If an env var IS set and the path has files: use filesystem with embedded fallback
//!
//! Templates are always embedded.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded font assets
#[derive(RustEmbed)]
#[folder = "fonts/"]
#[include = "*.ttf"]
#[include = "*.otf"]
#[include = "*.woff"]
#[include = "*.woff2"]
struct EmbeddedFonts;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Embedded tera templates (SVG markup and the index page)
#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Asset category for listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Fonts,
    Templates,
}

/// Asset loader with merge behavior and optional filesystem override
pub struct AssetLoader {
    /// External fonts directory (from FONTS_DIR env var)
    fonts_dir: Option<PathBuf>,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(fonts_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            fonts_dir,
            config_file,
        }
    }

    /// Create an asset loader from the FONTS_DIR and CONFIG_FILE env vars
    pub fn from_env() -> Self {
        let fonts_dir = std::env::var("FONTS_DIR").ok().map(PathBuf::from);
        let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
        Self::new(fonts_dir, config_file)
    }

    pub fn fonts_dir(&self) -> Option<&PathBuf> {
        self.fonts_dir.as_ref()
    }

    pub fn config_file(&self) -> Option<&PathBuf> {
        self.config_file.as_ref()
    }

    /// Get all font data (for loading into fontdb)
    ///
    /// Returns a merged list: external fonts override embedded fonts with the same name.
    pub fn get_fonts(&self) -> Vec<(String, Cow<'static, [u8]>)> {
        let mut fonts = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        // External fonts first (they take priority)
        if let Some(ref dir) = self.fonts_dir {
            match fs::read_dir(dir) {
                Ok(entries) => {
                    for entry in entries.flatten() {
                        let path = entry.path();
                        let is_font = path.extension().and_then(|e| e.to_str()).is_some_and(
                            |ext| matches!(ext, "ttf" | "otf" | "woff" | "woff2"),
                        );
                        if !is_font {
                            continue;
                        }
                        match fs::read(&path) {
                            Ok(data) => {
                                let name = entry.file_name().to_string_lossy().to_string();
                                tracing::trace!(font = %name, "Loading font from filesystem");
                                seen.insert(name.clone());
                                fonts.push((name, Cow::Owned(data)));
                            }
                            Err(e) => {
                                tracing::warn!(path = %path.display(), %e, "Failed to read font");
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), %e, "Fonts directory unavailable");
                }
            }
        }

        // Embedded fonts (if not overridden)
        for file in EmbeddedFonts::iter() {
            let name = file.to_string();
            if !seen.contains(&name) {
                if let Some(data) = EmbeddedFonts::get(&name) {
                    tracing::trace!(font = %name, "Loading font from embedded assets");
                    fonts.push((name, data.data));
                }
            }
        }

        fonts
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read an embedded template as a UTF-8 string
    pub fn read_template(name: &str) -> io::Result<String> {
        let file = EmbeddedTemplates::get(name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Template not found: {name}"),
            )
        })?;
        String::from_utf8(file.data.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Fonts => EmbeddedFonts::iter().map(|s| s.to_string()).collect(),
            AssetCategory::Templates => {
                EmbeddedTemplates::iter().map(|s| s.to_string()).collect()
            }
        }
    }
}
