use crate::assets::AssetLoader;
use serde::{Deserialize, Deserializer, Serialize};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Preferred font family for the rendered time text
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// How often the page refreshes its clock, in seconds (at least 1)
    #[serde(
        default = "default_refresh_seconds",
        deserialize_with = "deserialize_refresh_seconds"
    )]
    pub refresh_seconds: u32,

    /// Timezones offered by the picker on the index page
    #[serde(default = "default_timezones")]
    pub timezones: Vec<TimezonePreset>,
}

/// A labelled timezone shown in the picker
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TimezonePreset {
    /// Human readable label, e.g. "London, UK (GMT+0)"
    pub label: String,
    /// IANA timezone identifier, e.g. "Europe/London"
    pub value: String,
}

impl TimezonePreset {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

fn default_refresh_seconds() -> u32 {
    60
}

/// A zero interval would make the page poll the server in a tight loop
fn deserialize_refresh_seconds<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = u32::deserialize(deserializer)?;
    if seconds == 0 {
        tracing::warn!("refresh_seconds must be at least 1, using 1");
    }
    Ok(seconds.max(1))
}

fn default_timezones() -> Vec<TimezonePreset> {
    [
        ("International Date Line West (GMT-12)", "Etc/GMT-12"),
        ("Nome, USA (GMT-11)", "America/Nome"),
        ("Hawaii, USA (GMT-10)", "Pacific/Honolulu"),
        ("Anchorage, USA (GMT-9)", "America/Anchorage"),
        ("Los Angeles, USA (GMT-8)", "America/Los_Angeles"),
        ("Phoenix, USA (GMT-7)", "America/Phoenix"),
        ("Mexico City, Mexico (GMT-6)", "America/Mexico_City"),
        ("New York, USA (GMT-5)", "America/New_York"),
        ("Caracas, Venezuela (GMT-4)", "America/Caracas"),
        (
            "Buenos Aires, Argentina (GMT-3)",
            "America/Argentina/Buenos_Aires",
        ),
        ("Azores, Portugal (GMT-2)", "Atlantic/Azores"),
        ("London, UK (GMT+0)", "Europe/London"),
        ("Paris, France (GMT+1)", "Europe/Paris"),
        ("Cairo, Egypt (GMT+2)", "Africa/Cairo"),
        ("Moscow, Russia (GMT+3)", "Europe/Moscow"),
        ("Dubai, UAE (GMT+4)", "Asia/Dubai"),
        ("Karachi, Pakistan (GMT+5)", "Asia/Karachi"),
        ("Delhi, India (GMT+5:30)", "Asia/Kolkata"),
        ("Dhaka, Bangladesh (GMT+6)", "Asia/Dhaka"),
        ("Bangkok, Thailand (GMT+7)", "Asia/Bangkok"),
        ("Singapore (GMT+8)", "Asia/Singapore"),
        ("Seoul, South Korea (GMT+9)", "Asia/Seoul"),
        ("Sydney, Australia (GMT+10)", "Australia/Sydney"),
        ("Auckland, New Zealand (GMT+12)", "Pacific/Auckland"),
    ]
    .into_iter()
    .map(|(label, value)| TimezonePreset::new(label, value))
    .collect()
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        font_family = %config.font_family,
                        timezones = config.timezones.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            refresh_seconds: default_refresh_seconds(),
            timezones: default_timezones(),
        }
    }
}
