/// Text up to this many characters is drawn at the largest size
pub const LARGE_TEXT_MAX_LEN: usize = 50;
/// Text up to this many characters is drawn at the medium size
pub const MEDIUM_TEXT_MAX_LEN: usize = 80;

pub const LARGE_FONT_SIZE: u32 = 24;
pub const MEDIUM_FONT_SIZE: u32 = 20;
pub const SMALL_FONT_SIZE: u32 = 16;

/// Display text together with the font size it will be drawn at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedText {
    pub text: String,
    pub font_size: u32,
}

impl RenderedText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let font_size = font_size_for(&text);
        Self { text, font_size }
    }
}

/// Pick a font size from the text length (in characters)
pub fn font_size_for(text: &str) -> u32 {
    match text.chars().count() {
        0..=LARGE_TEXT_MAX_LEN => LARGE_FONT_SIZE,
        n if n <= MEDIUM_TEXT_MAX_LEN => MEDIUM_FONT_SIZE,
        _ => SMALL_FONT_SIZE,
    }
}
