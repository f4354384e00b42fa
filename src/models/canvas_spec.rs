/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` notation, as used in SVG attributes
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fixed canvas the time image is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    pub foreground: Rgb,
}

impl CanvasSpec {
    /// 600x200, dark slate background with white text
    pub const DEFAULT: Self = Self {
        width: 600,
        height: 200,
        background: Rgb::new(0x1a, 0x20, 0x2c),
        foreground: Rgb::new(0xff, 0xff, 0xff),
    };

    /// Horizontal center of the canvas
    pub fn center_x(&self) -> f32 {
        self.width as f32 / 2.0
    }

    /// Vertical center of the canvas
    pub fn center_y(&self) -> f32 {
        self.height as f32 / 2.0
    }
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}
