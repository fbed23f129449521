// ── Color ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    /// Dark slate shown through cells that draw nothing.
    pub const BACKGROUND: Self = Self([0.08, 0.09, 0.11, 1.0]);
}

// ── CanvasConfig ────────────────────────────────────────────────────────────

/// Fixed pixel size of the drawing surface.
///
/// The grid is always stretched to cover the whole canvas, so the canvas size
/// and the level dimensions together decide every tile's pixel size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Colour the canvas is cleared to before the tiles are drawn.
    pub clear_color: Color,
}

impl CanvasConfig {
    /// 750 × 563, roughly 4:3.
    pub const REFERENCE: Self = Self {
        width: 750,
        height: 563,
        clear_color: Color::BACKGROUND,
    };

    /// Panics if either side is zero.
    pub const fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "canvas size must be positive");
        Self { width, height, clear_color: Color::BACKGROUND }
    }

    /// `width / height`; `0.0` when the height is zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}
