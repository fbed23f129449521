pub mod gpu;
pub mod pipeline;
pub mod sprite_atlas;

use image::RgbaImage;

use crate::grid::Grid;
use crate::manifest::TileRegistry;
use crate::tiles;

pub use gpu::{FrameBatch, Renderer};

// ── Rect ────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in canvas pixels, origin top-left.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ── DrawTarget ──────────────────────────────────────────────────────────────

/// Anything that can receive tile draws for one frame.
pub trait DrawTarget {
    /// Draw `image` (registered as `name`) stretched over `rect`.
    fn draw_image(&mut self, name: &'static str, image: &RgbaImage, rect: Rect);
}

/// Draw every tile of `grid` into `target`, row by row, left to right.
///
/// Tiles whose code has no table entry, or whose name is missing from
/// `registry`, are skipped and leave their cell showing the clear colour.
/// Returns the number of draws issued.
pub fn draw_grid<T: DrawTarget + ?Sized>(
    grid: &Grid,
    registry: &TileRegistry,
    target: &mut T,
) -> usize {
    let mut drawn = 0;
    for tile in grid.tiles() {
        let Some(name) = tiles::resolve(tile.code()) else { continue };
        let Some(image) = registry.get(name) else { continue };
        target.draw_image(name, image, tile.rect());
        drawn += 1;
    }
    drawn
}

// ── DrawRecorder ────────────────────────────────────────────────────────────

/// One recorded draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub name: &'static str,
    pub rect: Rect,
}

/// Draw target that only remembers what it was asked to draw.
#[derive(Clone, Debug, Default)]
pub struct DrawRecorder {
    pub calls: Vec<DrawCall>,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl DrawTarget for DrawRecorder {
    fn draw_image(&mut self, name: &'static str, _image: &RgbaImage, rect: Rect) {
        self.calls.push(DrawCall { name, rect });
    }
}
