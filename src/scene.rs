use std::collections::BTreeSet;
use std::path::Path;

use crate::canvas::CanvasConfig;
use crate::error::Error;
use crate::grid::Grid;
use crate::level::load_level;
use crate::manifest::{TileRegistry, load_manifest};
use crate::renderer::{DrawTarget, draw_grid};
use crate::tiles;

/// Everything a frame needs: the built grid and the decoded tile images.
///
/// Built once before the first frame and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Scene {
    grid: Grid,
    registry: TileRegistry,
}

impl Scene {
    pub fn new(grid: Grid, registry: TileRegistry) -> Self {
        report_unresolved(&grid, &registry);
        Self { grid, registry }
    }

    /// Load the manifest and level from disk and lay the level out over
    /// `canvas`.  Any failure is fatal; no partial scene is returned.
    pub fn load(
        manifest: impl AsRef<Path>,
        level: impl AsRef<Path>,
        canvas: &CanvasConfig,
    ) -> Result<Self, Error> {
        let registry = load_manifest(manifest)?;
        let level = load_level(level)?;
        let grid = Grid::build(level.lines(), canvas)?;
        tracing::info!(
            rows = grid.rows(),
            columns = grid.columns(),
            cell_width = grid.cell_size().0,
            cell_height = grid.cell_size().1,
            "grid built"
        );
        Ok(Self::new(grid, registry))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    /// Draw the whole grid into `target`.  Returns the number of tiles drawn.
    pub fn render<T: DrawTarget + ?Sized>(&self, target: &mut T) -> usize {
        draw_grid(&self.grid, &self.registry, target)
    }
}

/// Warn once per distinct code or name that will never draw, so the per-frame
/// path can stay silent.
fn report_unresolved(grid: &Grid, registry: &TileRegistry) {
    let mut unknown_codes = BTreeSet::new();
    let mut missing_images = BTreeSet::new();

    for tile in grid.tiles() {
        match tiles::resolve(tile.code()) {
            None => {
                unknown_codes.insert(tile.code());
            }
            Some(name) if !registry.contains(name) => {
                missing_images.insert(name);
            }
            Some(_) => {}
        }
    }

    for code in unknown_codes {
        tracing::warn!(?code, "unknown tile code; cells will be left blank");
    }
    for name in missing_images {
        tracing::warn!(tile = name, "tile has no image in the manifest; cells will be left blank");
    }
}
