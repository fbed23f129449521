use crate::canvas::CanvasConfig;
use crate::error::MalformedLevel;
use crate::renderer::Rect;

// ── Tile ────────────────────────────────────────────────────────────────────

/// One grid cell.  Immutable once the grid is built.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tile {
    code: char,
    x: u32,
    y: u32,
    width: f32,
    height: f32,
}

impl Tile {
    /// Raw character from the level file.
    pub fn code(&self) -> char { self.code }
    /// Column index.
    pub fn x(&self) -> u32 { self.x }
    /// Row index.
    pub fn y(&self) -> u32 { self.y }
    pub fn width(&self) -> f32 { self.width }
    pub fn height(&self) -> f32 { self.height }

    /// Canvas-space rectangle covered by this tile.
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x as f32 * self.width,
            y: self.y as f32 * self.height,
            width: self.width,
            height: self.height,
        }
    }
}

// ── Grid ────────────────────────────────────────────────────────────────────

/// Rectangular arrangement of tiles, indexed `[row][column]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Tile>>,
    columns: usize,
    cell_width: f32,
    cell_height: f32,
}

impl Grid {
    /// Lay `lines` out over `canvas`.
    ///
    /// Row count comes from the number of lines and column count from the
    /// characters in the first line; every other line must match it.
    pub fn build<S: AsRef<str>>(
        lines: &[S],
        canvas: &CanvasConfig,
    ) -> Result<Self, MalformedLevel> {
        let first = lines.first().ok_or(MalformedLevel::Empty)?;
        let columns = first.as_ref().chars().count();
        if columns == 0 {
            return Err(MalformedLevel::NoColumns);
        }

        let cell_width = canvas.width as f32 / columns as f32;
        let cell_height = canvas.height as f32 / lines.len() as f32;

        let mut rows = Vec::with_capacity(lines.len());
        for (y, line) in lines.iter().enumerate() {
            let row: Vec<Tile> = line
                .as_ref()
                .chars()
                .enumerate()
                .map(|(x, code)| Tile {
                    code,
                    x: x as u32,
                    y: y as u32,
                    width: cell_width,
                    height: cell_height,
                })
                .collect();
            if row.len() != columns {
                return Err(MalformedLevel::Ragged { row: y, expected: columns, found: row.len() });
            }
            rows.push(row);
        }

        Ok(Self { rows, columns, cell_width, cell_height })
    }

    pub fn rows(&self) -> usize { self.rows.len() }
    pub fn columns(&self) -> usize { self.columns }

    /// `(width, height)` shared by every cell.
    pub fn cell_size(&self) -> (f32, f32) {
        (self.cell_width, self.cell_height)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        self.rows.get(y)?.get(x)
    }

    pub fn row(&self, y: usize) -> Option<&[Tile]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    /// All tiles in row-major order: row 0 left to right, then row 1, ...
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.rows.iter().flatten()
    }
}
