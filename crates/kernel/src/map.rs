use glam::Vec2;

/// What occupies a map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Wall,
}

/// Errors from building a [`Map`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("expected {expected} cells for the map dimensions, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unrecognized map glyph {glyph:?} at row {row}, column {column}")]
    InvalidGlyph {
        glyph: char,
        row: usize,
        column: usize,
    },
}

/// Immutable occupancy grid, stored row-major: cell `(x, y)` lives at
/// `x + y * width`. Zero is empty, anything else is a wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Map {
    pub fn new(width: usize, height: usize, cells: Vec<u8>) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::ZeroDimension { width, height });
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(MapError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse rows of `#` (or `1`) for walls and `.` (or `0`, space) for
    /// empty cells. Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());

        let mut cells = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            for (column, glyph) in line.chars().enumerate() {
                cells.push(match glyph {
                    '#' | '1' => 1,
                    '.' | '0' | ' ' => 0,
                    _ => return Err(MapError::InvalidGlyph { glyph, row, column }),
                });
            }
        }
        Self::new(width, height, cells)
    }

    /// Walls on every border cell, empty inside.
    pub fn bordered(width: usize, height: usize) -> Result<Self, MapError> {
        let mut cells = vec![0; width * height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    cells[x + y * width] = 1;
                }
            }
        }
        Self::new(width, height, cells)
    }

    /// The built-in 10x6 level: a walled room with a 2x2 pillar.
    pub fn level_one() -> Self {
        #[rustfmt::skip]
        let cells = vec![
            1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
            1, 0, 0, 0, 0, 0, 0, 0, 0, 1,
            1, 0, 0, 0, 0, 1, 1, 0, 0, 1,
            1, 0, 0, 0, 0, 1, 1, 0, 0, 1,
            1, 0, 0, 0, 0, 0, 0, 0, 0, 1,
            1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
        ];
        Self {
            width: 10,
            height: 6,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Occupancy of cell `(x, y)`. Anything outside the grid reads as a
    /// wall, so a ray leaving the map always stops at its edge.
    pub fn cell_at(&self, x: i32, y: i32) -> CellKind {
        if x < 0 || y < 0 {
            return CellKind::Wall;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return CellKind::Wall;
        }
        match self.cells[x + y * self.width] {
            0 => CellKind::Empty,
            _ => CellKind::Wall,
        }
    }

    /// Occupancy of the cell containing a continuous map-space point.
    pub fn cell_containing(&self, point: Vec2) -> CellKind {
        // `as i32` saturates, and NaN becomes 0; both land on a definite cell.
        self.cell_at(point.x.floor() as i32, point.y.floor() as i32)
    }

    pub fn is_wall_at(&self, point: Vec2) -> bool {
        self.cell_containing(point) == CellKind::Wall
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::level_one()
    }
}
