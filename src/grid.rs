use crate::brick::{filled_cells, BrickKind, Shape};

pub const GRID_WIDTH: usize = 10;
pub const VISIBLE_HEIGHT: usize = 20;
/// Rows above the visible field where bricks spawn.
pub const HIDDEN_ROWS: usize = 2;
pub const GRID_HEIGHT: usize = VISIBLE_HEIGHT + HIDDEN_ROWS;

pub type Row = [Option<BrickKind>; GRID_WIDTH];

/// The locked background cells. Row 0 is the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [Row; GRID_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self { cells: [[None; GRID_WIDTH]; GRID_HEIGHT] }
    }

    pub fn clear(&mut self) {
        self.cells = [[None; GRID_WIDTH]; GRID_HEIGHT];
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<BrickKind> {
        self.cells.get(y).and_then(|row| row.get(x).copied().flatten())
    }

    pub fn set(&mut self, x: usize, y: usize, value: Option<BrickKind>) {
        if x < GRID_WIDTH && y < GRID_HEIGHT {
            self.cells[y][x] = value;
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.cells
    }

    /// Fills row `y` except the columns in `holes`.
    pub fn fill_row(&mut self, y: usize, kind: BrickKind, holes: &[usize]) {
        if y >= GRID_HEIGHT {
            return;
        }
        for x in 0..GRID_WIDTH {
            self.cells[y][x] = if holes.contains(&x) { None } else { Some(kind) };
        }
    }

    /// True when any filled cell of `shape` at `(x, y)` is off the grid or
    /// on an occupied cell.
    pub fn intersects(&self, shape: &Shape, x: i32, y: i32) -> bool {
        filled_cells(shape).any(|(dx, dy)| {
            let cx = x + dx;
            let cy = y + dy;
            if cx < 0 || cx >= GRID_WIDTH as i32 || cy < 0 || cy >= GRID_HEIGHT as i32 {
                return true;
            }
            self.cells[cy as usize][cx as usize].is_some()
        })
    }

    pub fn merge(&mut self, shape: &Shape, kind: BrickKind, x: i32, y: i32) {
        for (dx, dy) in filled_cells(shape) {
            let cx = x + dx;
            let cy = y + dy;
            if cx >= 0 && cx < GRID_WIDTH as i32 && cy >= 0 && cy < GRID_HEIGHT as i32 {
                self.cells[cy as usize][cx as usize] = Some(kind);
            }
        }
    }

    pub fn full_rows(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(|cell| cell.is_some()))
            .map(|(i, _)| i)
            .collect()
    }

    /// Drops `rows` and shifts everything above them down. Returns how many
    /// rows were actually removed.
    pub fn remove_rows(&mut self, rows: &[usize]) -> usize {
        let mut kept: Vec<Row> = Vec::with_capacity(GRID_HEIGHT);
        for (i, row) in self.cells.iter().enumerate() {
            if !rows.contains(&i) {
                kept.push(*row);
            }
        }
        let removed = GRID_HEIGHT - kept.len();
        let mut cells = [[None; GRID_WIDTH]; GRID_HEIGHT];
        for (slot, row) in cells[removed..].iter_mut().zip(kept) {
            *slot = row;
        }
        self.cells = cells;
        removed
    }

    /// Number of rows from the bottom up to the highest occupied cell.
    pub fn stack_height(&self) -> usize {
        self.cells
            .iter()
            .position(|row| row.iter().any(|cell| cell.is_some()))
            .map_or(0, |top| GRID_HEIGHT - top)
    }
}
