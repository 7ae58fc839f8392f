use crate::spreadsheet::cell::Cell;

static EMPTY: Cell = Cell::Empty;

/// A sheet read with no header interpretation: row 0 is data.
///
/// Rows are padded with `Cell::Empty` to a common width when the grid is built,
/// so merged-cell artifacts (rows that stop early) read the same as blanks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawGrid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl RawGrid {
    /// Builds a grid from ragged rows.
    pub fn new(mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in rows.iter_mut() {
            row.resize(width, Cell::Empty);
        }
        RawGrid { rows, width }
    }

    /// Number of columns of every row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at (row, col); positions outside the grid read as empty.
    pub fn get(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY)
    }

    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|cells| cells.get_mut(col))
    }
}
