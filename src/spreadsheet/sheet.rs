use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::grid::RawGrid;

/// Represents a worksheet while its cells are being read.
/// Cells keep their absolute position: column A is index 0, row 1 is index 0.
pub(crate) struct Sheet {
    /// Source file name
    pub(crate) file_name: String,
    /// Sheet name
    pub(crate) name: String,
    /// Populated cells, grown on demand
    rows: Vec<Vec<Cell>>,
    /// Number of non-empty cells pushed
    pub(crate) cell_count: usize,
    /// Last populated row and column
    pub(crate) row_upper_bound: Option<usize>,
    pub(crate) col_upper_bound: Option<usize>,
}

impl Sheet {
    pub(crate) fn new(file_name: &str, name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            rows: Vec::new(),
            cell_count: 0,
            row_upper_bound: None,
            col_upper_bound: None,
        }
    }

    /// Stores a cell at its position. Empty cells are ignored.
    pub(crate) fn push(&mut self, row: usize, col: usize, cell: Cell) {
        if cell.is_empty() {
            return;
        }
        self.update_bound(row, col);
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, Cell::Empty);
        }
        cells[col] = cell;
        self.cell_count += 1;
    }

    /// Updates the data range boundaries based on cell positions.
    fn update_bound(&mut self, row: usize, col: usize) {
        if self.row_upper_bound.map(|upper| upper < row).unwrap_or(true) {
            self.row_upper_bound = Some(row);
        }
        if self.col_upper_bound.map(|upper| upper < col).unwrap_or(true) {
            self.col_upper_bound = Some(col);
        }
    }

    /// Materialises the sheet as a dense grid starting at A1.
    pub(crate) fn into_grid(self) -> RawGrid {
        RawGrid::new(self.rows)
    }
}
