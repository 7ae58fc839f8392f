//! # Table Normalization
//!
//! Turns the raw grid of the chronology sheet into one [`YearRecord`] per
//! calendar year.
//!
//! Hierarchy columns (元, 会, 运, 世, 旬) are authored once per group and left
//! blank on the rows that follow, which is how merged cells come out of a
//! spreadsheet export. Forward-filling those columns restores each row's
//! group labels. Rows whose year column is blank or not a whole number
//! (titles, section headers, spacer rows) are part of the sheet's normal
//! shape and are dropped without error.
pub mod yun;

use crate::error::MappingError;
use crate::spreadsheet::Cell;
use crate::spreadsheet::RawGrid;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;
use tracing::trace;
use yun::YunLabel;

/// Column index of each field, 0-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub year: usize,
    pub ganzhi: usize,
    pub nian_hexagram: usize,
    pub dynasty: usize,
    pub person: usize,
    pub yuan: usize,
    pub hui: usize,
    pub yun: usize,
    pub shi: usize,
    pub xun: usize,
}

impl Default for ColumnMap {
    /// Layout of the 皇极经世推步 workbook.
    fn default() -> Self {
        ColumnMap {
            yuan: 1,
            hui: 2,
            yun: 5,
            shi: 6,
            xun: 7,
            nian_hexagram: 8,
            ganzhi: 9,
            year: 10,
            dynasty: 11,
            person: 12,
        }
    }
}

impl ColumnMap {
    /// Hierarchy columns from outermost to innermost grouping level.
    pub fn hierarchy(&self) -> [usize; 5] {
        [self.yuan, self.hui, self.yun, self.shi, self.xun]
    }

    fn fields(&self) -> [(&'static str, usize); 10] {
        [
            ("year", self.year),
            ("ganzhi", self.ganzhi),
            ("nian_hexagram", self.nian_hexagram),
            ("dynasty", self.dynasty),
            ("person", self.person),
            ("yuan", self.yuan),
            ("hui", self.hui),
            ("yun", self.yun),
            ("shi", self.shi),
            ("xun", self.xun),
        ]
    }

    /// Checks every mapped column against the grid width.
    /// A grid without rows has nothing to check.
    pub fn validate(&self, grid: &RawGrid) -> Result<(), MappingError> {
        if grid.is_empty() {
            return Ok(());
        }
        match self.fields().into_iter().find(|(_, index)| *index >= grid.width()) {
            Some((field, index)) => Err(MappingError::ColumnOutOfBounds {
                field,
                index,
                width: grid.width(),
            }),
            None => Ok(()),
        }
    }
}

/// One calendar year of the chronology.
///
/// The `*_raw` fields hold the carried-forward hierarchy labels of the row,
/// not necessarily the row's own cells.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub gregorian_year: i32,
    pub ganzhi: String,
    pub nian_hexagram: String,
    pub dynasty: String,
    pub person: String,
    pub yuan_raw: String,
    pub hui_raw: String,
    pub yun_raw: String,
    pub shi_raw: String,
    pub xun_raw: String,
    /// Structured 运 label, only when splitting is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yun: Option<YunLabel>,
}

/// Replaces every empty cell of the given columns with the nearest non-empty
/// value above it. Cells above the first value stay empty; columns outside
/// the grid are ignored.
pub fn forward_fill(grid: &mut RawGrid, columns: &[usize]) {
    for &col in columns {
        if col >= grid.width() {
            continue;
        }
        let mut last: Option<Cell> = None;
        for row in 0..grid.len() {
            if let Some(cell) = grid.get_mut(row, col) {
                if !cell.is_empty() {
                    last = Some(cell.clone());
                } else if let Some(value) = &last {
                    *cell = value.clone();
                }
            }
        }
    }
}

/// Converts grid rows into year records using a fixed column layout.
#[derive(Clone, Debug, Default)]
pub struct TableNormalizer {
    columns: ColumnMap,
    split_yun: bool,
}

impl TableNormalizer {
    pub fn new(columns: ColumnMap) -> Self {
        TableNormalizer {
            columns,
            split_yun: false,
        }
    }

    /// Adds a structured `yun` object to every record with a 运 label.
    pub fn with_split_yun(mut self, split_yun: bool) -> Self {
        self.split_yun = split_yun;
        self
    }

    /// Forward-fills the hierarchy columns in place.
    pub fn forward_fill(&self, grid: &mut RawGrid) {
        forward_fill(grid, &self.columns.hierarchy());
    }

    /// Builds one record per row with a year, in row order.
    ///
    /// Expects a grid that was already forward-filled; hierarchy fields are
    /// read from the row as they stand.
    ///
    /// # Errors
    /// `ColumnOutOfBounds` when the grid has rows and a mapped column lies
    /// beyond its width.
    pub fn extract_records(&self, grid: &RawGrid) -> Result<Vec<YearRecord>, MappingError> {
        self.columns.validate(grid)?;
        let records = (0..grid.len())
            .filter_map(|row| self.build_record(row, |col| grid.get(row, col)))
            .collect();
        Ok(records)
    }

    /// Forward-fill and extraction in a single top-to-bottom pass.
    ///
    /// Carries the last seen value of each hierarchy column instead of
    /// mutating the grid; yields the same records as `forward_fill`
    /// followed by `extract_records`.
    pub fn normalize(&self, grid: &RawGrid) -> Result<Vec<YearRecord>, MappingError> {
        self.columns.validate(grid)?;
        let mut carry: HashMap<usize, &Cell> = HashMap::new();
        let mut records = Vec::new();
        for row in 0..grid.len() {
            for col in self.columns.hierarchy() {
                let cell = grid.get(row, col);
                if !cell.is_empty() {
                    carry.insert(col, cell);
                }
            }
            let read = |col: usize| carry.get(&col).copied().unwrap_or_else(|| grid.get(row, col));
            if let Some(record) = self.build_record(row, read) {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn build_record<'a, F>(&self, row: usize, read: F) -> Option<YearRecord>
    where
        F: Fn(usize) -> &'a Cell,
    {
        let year_cell = read(self.columns.year);
        if year_cell.is_empty() {
            trace!(row, "skipped row without year");
            return None;
        }
        let Some(gregorian_year) = year_cell.to_year() else {
            trace!(row, value = %year_cell, "skipped row with non-integer year");
            return None;
        };

        let yun_raw = read(self.columns.yun).to_text();
        let yun = if self.split_yun { YunLabel::parse(&yun_raw) } else { None };
        Some(YearRecord {
            gregorian_year,
            ganzhi: read(self.columns.ganzhi).to_text(),
            nian_hexagram: read(self.columns.nian_hexagram).to_text(),
            dynasty: read(self.columns.dynasty).to_text(),
            person: read(self.columns.person).to_text(),
            yuan_raw: read(self.columns.yuan).to_text(),
            hui_raw: read(self.columns.hui).to_text(),
            yun_raw,
            shi_raw: read(self.columns.shi).to_text(),
            xun_raw: read(self.columns.xun).to_text(),
            yun,
        })
    }
}
