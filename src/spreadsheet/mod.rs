//! # Spreadsheet Reading
//!
//! Reads the first (or a selected) worksheet of an xlsx workbook into a
//! [`RawGrid`] of [`Cell`] values. Only the Office Open XML package format is
//! supported; the grid keeps absolute cell positions and interprets no header.
pub mod cell;
pub(crate) mod criteria;
pub mod grid;
pub(crate) mod reference;
pub(crate) mod sheet;
#[cfg(test)]
pub(crate) mod testing;
pub mod xlsx;

pub use cell::Cell;
pub use grid::RawGrid;
pub use xlsx::XlsxWorkbook;
