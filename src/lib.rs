//! # Year Mapping
//!
//! Converts the 皇极经世 chronology workbook into a flat list of year records.
//!
//! The workbook groups years under five nested chronological units (元, 会, 运,
//! 世, 旬). Each unit's label is written once, on the first row of its group,
//! and left blank below it. The conversion reads the first sheet as a raw grid,
//! carries every group label down to the rows it governs, and keeps each row
//! that has a calendar year:
//!
//! - [`spreadsheet`]: xlsx package reading into a [`spreadsheet::RawGrid`]
//! - [`normalizer`]: forward-fill and record extraction
//! - [`pipeline`]: file-to-file conversion driven by a [`config::Config`]
pub mod config;
pub mod error;
mod helpers;
pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod spreadsheet;

pub use error::MappingError;
pub use normalizer::{ColumnMap, TableNormalizer, YearRecord};
