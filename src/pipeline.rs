//! Workbook to JSON conversion, end to end.
use crate::config::Config;
use crate::error::MappingError;
use crate::error::ResultMessage;
use crate::normalizer::TableNormalizer;
use crate::normalizer::YearRecord;
use crate::output::write_records;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::RawGrid;
use crate::spreadsheet::XlsxWorkbook;
use std::path::PathBuf;
use tracing::info;
use tracing::warn;

/// Outcome of a conversion run.
#[derive(Debug)]
pub struct Summary {
    /// Sheet the records were read from
    pub sheet: String,
    /// Rows in the grid, including skipped ones
    pub rows: usize,
    pub records: Vec<YearRecord>,
    /// Where the records were written; `None` when there was nothing to write
    pub output: Option<PathBuf>,
}

/// Opens the configured workbook and reads the selected sheet.
///
/// # Errors
/// * `InputNotFound` when the input path does not exist
/// * `SheetNotFound` when no sheet matches the configured pattern
/// * any error raised while reading the workbook
pub fn read_grid(config: &Config) -> Result<(String, RawGrid), MappingError> {
    let input = config.input.display().to_string();
    if !config.input.exists() {
        Err(MappingError::InputNotFound(input.to_owned()))?
    }
    let criteria = Criteria::new(config.sheet.as_deref())?;
    let mut workbook = XlsxWorkbook::open(&config.input).with_prefix(&format!("open '{input}'"))?;
    let sheet_names = workbook.sheet_names();
    let sheet = criteria
        .select(&sheet_names)
        .ok_or_else(|| MappingError::SheetNotFound(criteria.describe()))?
        .to_owned();
    info!(input = %input, sheet = %sheet, "reading sheet");
    let grid = workbook.read_grid(&sheet).with_prefix(&format!("read sheet '{sheet}'"))?;
    info!(rows = grid.len(), cols = grid.width(), "grid loaded");
    Ok((sheet, grid))
}

/// Reads the workbook, normalizes the sheet and writes the records.
///
/// Nothing is written when no row carries a year.
pub fn convert(config: &Config) -> Result<Summary, MappingError> {
    let (sheet, grid) = read_grid(config)?;
    let normalizer = TableNormalizer::new(config.columns).with_split_yun(config.split_yun);
    let records = normalizer.normalize(&grid)?;
    info!(
        records = records.len(),
        skipped = grid.len() - records.len(),
        "rows normalized"
    );

    let output = if records.is_empty() {
        warn!(output = %config.output.display(), "no records extracted, nothing written");
        None
    } else {
        write_records(&config.output, &records)
            .with_prefix(&format!("write '{}'", config.output.display()))?;
        Some(config.output.to_owned())
    };
    Ok(Summary {
        sheet,
        rows: grid.len(),
        records,
        output,
    })
}
