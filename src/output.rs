use crate::error::MappingError;
use crate::normalizer::YearRecord;
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

/// Writes records as an indented UTF-8 JSON array, creating the parent directory if needed.
pub fn write_records(path: &Path, records: &[YearRecord]) -> Result<(), MappingError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
