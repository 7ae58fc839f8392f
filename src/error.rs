use thiserror::Error;

/// Main error type for the year mapping converter.
/// Aggregates errors from the standard library, third-party parsers and the conversion itself.
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("{0}")]
    WithContext(String),

    // Standard library errors
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("{0}")]
    Pattern(#[from] glob::PatternError),

    // Third-party library errors
    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncoding(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    // Helper module errors
    #[error("{0}")]
    XmlHelper(#[from] crate::helpers::xml::XmlError),

    // Input errors
    #[error("File not found: '{0}'")]
    InputNotFound(String),

    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Workbook '{0}' contains no worksheets")]
    EmptyWorkbook(String),

    #[error("Workbook part '{0}' is missing")]
    MissingPart(String),

    #[error("No sheet matches '{0}'")]
    SheetNotFound(String),

    #[error("Invalid value '{value}' in cell {reference} of '{sheet}' ({file})")]
    CellValue {
        file: String,
        sheet: String,
        reference: String,
        value: String,
    },

    // Configuration errors
    #[error("Column {index} for '{field}' is outside the grid (width {width})")]
    ColumnOutOfBounds {
        field: &'static str,
        index: usize,
        width: usize,
    },
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, MappingError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| MappingError::WithContext(format!("{}: {}", message, e)))
    }
}
