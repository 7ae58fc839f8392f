//! Conversion settings.
//!
//! Defaults describe the 皇极经世推步 workbook; a YAML file may override any
//! subset of them and command-line flags override the file.
use crate::error::MappingError;
use crate::error::ResultMessage;
use crate::normalizer::ColumnMap;
use serde::Deserialize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "皇极经世推步全.xlsx";
pub const DEFAULT_OUTPUT: &str = "huangji_core/data/year_mapping.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Workbook to read
    pub input: PathBuf,
    /// JSON file to write
    pub output: PathBuf,
    /// Glob pattern selecting the sheet; the first sheet when absent
    pub sheet: Option<String>,
    pub columns: ColumnMap,
    /// Emit a structured `yun` object next to `yun_raw`
    pub split_yun: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sheet: None,
            columns: ColumnMap::default(),
            split_yun: false,
        }
    }
}

impl Config {
    /// Parses a YAML document; missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, MappingError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads a YAML config file.
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        let yaml = fs::read_to_string(path)
            .map_err(MappingError::from)
            .with_prefix(&format!("read config '{}'", path.display()))?;
        Self::from_yaml(&yaml).with_prefix(&format!("parse config '{}'", path.display()))
    }
}
