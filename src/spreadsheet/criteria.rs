use crate::error::MappingError;
use glob::Pattern;

/// Criteria for choosing the worksheet to convert.
#[derive(Clone, Debug, Default)]
pub(crate) struct Criteria {
    /// Sheet name pattern; `None` selects the first sheet.
    pub(crate) sheet_name_pattern: Option<Pattern>,
}

impl Criteria {
    pub(crate) fn new(sheet_name_pattern: Option<&str>) -> Result<Self, MappingError> {
        Ok(Criteria {
            sheet_name_pattern: sheet_name_pattern.map(Pattern::new).transpose()?,
        })
    }

    /// Checks if a sheet name matches the criteria pattern.
    /// Returns true if no pattern is specified.
    pub(crate) fn accept(&self, sheet_name: &str) -> bool {
        self.sheet_name_pattern
            .as_ref()
            .map(|pattern| pattern.matches(sheet_name))
            .unwrap_or(true)
    }

    /// Returns the first sheet name, in workbook order, accepted by the criteria.
    pub(crate) fn select<'a>(&self, sheet_names: &'a [String]) -> Option<&'a str> {
        sheet_names
            .iter()
            .find(|name| self.accept(name))
            .map(String::as_str)
    }

    /// Describes the selection for error messages.
    pub(crate) fn describe(&self) -> String {
        self.sheet_name_pattern
            .as_ref()
            .map(|pattern| pattern.as_str().to_owned())
            .unwrap_or_else(|| "<first sheet>".to_owned())
    }
}
