use std::fmt::Display;

/// Storage type of a worksheet cell as declared by its `t` attribute.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    /// Boolean values stored as 0/1
    Boolean,
    /// Numeric values
    Number,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// Inline string values
    InlineString,
    /// Shared string table references
    SharedString,
    /// Error values such as `#N/A`
    Error,
}

impl CellType {
    /// Maps the `t` attribute of a `<c>` element. A missing attribute means a number.
    pub(crate) fn parse(t: Option<&str>) -> Self {
        match t {
            Some("inlineStr") | Some("str") => CellType::InlineString,
            Some("s") => CellType::SharedString,
            Some("d") => CellType::IsoDateTime,
            Some("b") => CellType::Boolean,
            Some("e") => CellType::Error,
            _ => CellType::Number,
        }
    }
}

/// A single value of the raw grid.
///
/// The grid carries no header interpretation, so every cell is one of three
/// shapes: nothing, a number, or text.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Builds a text cell.
    pub fn text(value: &str) -> Self {
        Cell::Text(value.to_owned())
    }

    /// Returns true if the cell holds no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Interprets the cell as a whole calendar year.
    ///
    /// Numbers are truncated toward zero; text must be a base-10 integer once
    /// surrounding whitespace is removed. Full-width digits count as digits.
    /// Anything else, including values outside the `i32` range, is not a year.
    pub fn to_year(&self) -> Option<i32> {
        match self {
            Cell::Empty => None,
            Cell::Number(value) => {
                if !value.is_finite() {
                    return None;
                }
                let year = value.trunc();
                if year < i32::MIN as f64 || year > i32::MAX as f64 {
                    None
                } else {
                    Some(year as i32)
                }
            }
            Cell::Text(value) => value
                .trim()
                .chars()
                .map(to_ascii_digit)
                .collect::<String>()
                .parse::<i32>()
                .ok(),
        }
    }

    /// Renders the cell as a string, empty for `Cell::Empty`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

/// Maps a full-width digit (`０`..=`９`) to its ASCII form.
fn to_ascii_digit(c: char) -> char {
    match c {
        '０'..='９' => char::from_digit(c as u32 - '０' as u32, 10).unwrap_or(c),
        _ => c,
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            // f64 Display is the shortest round-trip decimal and never switches to exponent form
            Cell::Number(value) => write!(f, "{}", value),
            Cell::Text(value) => f.write_str(value),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_years_truncate_toward_zero() {
        assert_eq!(Cell::Number(1644.0).to_year(), Some(1644));
        assert_eq!(Cell::Number(1644.9).to_year(), Some(1644));
        assert_eq!(Cell::Number(-2000.0).to_year(), Some(-2000));
        assert_eq!(Cell::Number(-1.5).to_year(), Some(-1));
    }

    #[test]
    fn non_finite_or_huge_numbers_are_not_years() {
        assert_eq!(Cell::Number(f64::NAN).to_year(), None);
        assert_eq!(Cell::Number(f64::INFINITY).to_year(), None);
        assert_eq!(Cell::Number(1e12).to_year(), None);
    }

    #[test]
    fn text_years_must_be_integers() {
        assert_eq!(Cell::text("1644").to_year(), Some(1644));
        assert_eq!(Cell::text(" -221 ").to_year(), Some(-221));
        assert_eq!(Cell::text("+7").to_year(), Some(7));
        assert_eq!(Cell::text("明朝").to_year(), None);
        assert_eq!(Cell::text("1644.0").to_year(), None);
        assert_eq!(Cell::text("１６４４").to_year(), Some(1644));
        assert_eq!(Cell::text("-２０００").to_year(), Some(-2000));
        assert_eq!(Cell::text("　１６４４　").to_year(), Some(1644));
        assert_eq!(Cell::text("").to_year(), None);
        assert_eq!(Cell::Empty.to_year(), None);
    }

    #[test]
    fn renders_natural_decimal_form() {
        assert_eq!(Cell::Number(1644.0).to_text(), "1644");
        assert_eq!(Cell::Number(-0.25).to_text(), "-0.25");
        assert_eq!(Cell::Number(1e21).to_text(), "1000000000000000000000");
        assert_eq!(Cell::Number(0.0000001).to_text(), "0.0000001");
        assert_eq!(Cell::text("乾").to_text(), "乾");
        assert_eq!(Cell::Empty.to_text(), "");
    }

    #[test]
    fn parses_cell_type_attribute() {
        assert_eq!(CellType::parse(None), CellType::Number);
        assert_eq!(CellType::parse(Some("n")), CellType::Number);
        assert_eq!(CellType::parse(Some("s")), CellType::SharedString);
        assert_eq!(CellType::parse(Some("str")), CellType::InlineString);
        assert_eq!(CellType::parse(Some("inlineStr")), CellType::InlineString);
        assert_eq!(CellType::parse(Some("b")), CellType::Boolean);
        assert_eq!(CellType::parse(Some("d")), CellType::IsoDateTime);
        assert_eq!(CellType::parse(Some("e")), CellType::Error);
    }
}
