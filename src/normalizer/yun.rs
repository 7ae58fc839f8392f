//! Structured reading of the composite 运 label.
//!
//! The 运 column mixes an ordinal ("11运") with a hexagram name and the span of
//! years it governs ("雷风恒（1384-1743）"), sometimes both in one cell.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

static ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\s*运").expect("Hardcode regex pattern"));
static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[（(]\s*(-?\d+)\s*[-–—~～至到]\s*(-?\d+)\s*[）)]").expect("Hardcode regex pattern")
});

/// Parts of a 运 label. Every part is optional; unrecognised text ends up in `name`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YunLabel {
    pub ordinal: Option<u32>,
    pub name: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl YunLabel {
    /// Splits a raw label; `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let mut label = YunLabel::default();
        let mut rest = raw.to_owned();
        if let Some(captures) = ORDINAL.captures(raw) {
            label.ordinal = captures[1].parse().ok();
            rest = raw[captures[0].len()..].to_owned();
        }
        if let Some(captures) = YEAR_RANGE.captures(&rest) {
            let start = captures[1].parse::<i32>().ok();
            let end = captures[2].parse::<i32>().ok();
            if let (Some(start), Some(end)) = (start, end) {
                label.start_year = Some(start);
                label.end_year = Some(end);
            }
            let span = captures.get(0).map(|m| m.range()).unwrap_or(0..0);
            rest.replace_range(span, "");
        }
        let name = rest.trim_matches(|c: char| c.is_whitespace() || "：:、，,".contains(c));
        if !name.is_empty() {
            label.name = Some(name.to_owned());
        }
        Some(label)
    }
}
