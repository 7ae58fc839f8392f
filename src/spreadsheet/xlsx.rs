use crate::error::MappingError;
use crate::helpers::xml::XmlAttributeHelper;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::grid::RawGrid;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::reference::reference_to_index;
use crate::spreadsheet::sheet::Sheet;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::borrow::Cow;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use tracing::debug;
use tracing::trace;
use zip::read::ZipFile;
use zip::ZipArchive;

// XML tag names for parsing SpreadsheetML
const TAG_RELATIONSHIP: &[u8] = b"Relationship";     // Package relationship
const TAG_SHARED_STRING_ITEM: QName = QName(b"si");   // Shared string table item
const TAG_PHONETIC_TEXT: QName = QName(b"rPh");       // Phonetic text for Asian languages
const TAG_TEXT: QName = QName(b"t");                  // Text content within strings
const TAG_SHEET: QName = QName(b"sheet");             // Worksheet definition
const TAG_ROW: QName = QName(b"row");                 // Row in worksheet
const TAG_CELL: QName = QName(b"c");                  // Cell in worksheet
const TAG_INLINE_STRING: QName = QName(b"is");        // Inline string value
const TAG_VALUE: QName = QName(b"v");                 // Cell value content

const WORKBOOK_PATH: &str = "xl/workbook.xml";
const WORKBOOK_RELATIONSHIPS_PATH: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PATH: &str = "xl/sharedStrings.xml";

/// An Office Open XML workbook (.xlsx, .xlsm).
pub struct XlsxWorkbook<RS: Read + Seek> {
    /// File name of the workbook
    pub name: String,
    /// ZIP archive containing the package parts
    zip: ZipArchive<RS>,
    /// Worksheets in workbook order as (name, zip_path) pairs
    sheets: Vec<(String, String)>,
}

impl XlsxWorkbook<BufReader<File>> {
    /// Opens a workbook from disk.
    ///
    /// # Errors
    /// * `UnsupportedFormat` if the extension is not `.xlsx` or `.xlsm`
    /// * any I/O, zip or XML error raised while reading the package structure
    pub fn open(path: &Path) -> Result<Self, MappingError> {
        let name = path.to_string_lossy().to_string();
        match path.extension().and_then(OsStr::to_str).map(str::to_ascii_lowercase).as_deref() {
            Some("xlsx") | Some("xlsm") => (),
            _ => Err(MappingError::UnsupportedFormat(name.to_owned()))?,
        }
        let file = File::open(path)?;
        Self::from_reader(&name, BufReader::new(file))
    }
}

impl<RS: Read + Seek> XlsxWorkbook<RS> {
    /// Reads the package structure from any seekable source.
    pub fn from_reader(name: &str, reader: RS) -> Result<Self, MappingError> {
        let mut zip = ZipArchive::new(reader)?;
        let sheets = load_workbook(&mut zip)?;
        if sheets.is_empty() {
            Err(MappingError::EmptyWorkbook(name.to_owned()))?
        }
        debug!(workbook = name, sheets = sheets.len(), "opened workbook");
        Ok(XlsxWorkbook {
            name: name.to_owned(),
            zip,
            sheets,
        })
    }

    /// Returns the sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.to_owned()).collect()
    }

    /// Loads every item of the shared string table.
    /// A workbook without the table has no shared strings.
    fn load_shared_strings(&mut self) -> Result<Vec<String>, MappingError> {
        let mut shared_strings = Vec::<String>::new();
        let mut reader = match self.zip.xml_reader(SHARED_STRINGS_PATH)? {
            Some(reader) => reader,
            None => return Ok(shared_strings),
        };

        match_xml_events!(reader => {
            Event::Start(event) if event.name() == TAG_SHARED_STRING_ITEM => {
                let string = read_string_value(&mut reader, TAG_SHARED_STRING_ITEM, false)?;
                shared_strings.push(string);
            }
        });
        debug!(count = shared_strings.len(), "loaded shared strings");
        Ok(shared_strings)
    }

    /// Reads a worksheet into a grid with no header interpretation.
    ///
    /// Cell positions come from the `r` attribute and fall back to running
    /// row/column counters. Error cells (`#N/A`, `#REF!`, ...) read as empty.
    ///
    /// # Arguments
    /// * `sheet_name` - Name of the worksheet, as returned by `sheet_names`
    ///
    /// # Errors
    /// * `SheetNotFound` if no sheet has that name
    /// * `CellValue` if a numeric cell does not hold a number or a shared
    ///   string index points outside the table
    pub fn read_grid(&mut self, sheet_name: &str) -> Result<RawGrid, MappingError> {
        let shared_strings = self.load_shared_strings()?;
        let zip_path = self.sheets.iter()
            .find(|(name, _)| name == sheet_name)
            .map(|(_, path)| path.to_owned())
            .ok_or_else(|| MappingError::SheetNotFound(sheet_name.to_owned()))?;

        let mut sheet = Sheet::new(&self.name, sheet_name);
        let mut row_count = 0usize;
        let mut col_count = 0usize;
        let mut row = 0usize;
        let mut col = 0usize;
        let mut kind = CellType::default();
        let mut value = String::new();
        let mut reader = self.zip.xml_reader(&zip_path)?
            .ok_or_else(|| MappingError::MissingPart(zip_path.to_owned()))?;
        match_xml_events!(reader => {
            Event::Start(event) if event.name() == TAG_ROW => {
                if let Some(index) = event.get_attribute_value("r")?.and_then(|r| r.parse::<usize>().ok()) {
                    row_count = index.saturating_sub(1);
                }
                col_count = 0;
            }
            Event::End(event) if event.name() == TAG_ROW => {
                row_count += 1;
                col_count = 0;
            }
            Event::Start(event) if event.name() == TAG_CELL => {
                (row, col) = event.get_attribute_value("r")?
                    .and_then(|reference| reference_to_index(&reference))
                    .unwrap_or((row_count, col_count));
                col_count = col + 1;
                kind = CellType::parse(event.get_attribute_value("t")?.as_deref());
                value.clear();
            }
            Event::Start(event) if kind != CellType::Empty && event.name() == TAG_INLINE_STRING => {
                value = read_string_value(&mut reader, TAG_INLINE_STRING, false)?;
            }
            Event::Start(event) if kind != CellType::Empty && event.name() == TAG_VALUE => {
                value = read_string_value(&mut reader, TAG_VALUE, true)?;
            }
            Event::End(event) if kind != CellType::Empty && event.name() == TAG_CELL => {
                if !value.is_empty() {
                    let cell = to_cell(&sheet, row, col, kind, &value, &shared_strings)?;
                    sheet.push(row, col, cell);
                }
                kind = CellType::default();
                value.clear();
            }
        });

        debug!(
            sheet = sheet_name,
            cells = sheet.cell_count,
            rows = sheet.row_upper_bound.map(|upper| upper + 1).unwrap_or(0),
            cols = sheet.col_upper_bound.map(|upper| upper + 1).unwrap_or(0),
            "read worksheet"
        );
        Ok(sheet.into_grid())
    }
}

/// Converts the raw text of a `<c>` element into a grid cell.
fn to_cell(
    sheet: &Sheet,
    row: usize,
    col: usize,
    kind: CellType,
    value: &str,
    shared_strings: &[String],
) -> Result<Cell, MappingError> {
    let invalid = || MappingError::CellValue {
        file: sheet.file_name.to_owned(),
        sheet: sheet.name.to_owned(),
        reference: index_to_reference(row, col),
        value: value.to_owned(),
    };
    let cell = match kind {
        CellType::Empty => Cell::Empty,
        CellType::Number => Cell::Number(value.trim().parse::<f64>().map_err(|_| invalid())?),
        CellType::SharedString => {
            let index = value.trim().parse::<usize>().map_err(|_| invalid())?;
            Cell::Text(shared_strings.get(index).ok_or_else(invalid)?.to_owned())
        }
        CellType::InlineString | CellType::IsoDateTime => Cell::Text(value.to_owned()),
        CellType::Boolean => Cell::text(if value.trim() == "1" { "TRUE" } else { "FALSE" }),
        CellType::Error => {
            trace!(reference = %index_to_reference(row, col), value, "error cell read as empty");
            Cell::Empty
        }
    };
    // A zero-length string (e.g. a pasted `=""`) is a blank, not a label
    match cell {
        Cell::Text(text) if text.is_empty() => Ok(Cell::Empty),
        cell => Ok(cell),
    }
}

/// Loads the worksheet list of the workbook.
///
/// Parses `xl/workbook.xml` for sheet names and resolves each relationship id
/// to the worksheet's member path.
///
/// # Returns
/// Worksheets as (name, zip_path) pairs in workbook order
fn load_workbook<RS: Read + Seek>(zip: &mut ZipArchive<RS>) -> Result<Vec<(String, String)>, MappingError> {
    let relationships = load_relationships(zip, WORKBOOK_RELATIONSHIPS_PATH)?;
    let mut reader = zip.xml_reader(WORKBOOK_PATH)?
        .ok_or_else(|| MappingError::MissingPart(WORKBOOK_PATH.to_owned()))?;
    let mut sheets: Vec<(String, String)> = Vec::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHEET => {
            let mut name = None::<Cow<str>>;
            let mut id = None::<Cow<str>>;
            for result in event.attributes() {
                let attribute = result?;
                let key = attribute.key.local_name();
                if key.as_ref() == b"name" {
                    name = Some(attribute.get_value()?);
                } else if key.as_ref() == b"id" {
                    id = Some(attribute.get_value()?);
                }
            }
            if let Some((name, id)) = name.zip(id) {
                if let Some(path) = relationships.get(&*id) {
                    sheets.push((name.to_string(), path.to_owned()));
                }
            }
        }
    });
    Ok(sheets)
}

/// Loads worksheet relationships: relationship id to worksheet member path.
fn load_relationships<RS: Read + Seek>(zip: &mut ZipArchive<RS>, path: &str) -> Result<HashMap<String, String>, MappingError> {
    let mut reader = zip.xml_reader(path)?
        .ok_or_else(|| MappingError::MissingPart(path.to_owned()))?;
    let mut relationships: HashMap<String, String> = HashMap::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
            let id = event.get_attribute_value("Id")?;
            let kind = event.get_attribute_value("Type")?;
            let target = event.get_attribute_value("Target")?;
            // Only worksheet relationships
            if kind.map(|it| it.ends_with("/worksheet")).unwrap_or(true) {
                if let Some((id, target)) = id.zip(target) {
                    relationships.insert(id.to_string(), to_zip_path(&target));
                }
            }
        }
    });
    Ok(relationships)
}

/// Resolves a relationship target relative to the `xl/` folder.
fn to_zip_path(path: &str) -> String {
    if let Some(absolute) = path.strip_prefix('/') {
        absolute.to_owned()
    } else if path.starts_with("xl/") {
        path.to_owned()
    } else {
        format!("xl/{path}")
    }
}

/// Reads string value from XML content, handling text and CDATA sections
///
/// Skips phonetic text annotations and concatenates rich-text runs.
///
/// # Arguments
/// * `reader` - XML reader positioned just after the start tag
/// * `end_tag` - XML tag that marks the end of the string content
/// * `is_text_content` - Whether the content is text without a `<t>` wrapper
fn read_string_value<RS: Read + Seek>(
    reader: &mut XmlReader<BufReader<ZipFile<'_, RS>>>,
    end_tag: QName,
    is_text_content: bool,
) -> Result<String, MappingError> {
    let mut is_phonetic_text = false;
    let mut is_text = is_text_content;
    let mut text = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.name() == end_tag => break,
        Event::Start(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = true,
        Event::End(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = false,
        Event::Start(event) if !is_phonetic_text && event.name() == TAG_TEXT => is_text = true,
        Event::End(event) if is_text && event.name() == TAG_TEXT => is_text = false,
        Event::Text(event) if is_text => text.push_str(&event.xml_content()?),
        Event::CData(event) if is_text => text.push_str(&event.xml_content()?),
        Event::GeneralRef(event) if is_text => text.push_bytes_ref(&event)?,
    });
    Ok(text)
}
