//! In-memory xlsx packages for tests.
use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

/// Builds a zip archive from (member name, content) pairs.
pub(crate) fn zip_bytes(members: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in members {
        writer.start_file(*name, options).expect("start zip member");
        writer.write_all(content.as_bytes()).expect("write zip member");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// Builds an xlsx package with one worksheet per (sheet name, `<row>` elements) pair.
pub(crate) fn xlsx_bytes(sheets: &[(&str, &str)], shared_strings: Option<&str>) -> Vec<u8> {
    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut relationships = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    let mut worksheets = Vec::new();
    for (index, (name, rows)) in sheets.iter().enumerate() {
        let id = index + 1;
        workbook.push_str(&format!(r#"<sheet name="{name}" sheetId="{id}" r:id="rId{id}"/>"#));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{id}.xml"/>"#
        ));
        worksheets.push((
            format!("xl/worksheets/sheet{id}.xml"),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{rows}</sheetData></worksheet>"#
            ),
        ));
    }
    relationships.push_str(
        r#"<Relationship Id="rIdStyles" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    );
    workbook.push_str("</sheets></workbook>");
    relationships.push_str("</Relationships>");

    let mut members: Vec<(&str, &str)> = vec![
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", relationships.as_str()),
    ];
    for (path, content) in &worksheets {
        members.push((path.as_str(), content.as_str()));
    }
    if let Some(shared_strings) = shared_strings {
        members.push(("xl/sharedStrings.xml", shared_strings));
    }
    zip_bytes(&members)
}

/// Renders one `<row>` with inline-string or numeric cells at the given columns.
pub(crate) fn row_xml(row: usize, cells: &[(usize, &str)]) -> String {
    let mut xml = format!(r#"<row r="{}">"#, row + 1);
    for (col, value) in cells {
        let reference = crate::spreadsheet::reference::index_to_reference(row, *col);
        if value.parse::<f64>().is_ok() {
            xml.push_str(&format!(r#"<c r="{reference}"><v>{value}</v></c>"#));
        } else {
            xml.push_str(&format!(r#"<c r="{reference}" t="inlineStr"><is><t>{value}</t></is></c>"#));
        }
    }
    xml.push_str("</row>");
    xml
}

/// Writes the rows of the chronology example to `name` inside `dir`.
pub(crate) fn write_sample_workbook(dir: &Path, name: &str) -> PathBuf {
    let rows = [
        row_xml(0, &[(0, "皇极经世推步")]),
        row_xml(1, &[(1, "元一"), (2, "会午"), (5, "11运"), (6, "世甲"), (7, "旬一"), (8, "乾"), (9, "甲子"), (10, "-2000"), (11, "黄帝"), (12, "轩辕")]),
        row_xml(2, &[(8, "坤"), (9, "乙丑"), (10, "-1999")]),
        row_xml(3, &[]),
        row_xml(4, &[(5, "雷风恒（1384-1743）"), (8, "屯"), (9, "丙寅"), (10, "1644"), (11, "明")]),
    ]
    .concat();
    let path = dir.join(name);
    std::fs::write(&path, xlsx_bytes(&[("推步", rows.as_str())], None)).expect("write sample workbook");
    path
}
