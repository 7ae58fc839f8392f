//! ZIP archive helper utilities for the xlsx package format
//! Provides convenient methods for accessing members within ZIP archives

use crate::error::MappingError;
use crate::helpers::xml::XmlReader;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use zip::read::ZipFile;
use zip::result::ZipError;
use zip::ZipArchive;

/// Helper trait for ZIP archive operations
pub(crate) trait ZipHelper<RS: Read + Seek> {
    /// Gets a member from the ZIP archive by name (case-insensitive, path separator agnostic)
    fn file(&'_ mut self, name: &str) -> Result<Option<ZipFile<'_, RS>>, MappingError>;

    /// Creates an XML reader for a member within the ZIP archive
    fn xml_reader(
        &'_ mut self,
        name: &str,
    ) -> Result<Option<XmlReader<BufReader<ZipFile<'_, RS>>>>, MappingError>;
}

impl<RS: Read + Seek> ZipHelper<RS> for ZipArchive<RS> {
    fn file(&'_ mut self, name: &str) -> Result<Option<ZipFile<'_, RS>>, MappingError> {
        let pattern = name.replace('\\', "/");
        let path = self.file_names()
            .find(|file_name| pattern.eq_ignore_ascii_case(*file_name))
            .map(|file_name| file_name.to_owned());
        match path.map(|file_name| self.by_name(&file_name)).transpose() {
            Ok(Some(file)) => Ok(Some(file)),
            Ok(None) | Err(ZipError::FileNotFound) => Ok(None),
            Err(error) => Err(error)?,
        }
    }

    fn xml_reader(
        &'_ mut self,
        name: &str,
    ) -> Result<Option<XmlReader<BufReader<ZipFile<'_, RS>>>>, MappingError> {
        let reader = self
            .file(name)?
            .map(|file| XmlReader::new(BufReader::new(file)));
        Ok(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::testing::zip_bytes;
    use std::io::Cursor;

    #[test]
    fn finds_members_case_insensitively() -> Result<(), MappingError> {
        let bytes = zip_bytes(&[("xl/Workbook.xml", "<workbook/>")]);
        let mut zip = ZipArchive::new(Cursor::new(bytes))?;
        let mut content = String::new();
        zip.file("XL\\workbook.xml")?
            .expect("member exists")
            .read_to_string(&mut content)?;
        assert_eq!(content, "<workbook/>");
        Ok(())
    }

    #[test]
    fn missing_member_is_none() -> Result<(), MappingError> {
        let bytes = zip_bytes(&[("xl/workbook.xml", "<workbook/>")]);
        let mut zip = ZipArchive::new(Cursor::new(bytes))?;
        assert!(zip.file("xl/sharedStrings.xml")?.is_none());
        assert!(zip.xml_reader("xl/styles.xml")?.is_none());
        Ok(())
    }
}
