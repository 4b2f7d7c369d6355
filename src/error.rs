//! Error types for bookdex operations.

use thiserror::Error;

/// Broad failure classes, used by the CLI and by callers that only care
/// whether the input data or the environment was at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input exists but does not have the expected shape.
    DataFormat,
    /// A file could not be read or written.
    Resource,
}

/// Errors that can occur while reading an index spreadsheet or writing
/// the index document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("sheet '{sheet}' not found (available: {})", available.join(", "))]
    MissingSheet {
        sheet: String,
        available: Vec<String>,
    },

    #[error("row {row} has {fields} field(s), expected at least 4 (Entry, Pages, Book, Description)")]
    MalformedRow { row: usize, fields: usize },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingSheet { .. } | Error::MalformedRow { .. } | Error::InvalidDocument(_) => {
                ErrorKind::DataFormat
            }
            Error::Io(_) | Error::Workbook(_) | Error::Zip(_) | Error::Xml(_) | Error::Utf8(_) => {
                ErrorKind::Resource
            }
        }
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(e: tempfile::PersistError) -> Self {
        Error::Io(e.error)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sheet_lists_available() {
        let err = Error::MissingSheet {
            sheet: "Index".to_string(),
            available: vec!["Sheet1".to_string(), "Notes".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "sheet 'Index' not found (available: Sheet1, Notes)"
        );
        assert_eq!(err.kind(), ErrorKind::DataFormat);
    }

    #[test]
    fn test_io_is_resource_error() {
        let err = Error::from(std::io::Error::other("disk full"));
        assert_eq!(err.kind(), ErrorKind::Resource);
    }
}
