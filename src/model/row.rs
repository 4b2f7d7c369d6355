//! Index rows as read from the spreadsheet, and the letter groups derived
//! from them while rendering.

/// One line of the index: a headword plus where to find it.
///
/// Every field is optional. Blank spreadsheet cells are `None`, never the
/// text `"None"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRow {
    /// The indexed term (column A).
    pub entry: Option<String>,
    /// Page reference, e.g. `"12"`, `"12,14"` or `"12-14"` (column B).
    pub pages: Option<String>,
    /// Source book (column C).
    pub book: Option<String>,
    /// Free-text description (column D).
    pub description: Option<String>,
}

impl IndexRow {
    /// Create a row with just an entry.
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            entry: Some(entry.into()),
            ..Default::default()
        }
    }

    /// Set the page reference.
    pub fn with_pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = Some(pages.into());
        self
    }

    /// Set the source book.
    pub fn with_book(mut self, book: impl Into<String>) -> Self {
        self.book = Some(book.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Entry text, if present and non-empty.
    pub fn entry(&self) -> Option<&str> {
        non_empty(&self.entry)
    }

    /// Page reference, if present and non-empty.
    pub fn pages(&self) -> Option<&str> {
        non_empty(&self.pages)
    }

    /// Book, if present and non-empty.
    pub fn book(&self) -> Option<&str> {
        non_empty(&self.book)
    }

    /// Description, if present and non-empty.
    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    /// `"Book: {book}"`, or `None` without a book.
    pub fn book_text(&self) -> Option<String> {
        self.book().map(|book| format!("Book: {book}"))
    }

    /// Page reference with its label: plural when the reference is a list
    /// or a range, singular otherwise. `None` without pages.
    pub fn page_text(&self) -> Option<String> {
        self.pages().map(page_text)
    }

    /// True when all four fields are absent.
    pub fn is_blank(&self) -> bool {
        self.entry().is_none()
            && self.pages().is_none()
            && self.book().is_none()
            && self.description().is_none()
    }
}

/// Label a page reference: `"Pages: 12,14"`, `"Pages: 12-14"`, `"Page: 12"`.
pub fn page_text(pages: &str) -> String {
    if pages.contains([',', '-']) {
        format!("Pages: {pages}")
    } else {
        format!("Page: {pages}")
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// A contiguous run of rows sharing the same first letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterGroup {
    /// Uppercase first letter, or `""` for rows without an entry.
    pub letter: String,
    pub rows: Vec<IndexRow>,
}
