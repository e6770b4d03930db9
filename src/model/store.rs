
use std::{fmt, str::FromStr};

use async_trait::async_trait;

pub type Result<T> = core::result::Result<T, Error>;

pub type Row = Vec<String>;

/// Storage capability behind the attendee model.
///
/// `row_index` is zero based over the rows returned by `fetch_rows`, so index 0
/// is the header row.
#[async_trait]
pub trait RowStore: Send + Sync {
    async fn fetch_rows(&self, range: &SheetRange) -> Result<Vec<Row>>;

    async fn append_row(&self, range: &SheetRange, row: Row) -> Result<()>;

    async fn update_row(&self, range: &SheetRange, row_index: usize, row: Row) -> Result<()>;
}

/// A column span on one sheet, e.g. `Sheet1!A:E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    pub sheet: String,
    pub first_column: String,
    pub last_column: String,
}

impl SheetRange {
    /// The A1 form of a single row of the span. `row_index` is zero based.
    pub fn row_a1(&self, row_index: usize) -> String {
        let n = row_index + 1;
        format!("{}!{}{n}:{}{n}", self.sheet, self.first_column, self.last_column)
    }

    /// Number of columns covered by the span.
    pub fn width(&self) -> usize {
        column_number(&self.last_column) + 1 - column_number(&self.first_column)
    }
}

fn column_number(letters: &str) -> usize {
    letters
        .bytes()
        .fold(0, |acc, b| acc * 26 + (b - b'A') as usize + 1)
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}:{}", self.sheet, self.first_column, self.last_column)
    }
}

impl FromStr for SheetRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::InvalidRange(s.to_string());

        let (sheet, span) = s.rsplit_once('!').ok_or_else(bad)?;
        let (first, last) = span.split_once(':').ok_or_else(bad)?;

        let is_column = |c: &str| !c.is_empty() && c.bytes().all(|b| b.is_ascii_alphabetic());
        if sheet.is_empty() || !is_column(first) || !is_column(last) {
            return Err(bad());
        }

        let range = SheetRange {
            sheet: sheet.to_string(),
            first_column: first.to_ascii_uppercase(),
            last_column: last.to_ascii_uppercase(),
        };

        if column_number(&range.last_column) < column_number(&range.first_column) {
            return Err(bad());
        }

        Ok(range)
    }
}

#[derive(Debug, Clone)]
pub enum Error {
    InvalidRange(String),
    Credentials(String),
    Transport(String),
    Api { status: u16, message: String },
    MalformedResponse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange(range) => write!(f, "Invalid sheet range: {range}"),
            Self::Credentials(msg) => write!(f, "Credential error: {msg}"),
            Self::Transport(msg) => write!(f, "Request failed: {msg}"),
            Self::Api { status, message } => write!(f, "Sheets API error ({status}): {message}"),
            Self::MalformedResponse(msg) => write!(f, "Malformed response: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
