use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::{
    error::{AppError, AppResult},
    models::{Book, PopularityMode},
};

/// Fields a record needs: id, title, author, genre, rating
const FIELD_COUNT: usize = 5;

/// A record-level problem met while loading. None of these stop the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadDiagnostic {
    /// Record has fewer than the required fields
    Incomplete { line: u64, fields: usize },
    /// A numeric field could not be parsed
    Malformed {
        line: u64,
        field: &'static str,
        value: String,
    },
    /// The record could not be decoded at all
    Unreadable { line: Option<u64>, reason: String },
    /// Capacity was reached with records still left in the source
    Truncated { capacity: usize },
}

impl Display for LoadDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadDiagnostic::Incomplete { line, .. } => {
                write!(f, "Incomplete data at line {}. Skipping.", line)
            }
            LoadDiagnostic::Malformed { line, field, value } => {
                write!(f, "Invalid {} \"{}\" at line {}. Skipping.", field, value, line)
            }
            LoadDiagnostic::Unreadable {
                line: Some(line),
                reason,
            } => write!(f, "Unreadable record at line {} ({}). Skipping.", line, reason),
            LoadDiagnostic::Unreadable { line: None, reason } => {
                write!(f, "Unreadable record ({}). Skipping.", reason)
            }
            LoadDiagnostic::Truncated { .. } => {
                write!(f, "Maximum book limit reached. Some books may not be loaded.")
            }
        }
    }
}

/// Outcome of a catalogue load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl LoadReport {
    pub fn truncated(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, LoadDiagnostic::Truncated { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| !matches!(d, LoadDiagnostic::Truncated { .. }))
            .count()
    }
}

/// The fixed, index-stable set of books.
///
/// A book's position in [`Catalogue::all`] is its node id in the similarity
/// graph, so books are only ever appended during load and never removed.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    books: Vec<Book>,
    capacity: usize,
}

impl Catalogue {
    /// Creates an empty catalogue holding at most `capacity` books
    pub fn new(capacity: usize) -> Self {
        Self {
            books: Vec::new(),
            capacity,
        }
    }

    /// Builds a catalogue from books already in memory
    pub fn from_books(books: Vec<Book>) -> Self {
        let capacity = books.len();
        Self { books, capacity }
    }

    /// Loads the catalogue from a delimited file
    pub fn load(path: &Path, capacity: usize) -> AppResult<(Self, LoadReport)> {
        let file = File::open(path).map_err(|source| AppError::InputSourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let (catalogue, report) = Self::from_reader(file, capacity)?;

        tracing::info!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped(),
            truncated = report.truncated(),
            "Catalogue loaded"
        );

        Ok((catalogue, report))
    }

    /// Loads the catalogue from any reader. The first record is a header.
    ///
    /// Records are plain comma-separated lines; a `"` is ordinary text.
    pub fn from_reader<R: Read>(reader: R, capacity: usize) -> AppResult<(Self, LoadReport)> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut catalogue = Self::new(capacity);
        let mut report = LoadReport::default();

        for result in rdr.records() {
            if catalogue.books.len() >= capacity {
                tracing::warn!(capacity, "Catalogue capacity reached, stopping load");
                report.diagnostics.push(LoadDiagnostic::Truncated { capacity });
                break;
            }

            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    let diagnostic = LoadDiagnostic::Unreadable {
                        line: e.position().map(|p| p.line()),
                        reason: e.to_string(),
                    };
                    tracing::debug!(%diagnostic, "Skipping record");
                    report.diagnostics.push(diagnostic);
                    continue;
                }
            };

            match parse_record(&record) {
                Ok(book) => catalogue.books.push(book),
                Err(diagnostic) => {
                    tracing::debug!(%diagnostic, "Skipping record");
                    report.diagnostics.push(diagnostic);
                }
            }
        }

        report.loaded = catalogue.books.len();
        Ok((catalogue, report))
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// All books in load order
    pub fn all(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Position of the first book carrying `id`
    pub fn position_of(&self, id: i64) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }

    /// True if at least one book has exactly this genre
    pub fn has_genre(&self, genre: &str) -> bool {
        self.books.iter().any(|b| b.genre == genre)
    }

    /// Books belonging to a popularity class, in load order
    pub fn in_mode(&self, mode: PopularityMode) -> impl Iterator<Item = &Book> + '_ {
        self.books.iter().filter(move |b| mode.admits(b.popularity))
    }

    /// Bumps the popularity of the book at `index`, returning the new count
    pub fn increment_popularity(&mut self, index: usize) -> Option<u32> {
        let book = self.books.get_mut(index)?;
        book.popularity = book.popularity.saturating_add(1);
        Some(book.popularity)
    }
}

/// Turns one record into a book. Text fields lose their leading spaces only.
fn parse_record(record: &StringRecord) -> Result<Book, LoadDiagnostic> {
    let line = record.position().map_or(0, |p| p.line());

    if record.len() < FIELD_COUNT {
        return Err(LoadDiagnostic::Incomplete {
            line,
            fields: record.len(),
        });
    }

    let field = |i: usize| record.get(i).unwrap_or_default().trim_start_matches(' ');

    let id = field(0)
        .trim()
        .parse::<i64>()
        .map_err(|_| LoadDiagnostic::Malformed {
            line,
            field: "id",
            value: field(0).to_string(),
        })?;

    let rating = field(4)
        .trim()
        .parse::<f32>()
        .map_err(|_| LoadDiagnostic::Malformed {
            line,
            field: "rating",
            value: field(4).to_string(),
        })?;

    Ok(Book::new(id, field(1), field(2), field(3), rating))
}
