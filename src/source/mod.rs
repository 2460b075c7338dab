//! Tabular data source
//!
//! Loads delimited text (CSV, TSV, ...) into memory and exposes its numeric
//! columns as `Option<f64>` cells for the analysis core. A column is numeric
//! when every non-missing cell parses as a number and at least one cell is
//! present.

mod cell;

pub use cell::Cell;

use std::collections::HashSet;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or selecting data
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("No numeric columns found")]
    NoNumericColumn,

    #[error("Column '{name}' not found. Available columns: {}", .available.join(", "))]
    ColumnNotFound { name: String, available: Vec<String> },

    #[error("Column '{name}' is not numeric (row {row}: '{value}')")]
    NotNumeric {
        name: String,
        row: usize,
        value: String,
    },

    #[error("Dataset is empty")]
    Empty,

    #[error("Failed to read delimited data: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// How to read the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceOptions {
    pub delimiter: u8,
    pub has_headers: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

impl SourceOptions {
    /// Parse a delimiter argument: one ASCII character, `tab` or `\t`
    pub fn parse_delimiter(s: &str) -> Result<u8, String> {
        match s {
            "tab" | "\\t" | "\t" => Ok(b'\t'),
            _ => match s.as_bytes() {
                [b] if b.is_ascii() => Ok(*b),
                _ => Err(format!(
                    "'{}' is not a valid delimiter (expected one ASCII character or 'tab')",
                    s
                )),
            },
        }
    }
}

/// An in-memory table of raw string cells
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn from_path(path: &Path, options: &SourceOptions) -> SourceResult<Self> {
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(io::BufReader::new(file), options)?;
        debug!(
            "Loaded {} rows x {} columns from {}",
            dataset.row_count(),
            dataset.headers.len(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn from_reader<R: io::Read>(reader: R, options: &SourceOptions) -> SourceResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(options.has_headers)
            .flexible(true)
            .from_reader(reader);

        let mut headers: Vec<String> = if options.has_headers {
            csv_reader
                .headers()?
                .iter()
                .map(|h| h.trim().to_string())
                .collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        // Header-less input, or rows wider than the header line: name the
        // extra columns positionally.
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        while headers.len() < width {
            headers.push(format!("column_{}", headers.len() + 1));
        }

        if headers.is_empty() {
            return Err(SourceError::Empty);
        }

        Ok(Self {
            headers: dedupe_headers(headers),
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// First `n` rows, for display
    pub fn preview(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Names of all numeric columns, in file order
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.is_numeric(*idx))
            .map(|(_, name)| name.as_str())
            .collect()
    }

    /// Resolve the column to analyze: the named one, or the first numeric column.
    pub fn select_column<'a>(&'a self, name: Option<&'a str>) -> SourceResult<&'a str> {
        match name {
            Some(name) => {
                self.column_index(name)?;
                Ok(name)
            }
            None => self
                .numeric_columns()
                .first()
                .copied()
                .ok_or(SourceError::NoNumericColumn),
        }
    }

    /// All cells of a column as numbers, `None` for missing cells.
    ///
    /// Short rows count as missing. Any text cell makes the column non-numeric.
    pub fn column_values(&self, name: &str) -> SourceResult<Vec<Option<f64>>> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                let raw = cells.get(idx).map(String::as_str).unwrap_or("");
                Cell::parse(raw)
                    .as_value()
                    .ok_or_else(|| SourceError::NotNumeric {
                        name: name.to_string(),
                        // 1-based data row
                        row: row + 1,
                        value: raw.to_string(),
                    })
            })
            .collect()
    }

    fn column_index(&self, name: &str) -> SourceResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SourceError::ColumnNotFound {
                name: name.to_string(),
                available: self.headers.clone(),
            })
    }

    fn is_numeric(&self, idx: usize) -> bool {
        let mut seen_number = false;
        for cells in &self.rows {
            match Cell::parse(cells.get(idx).map(String::as_str).unwrap_or("")) {
                Cell::Number(_) => seen_number = true,
                Cell::Missing => {}
                Cell::Text => return false,
            }
        }
        seen_number
    }
}

/// Make repeated header names unique by suffixing `.1`, `.2`, ...
///
/// The first occurrence keeps its name, so columns stay addressable by name.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut unique = Vec::with_capacity(headers.len());
    for name in headers {
        let mut candidate = name.clone();
        let mut suffix = 0;
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{}", name, suffix);
        }
        seen.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}
