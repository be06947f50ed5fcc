//! Record reader for the delimited verse list.
//!
//! Rows are positional: book, chapter, verse, text. The first row is data;
//! there is no header handling. Chapter and verse numbers stay textual until
//! the aggregator consumes them, so a bad number surfaces as a parse error at
//! that point rather than here.
//!
//! A blank line is a row with no fields and fails like any other short row.
//! The csv reader skips blank lines on its own, so the terminator run in
//! front of each record is checked against the drained input.
use crate::error::PipelineError;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::rc::Rc;

const MIN_FIELDS: usize = 4;

/// One raw input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub book: String,
    pub chapter: String,
    pub verse: String,
    pub text: String,
    /// Source the row came from, if read from one.
    pub origin: Option<Rc<Path>>,
    /// 1-based line in the source, 0 when built in memory.
    pub line: u64,
}

impl Record {
    pub fn new(
        book: impl Into<String>,
        chapter: impl Into<String>,
        verse: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Record {
            book: book.into(),
            chapter: chapter.into(),
            verse: verse.into(),
            text: text.into(),
            origin: None,
            line: 0,
        }
    }

    /// `path line N` for error messages.
    pub fn location(&self) -> String {
        let origin = self
            .origin
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string());
        if self.line == 0 {
            origin
        } else {
            format!("{origin} line {}", self.line)
        }
    }

    pub fn chapter_number(&self) -> Result<i32, PipelineError> {
        self.number_field("chapter", &self.chapter)
    }

    pub fn verse_number(&self) -> Result<i32, PipelineError> {
        self.number_field("verse", &self.verse)
    }

    fn number_field(&self, field: &str, raw: &str) -> Result<i32, PipelineError> {
        raw.parse::<i32>().map_err(|err| {
            PipelineError::parse(
                self.location(),
                format!("{field} number {raw:?} is not a 32-bit integer ({err})"),
            )
        })
    }
}

/// Read every record from `path`, in file order.
pub fn read_records(path: &Path) -> Result<Vec<Record>, PipelineError> {
    let file = File::open(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(file, path)?;
    tracing::debug!(
        path = %path.display(),
        records = records.len(),
        "read verse records"
    );
    Ok(records)
}

/// Parse records from any reader. `origin` names the source in errors.
pub fn parse_records<R: io::Read>(
    mut reader: R,
    origin: &Path,
) -> Result<Vec<Record>, PipelineError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| PipelineError::Read {
            path: origin.to_path_buf(),
            source,
        })?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());
    let shared_origin: Rc<Path> = Rc::from(origin);

    let mut records = Vec::new();
    let mut row = csv::StringRecord::new();
    let mut prev_end = 0;
    loop {
        let more = csv_reader
            .read_record(&mut row)
            .map_err(|err| csv_error(err, origin, records.len()))?;
        let content_start = if more {
            let start = row.position().map_or(prev_end, |pos| pos.byte() as usize);
            skip_terminators(&bytes, start)
        } else {
            bytes.len()
        };
        let allowed = if records.is_empty() { 0 } else { 1 };
        if let Some(line) = blank_line(&bytes, prev_end, content_start, allowed) {
            return Err(short_row(origin, line, 0));
        }
        if !more {
            break;
        }
        prev_end = csv_reader.position().byte() as usize;

        let line = row
            .position()
            .map(|pos| pos.line())
            .unwrap_or(records.len() as u64 + 1);
        if row.len() < MIN_FIELDS {
            return Err(short_row(origin, line, row.len()));
        }
        records.push(Record {
            origin: Some(Rc::clone(&shared_origin)),
            line,
            ..Record::new(&row[0], &row[1], &row[2], &row[3])
        });
    }
    Ok(records)
}

fn short_row(origin: &Path, line: u64, found: usize) -> PipelineError {
    PipelineError::parse(
        format!("{} line {line}", origin.display()),
        format!("expected at least {MIN_FIELDS} fields, found {found}"),
    )
}

fn is_terminator(byte: u8) -> bool {
    matches!(byte, b'\r' | b'\n')
}

fn skip_terminators(bytes: &[u8], from: usize) -> usize {
    bytes[from.min(bytes.len())..]
        .iter()
        .position(|&byte| !is_terminator(byte))
        .map_or(bytes.len(), |offset| from + offset)
}

/// Line breaks in `bytes`, counting `\r\n` once.
fn line_breaks(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut after_cr = false;
    for &byte in bytes {
        match byte {
            b'\r' => {
                count += 1;
                after_cr = true;
            }
            b'\n' => {
                if !after_cr {
                    count += 1;
                }
                after_cr = false;
            }
            _ => after_cr = false,
        }
    }
    count
}

/// Line number of an empty line between the previous record (ending at
/// `prev_end`) and the next content at `content_start`, if there is one.
///
/// The previous record's own terminator may sit on either side of
/// `prev_end`, so the run is widened back to the last content byte. `allowed`
/// is the number of breaks that run may hold: one after a record, none before
/// the first.
fn blank_line(
    bytes: &[u8],
    prev_end: usize,
    content_start: usize,
    allowed: usize,
) -> Option<u64> {
    let mut run_start = prev_end.min(content_start);
    while run_start > 0 && is_terminator(bytes[run_start - 1]) {
        run_start -= 1;
    }
    if line_breaks(&bytes[run_start..content_start]) <= allowed {
        return None;
    }
    let before = line_breaks(&bytes[..run_start]) as u64;
    Some(before + 1 + allowed as u64)
}

fn csv_error(err: csv::Error, origin: &Path, idx: usize) -> PipelineError {
    let location = match err.position() {
        Some(pos) => format!("{} line {}", origin.display(), pos.line()),
        None => format!("{} row {}", origin.display(), idx + 1),
    };
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => PipelineError::Read {
            path: origin.to_path_buf(),
            source,
        },
        _ => PipelineError::parse(location, message),
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
