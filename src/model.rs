//! Book → chapter → verse tree written to (and read back from) the JSON output.
//!
//! Field names here are the wire format; renaming one changes the document.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: i32,
    pub verses: Vec<Verse>,
}

/// A verse number and its vowel score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub number: i32,
    /// Vowel count of the verse text, serialized as `length`.
    pub length: u32,
}

impl Book {
    pub fn new(name: impl Into<String>) -> Self {
        Book {
            name: name.into(),
            chapters: Vec::new(),
        }
    }

    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|chapter| chapter.verses.len()).sum()
    }
}

impl Chapter {
    pub fn new(number: i32) -> Self {
        Chapter {
            number,
            verses: Vec::new(),
        }
    }
}

/// Counts reported after a generate run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeSummary {
    pub books: usize,
    pub chapters: usize,
    pub verses: usize,
}

impl TreeSummary {
    pub fn of(books: &[Book]) -> Self {
        TreeSummary {
            books: books.len(),
            chapters: books.iter().map(|book| book.chapters.len()).sum(),
            verses: books.iter().map(Book::verse_count).sum(),
        }
    }
}
