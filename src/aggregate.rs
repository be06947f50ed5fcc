//! Two-level group-by from flat records to the book → chapter → verse tree.
//!
//! Grouping is keyed on the book name and, within a book, on the chapter
//! number. Both levels keep first-occurrence order: nodes live in a `Vec` and
//! a side index maps each key to its position. A chapter number that recurs
//! after other chapters still lands in the chapter created for its first
//! occurrence. Verses are appended in input order and never deduplicated, so
//! a repeated verse number within a chapter yields two entries.
use crate::error::PipelineError;
use crate::metric::vowel_score;
use crate::model::{Book, Chapter, Verse};
use crate::records::Record;
use std::collections::HashMap;

/// Group `records` in a single pass.
///
/// The first record whose chapter or verse number does not parse aborts the
/// whole grouping.
pub fn group_records<'a, I>(records: I) -> Result<Vec<Book>, PipelineError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut grouper = Grouper::default();
    for record in records {
        grouper.push(record)?;
    }
    Ok(grouper.finish())
}

#[derive(Default)]
struct Grouper {
    books: Vec<BookGroup>,
    book_index: HashMap<String, usize>,
}

struct BookGroup {
    book: Book,
    chapter_index: HashMap<i32, usize>,
}

impl Grouper {
    fn push(&mut self, record: &Record) -> Result<(), PipelineError> {
        let chapter_number = record.chapter_number()?;
        let verse = Verse {
            number: record.verse_number()?,
            length: vowel_score(&record.text),
        };

        let book_pos = match self.book_index.get(&record.book) {
            Some(&pos) => pos,
            None => {
                let pos = self.books.len();
                self.books.push(BookGroup {
                    book: Book::new(record.book.clone()),
                    chapter_index: HashMap::new(),
                });
                self.book_index.insert(record.book.clone(), pos);
                pos
            }
        };
        let group = &mut self.books[book_pos];

        let chapters = &mut group.book.chapters;
        let chapter_pos = *group
            .chapter_index
            .entry(chapter_number)
            .or_insert_with(|| {
                chapters.push(Chapter::new(chapter_number));
                chapters.len() - 1
            });
        chapters[chapter_pos].verses.push(verse);
        Ok(())
    }

    fn finish(self) -> Vec<Book> {
        self.books.into_iter().map(|group| group.book).collect()
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
