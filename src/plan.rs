//! Daily reading plans over a generated verse tree.
//!
//! A verse range is split across a run of calendar dates so that each day
//! carries roughly the same total score. The running length carries its
//! remainder from one day into the next, so rounding does not drift.
use crate::model::Book;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid verse reference {0:?} (expected \"Book C:V\")")]
    InvalidReference(String),
    #[error("verse {0} is not in the document")]
    UnknownVerse(VerseRef),
    #[error("range end {to} comes before start {from}")]
    RangeReversed { from: VerseRef, to: VerseRef },
    #[error("end date {end} is before start date {start}")]
    DateRange { start: NaiveDate, end: NaiveDate },
}

/// `Book C:V` reference. The book name may contain spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerseRef {
    pub book: String,
    pub chapter: i32,
    pub verse: i32,
}

impl VerseRef {
    pub fn new(book: impl Into<String>, chapter: i32, verse: i32) -> Self {
        VerseRef {
            book: book.into(),
            chapter,
            verse,
        }
    }
}

impl FromStr for VerseRef {
    type Err = PlanError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || PlanError::InvalidReference(raw.to_string());
        let (book, numbers) = raw.trim().rsplit_once(' ').ok_or_else(invalid)?;
        let (chapter, verse) = numbers.split_once(':').ok_or_else(invalid)?;
        let book = book.trim();
        if book.is_empty() {
            return Err(invalid());
        }
        Ok(VerseRef {
            book: book.to_string(),
            chapter: chapter.parse().map_err(|_| invalid())?,
            verse: verse.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

impl Serialize for VerseRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A verse in document order, with its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedVerse {
    pub at: VerseRef,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPlan {
    pub date: NaiveDate,
    pub start: VerseRef,
    pub end: VerseRef,
    pub length: u64,
}

/// Every verse of `books` in book, chapter, then verse insertion order.
pub fn document_order(books: &[Book]) -> Vec<PlannedVerse> {
    books
        .iter()
        .flat_map(|book| {
            book.chapters.iter().flat_map(move |chapter| {
                chapter.verses.iter().map(move |verse| PlannedVerse {
                    at: VerseRef::new(book.name.clone(), chapter.number, verse.number),
                    length: verse.length,
                })
            })
        })
        .collect()
}

/// Verses from `from` through `to`, inclusive. `None` means the first or last
/// verse of the document respectively.
pub fn verses_between(
    books: &[Book],
    from: Option<&VerseRef>,
    to: Option<&VerseRef>,
) -> Result<Vec<PlannedVerse>, PlanError> {
    let verses = document_order(books);
    let start = match from {
        Some(from) => position_of(&verses, from)?,
        None => 0,
    };
    let end = match to {
        Some(to) => match verses[start..].iter().position(|verse| verse.at == *to) {
            Some(offset) => start + offset,
            None => {
                position_of(&verses, to)?;
                return Err(PlanError::RangeReversed {
                    from: verses[start].at.clone(),
                    to: to.clone(),
                });
            }
        },
        None => verses.len().saturating_sub(1),
    };
    if verses.is_empty() {
        return Ok(Vec::new());
    }
    Ok(verses[start..=end].to_vec())
}

fn position_of(verses: &[PlannedVerse], target: &VerseRef) -> Result<usize, PlanError> {
    verses
        .iter()
        .position(|verse| verse.at == *target)
        .ok_or_else(|| PlanError::UnknownVerse(target.clone()))
}

/// Calendar dates from `start` through `end`, inclusive.
pub fn dates_between(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, PlanError> {
    if end < start {
        return Err(PlanError::DateRange { start, end });
    }
    Ok(start.iter_days().take_while(|date| *date <= end).collect())
}

struct OpenPlan {
    date: NaiveDate,
    start: VerseRef,
    length: u64,
}

/// Split `verses` across `dates` by score.
///
/// Plans beyond the last date reuse it; this only happens when the scores
/// cannot be spread evenly, e.g. when every verse scores zero.
pub fn build_daily_plans(verses: &[PlannedVerse], dates: &[NaiveDate]) -> Vec<DailyPlan> {
    let (Some(last_verse), Some(&last_date)) = (verses.last(), dates.last()) else {
        return Vec::new();
    };
    let total: u64 = verses.iter().map(|verse| u64::from(verse.length)).sum();
    let target = total as f64 / dates.len() as f64;

    let mut plans = Vec::new();
    let mut date_index = 0;
    let mut running = 0.0_f64;
    let mut open: Option<OpenPlan> = None;

    for verse in verses {
        let plan = open.get_or_insert_with(|| OpenPlan {
            date: dates.get(date_index).copied().unwrap_or(last_date),
            start: verse.at.clone(),
            length: 0,
        });
        running += f64::from(verse.length);
        plan.length += u64::from(verse.length);
        if running >= target {
            if let Some(plan) = open.take() {
                plans.push(DailyPlan {
                    date: plan.date,
                    start: plan.start,
                    end: verse.at.clone(),
                    length: plan.length,
                });
            }
            running -= target;
            date_index += 1;
        }
    }

    if let Some(plan) = open {
        plans.push(DailyPlan {
            date: plan.date,
            start: plan.start,
            end: last_verse.at.clone(),
            length: plan.length,
        });
    }

    tracing::debug!(
        verses = verses.len(),
        dates = dates.len(),
        plans = plans.len(),
        daily_target = target,
        "built daily plans"
    );
    plans
}

/// One `date<TAB>start<TAB>end` line per plan.
pub fn format_plans(plans: &[DailyPlan]) -> String {
    let mut out = String::new();
    for plan in plans {
        out.push_str(&format!("{}\t{}\t{}\n", plan.date, plan.start, plan.end));
    }
    out
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
