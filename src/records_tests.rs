use super::{parse_records, read_records, Record};
use crate::error::PipelineError;
use std::path::Path;

fn memory() -> &'static Path {
    Path::new("<memory>")
}

#[test]
fn first_row_is_treated_as_data() {
    let input = "book,chapter,verse,text\nGenesis,1,1,In the beginning\n";
    let records = parse_records(input.as_bytes(), memory()).expect("parse records");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].book, "book");
    assert_eq!(records[1].book, "Genesis");
    assert_eq!(records[1].text, "In the beginning");
}

#[test]
fn header_row_fails_only_when_its_number_is_consumed() {
    let input = "book,chapter,verse,text\n";
    let records = parse_records(input.as_bytes(), memory()).expect("parse records");

    let err = records[0].chapter_number().expect_err("chapter is not numeric");
    assert!(matches!(err, PipelineError::Parse { .. }));
}

#[test]
fn quoted_text_keeps_embedded_commas() {
    let input = "Genesis,1,3,\"And God said, Let there be light\"\n";
    let records = parse_records(input.as_bytes(), memory()).expect("parse records");

    assert_eq!(records[0].text, "And God said, Let there be light");
}

#[test]
fn extra_fields_are_ignored() {
    let input = "Genesis,1,1,In the beginning,KJV\n";
    let records = parse_records(input.as_bytes(), memory()).expect("parse records");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "In the beginning");
}

#[test]
fn short_row_is_a_parse_error() {
    let input = "Genesis,1,1,In the beginning\nGenesis,1\n";
    let err = parse_records(input.as_bytes(), memory()).expect_err("short row");

    match err {
        PipelineError::Parse { location, message } => {
            assert!(location.contains("line 2"), "location was {location}");
            assert!(message.contains("found 2"), "message was {message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn empty_input_has_no_records() {
    let records = parse_records("".as_bytes(), memory()).expect("parse records");
    assert!(records.is_empty());
}

#[test]
fn numbers_parse_lazily() {
    let record = Record::new("Genesis", "12", "x", "text");

    assert_eq!(record.chapter_number().expect("chapter"), 12);
    assert!(record.verse_number().is_err());
}

#[test]
fn missing_file_is_a_read_error() {
    let err = read_records(Path::new("/nonexistent/verses.csv")).expect_err("missing file");
    assert!(matches!(err, PipelineError::Read { .. }));
}

#[test]
fn reads_from_disk_with_line_numbers() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("verses.csv");
    std::fs::write(&path, "Genesis,1,1,a\nGenesis,1,2,b\n").expect("write csv");

    let records = read_records(&path).expect("read records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].line, 1);
    assert_eq!(records[1].line, 2);
}

fn blank_line_error(input: &str) -> (String, String) {
    match parse_records(input.as_bytes(), memory()).expect_err("blank line") {
        PipelineError::Parse { location, message } => (location, message),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn blank_line_between_rows_is_a_parse_error() {
    let (location, message) = blank_line_error("Genesis,1,1,a\n\nGenesis,1,2,b\n");

    assert_eq!(location, "<memory> line 2");
    assert_eq!(message, "expected at least 4 fields, found 0");
}

#[test]
fn leading_and_trailing_blank_lines_are_parse_errors() {
    let (location, _) = blank_line_error("\nGenesis,1,1,a\n");
    assert_eq!(location, "<memory> line 1");

    let (location, _) = blank_line_error("Genesis,1,1,a\nGenesis,1,2,b\n\n");
    assert_eq!(location, "<memory> line 3");

    let (location, _) = blank_line_error("\n");
    assert_eq!(location, "<memory> line 1");
}

#[test]
fn blank_crlf_line_is_a_parse_error() {
    let (location, _) = blank_line_error("Genesis,1,1,a\r\n\r\nGenesis,1,2,b\r\n");
    assert_eq!(location, "<memory> line 2");
}

#[test]
fn crlf_rows_and_missing_final_newline_are_accepted() {
    let records = parse_records("Genesis,1,1,a\r\nGenesis,1,2,b".as_bytes(), memory())
        .expect("parse records");

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].text, "b");
}

#[test]
fn quoted_text_may_span_lines() {
    let input = "Genesis,1,1,\"a\n\nb\"\nGenesis,1,2,c\n";
    let records = parse_records(input.as_bytes(), memory()).expect("parse records");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].text, "a\n\nb");
}

#[test]
fn lazy_number_error_names_its_source() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("verses.csv");
    std::fs::write(&path, "Genesis,1,1,a\nGenesis,x,2,b\n").expect("write csv");

    let records = read_records(&path).expect("read records");
    let err = records[1].chapter_number().expect_err("chapter is not numeric");

    match err {
        PipelineError::Parse { location, .. } => {
            assert_eq!(location, format!("{} line 2", path.display()));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn in_memory_record_errors_have_no_line() {
    let err = Record::new("Genesis", "x", "1", "a")
        .chapter_number()
        .expect_err("chapter is not numeric");

    match err {
        PipelineError::Parse { location, .. } => assert_eq!(location, "<memory>"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn invalid_utf8_is_reported_in_plain_words() {
    let input: &[u8] = b"Genesis,1,1,\xff\n";
    let err = parse_records(input, memory()).expect_err("invalid utf-8");

    match err {
        PipelineError::Parse { location, message } => {
            assert!(location.contains("line 1"), "location was {location}");
            assert!(message.contains("invalid utf-8"), "message was {message}");
            assert!(!message.contains("Utf8 {"), "message was {message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn signed_numbers_follow_i32_syntax() {
    let record = Record::new("Genesis", "+3", "-1", "text");
    assert_eq!(record.chapter_number().expect("chapter"), 3);
    assert_eq!(record.verse_number().expect("verse"), -1);

    let overflow = Record::new("Genesis", "2147483648", "1", "text");
    assert!(overflow.chapter_number().is_err());
}
