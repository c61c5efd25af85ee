//! Tests for record emission against real text files

use motd_core::emit::emit;
use motd_core::{TextEncoding, TextSource};
use std::fs;

fn emit_from_file(bytes: &[u8], encoding: TextEncoding, offset: u64, delimiter: char) -> Vec<u8> {
    let dir = tempfile::tempdir().unwrap();
    let txt = dir.path().join("motd.txt");
    fs::write(&txt, bytes).unwrap();

    let mut source = TextSource::open(&txt, encoding).unwrap();
    let mut out = Vec::new();
    emit(source.reader(), offset, delimiter, &mut out).unwrap();
    out
}

#[test]
fn test_select_middle_record() {
    let out = emit_from_file("a÷b÷c".as_bytes(), TextEncoding::Utf8, 3, '÷');
    assert_eq!(out, b"b");
}

#[test]
fn test_delimiter_on_own_line_with_crlf() {
    let text = "first motto\r\n÷\r\nsecond motto\r\n÷\r\nthird";
    let offset = text.find("÷").unwrap() as u64 + 2;
    let out = emit_from_file(text.as_bytes(), TextEncoding::Utf8, offset, '÷');
    assert_eq!(out, b"second motto\r\n");
}

#[test]
fn test_latin1_bytes_copied_verbatim() {
    // "caf\xe9" ÷ "na\xefve" in ISO-8859-1
    let text = [b'c', b'a', b'f', 0xE9, 0xF7, b'\n', b'n', b'a', 0xEF, b'v', b'e'];
    let out = emit_from_file(&text, TextEncoding::Latin1, 5, '÷');
    assert_eq!(out, [b'n', b'a', 0xEF, b'v', b'e']);
}

#[test]
fn test_invalid_utf8_copied_verbatim() {
    let text = [b'x', 0xFF, 0xFE, b'y'];
    let out = emit_from_file(&text, TextEncoding::Utf8, 0, '÷');
    assert_eq!(out, text);
}

#[test]
fn test_last_record_runs_to_end_of_file() {
    let out = emit_from_file("a%b%tail\n".as_bytes(), TextEncoding::Utf8, 4, '%');
    assert_eq!(out, b"tail\n");
}
