//! Tests for the offset index builder

use motd_core::index::{build, read_offsets, OFFSET_BYTES};
use motd_core::{GlyphReader, TextEncoding, TextSource};
use proptest::prelude::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;

fn build_bytes(bytes: &[u8], encoding: TextEncoding, delimiter: char, index: &Path) -> u64 {
    let mut reader = GlyphReader::new(Cursor::new(bytes.to_vec()), encoding);
    build(&mut reader, index, delimiter).unwrap()
}

#[test]
fn test_latin1_single_byte_delimiter_offsets() {
    let dir = tempfile::tempdir().unwrap();
    let idx = dir.path().join("motd.idx");

    let text = [b'a', 0xF7, b'b', 0xF7, b'c'];
    assert_eq!(build_bytes(&text, TextEncoding::Latin1, '÷', &idx), 3);
    assert_eq!(read_offsets(&idx).unwrap(), vec![0, 2, 4]);
}

#[test]
fn test_utf8_two_byte_delimiter_offsets() {
    let dir = tempfile::tempdir().unwrap();
    let idx = dir.path().join("motd.idx");

    assert_eq!(build_bytes("a÷b÷c".as_bytes(), TextEncoding::Utf8, '÷', &idx), 3);
    assert_eq!(read_offsets(&idx).unwrap(), vec![0, 3, 6]);
}

#[test]
fn test_delimiter_is_code_point_not_byte() {
    let dir = tempfile::tempdir().unwrap();
    let idx = dir.path().join("motd.idx");

    // Under UTF-8, the raw byte 0xF7 is undecodable and not the delimiter
    let text = [b'a', 0xF7, b'b'];
    assert_eq!(build_bytes(&text, TextEncoding::Utf8, '÷', &idx), 1);
}

#[test]
fn test_build_from_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let txt = dir.path().join("motd.txt");
    let idx = dir.path().join("motd.idx");
    fs::write(&txt, "first\n%\nsecond\n%\nthird\n").unwrap();

    let mut source = TextSource::open(&txt, TextEncoding::Utf8).unwrap();
    assert_eq!(build(source.reader(), &idx, '%').unwrap(), 3);
    assert_eq!(read_offsets(&idx).unwrap(), vec![0, 7, 16]);
}

#[test]
fn test_rebuild_replaces_longer_index() {
    let dir = tempfile::tempdir().unwrap();
    let idx = dir.path().join("motd.idx");
    fs::write(&idx, vec![0u8; 10 * OFFSET_BYTES as usize]).unwrap();

    assert_eq!(build_bytes(b"x%y", TextEncoding::Utf8, '%', &idx), 2);
    assert_eq!(read_offsets(&idx).unwrap(), vec![0, 2]);
}

proptest! {
    #[test]
    fn prop_k_delimiters_give_k_plus_one_records(
        parts in prop::collection::vec("[a-z \n]{0,12}", 1..40)
    ) {
        let dir = tempfile::tempdir().unwrap();
        let idx = dir.path().join("motd.idx");
        let text = parts.join("÷");

        let count = build_bytes(text.as_bytes(), TextEncoding::Utf8, '÷', &idx);
        prop_assert_eq!(count, parts.len() as u64);

        let offsets = read_offsets(&idx).unwrap();
        prop_assert_eq!(offsets.len(), parts.len());

        let mut expected = 0i64;
        for (offset, part) in offsets.iter().zip(&parts) {
            prop_assert_eq!(*offset, expected);
            expected += part.len() as i64 + '÷'.len_utf8() as i64;
        }
    }
}
