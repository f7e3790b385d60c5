//! Tests for the offset index container
//!
//! These tests verify:
//! - Save/load round trips of the DIDX index file
//! - Strict load failures: truncation, bad magic, bad version, bad CRC
//! - Lenient open-path loading via IndexState
//! - Default index path derivation

use std::fs;
use std::path::PathBuf;

use docdex::{default_index_path, DocdexError, IndexState, OffsetIndex};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_index() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("corpus.bin.index");
    (temp_dir, path)
}

fn save_index(path: &PathBuf, offsets: Vec<u64>) -> OffsetIndex {
    let index = OffsetIndex::from(offsets);
    index.save(path, true).unwrap();
    index
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_save_load_round_trip() {
    let (_temp, path) = setup_temp_index();

    let saved = save_index(&path, vec![0, 37, 91, 4096]);
    let loaded = OffsetIndex::load(&path, true).unwrap();

    assert_eq!(loaded, saved);
    assert_eq!(loaded.len(), 4);
    assert_eq!(loaded.offsets(), &[0, 37, 91, 4096]);
}

#[test]
fn test_round_trip_empty_index() {
    let (_temp, path) = setup_temp_index();

    save_index(&path, vec![]);
    let loaded = OffsetIndex::load(&path, true).unwrap();

    assert!(loaded.is_empty());
    assert_eq!(loaded.len(), 0);
}

#[test]
fn test_get_by_docno() {
    let (_temp, path) = setup_temp_index();

    save_index(&path, vec![10, 20, 30]);
    let loaded = OffsetIndex::load(&path, true).unwrap();

    assert_eq!(loaded.get(0), Some(10));
    assert_eq!(loaded.get(2), Some(30));
    assert_eq!(loaded.get(3), None);
}

#[test]
fn test_save_overwrites_existing_index() {
    let (_temp, path) = setup_temp_index();

    save_index(&path, vec![1, 2, 3, 4, 5]);
    save_index(&path, vec![100, 200]);

    let loaded = OffsetIndex::load(&path, true).unwrap();
    assert_eq!(loaded.offsets(), &[100, 200]);
}

#[test]
fn test_large_offsets_survive_round_trip() {
    let (_temp, path) = setup_temp_index();

    let offsets = vec![0, u64::MAX / 2, u64::MAX];
    save_index(&path, offsets.clone());

    let loaded = OffsetIndex::load(&path, true).unwrap();
    assert_eq!(loaded.offsets(), offsets.as_slice());
}

// =============================================================================
// Strict Load Failure Tests
// =============================================================================

#[test]
fn test_load_missing_file_is_io_error() {
    let (_temp, path) = setup_temp_index();

    let err = OffsetIndex::load(&path, true).unwrap_err();
    assert!(matches!(err, DocdexError::Io(_)));
}

#[test]
fn test_load_truncated_file_fails() {
    let (_temp, path) = setup_temp_index();

    fs::write(&path, b"DIDX").unwrap();

    let err = OffsetIndex::load(&path, true).unwrap_err();
    assert!(matches!(err, DocdexError::IndexFormat(_)));
}

#[test]
fn test_load_bad_magic_fails() {
    let (_temp, path) = setup_temp_index();

    save_index(&path, vec![1, 2, 3]);
    let mut data = fs::read(&path).unwrap();
    data[0..4].copy_from_slice(b"NOPE");
    fs::write(&path, &data).unwrap();

    let err = OffsetIndex::load(&path, true).unwrap_err();
    assert!(matches!(err, DocdexError::IndexFormat(_)));
}

#[test]
fn test_load_unknown_version_fails() {
    let (_temp, path) = setup_temp_index();

    save_index(&path, vec![1, 2, 3]);
    let mut data = fs::read(&path).unwrap();
    // Version field sits right after the magic
    data[4..6].copy_from_slice(&99u16.to_le_bytes());
    fs::write(&path, &data).unwrap();

    let err = OffsetIndex::load(&path, true).unwrap_err();
    assert!(matches!(err, DocdexError::IndexFormat(_)));
}

#[test]
fn test_load_huge_count_field_fails_cleanly() {
    let (_temp, path) = setup_temp_index();

    // Valid magic and version, but a count field whose implied size
    // overflows u64 arithmetic
    let mut data = Vec::new();
    data.extend_from_slice(b"DIDX");
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&(u64::MAX / 2).to_le_bytes());
    data.extend_from_slice(&[0u8; 12]);
    fs::write(&path, &data).unwrap();

    let err = OffsetIndex::load(&path, true).unwrap_err();
    assert!(matches!(err, DocdexError::IndexFormat(_)));

    // The lenient open path absorbs it like any other bad index
    let state = IndexState::load(&path, true);
    assert!(!state.is_loaded());
}

#[test]
fn test_load_body_length_mismatch_fails() {
    let (_temp, path) = setup_temp_index();

    save_index(&path, vec![1, 2, 3]);
    let mut data = fs::read(&path).unwrap();
    // Drop one offset's worth of bytes from the body
    data.truncate(data.len() - 8);
    fs::write(&path, &data).unwrap();

    let err = OffsetIndex::load(&path, true).unwrap_err();
    assert!(matches!(err, DocdexError::IndexFormat(_)));
}

#[test]
fn test_load_corrupted_body_fails_checksum() {
    let (_temp, path) = setup_temp_index();

    save_index(&path, vec![1, 2, 3]);
    let mut data = fs::read(&path).unwrap();
    // Flip a bit in the first offset
    data[14] ^= 0xFF;
    fs::write(&path, &data).unwrap();

    let err = OffsetIndex::load(&path, true).unwrap_err();
    assert!(matches!(err, DocdexError::IndexFormat(_)));
}

#[test]
fn test_corrupted_body_loads_with_verification_disabled() {
    let (_temp, path) = setup_temp_index();

    save_index(&path, vec![1, 2, 3]);
    let mut data = fs::read(&path).unwrap();
    data[14] ^= 0xFF;
    fs::write(&path, &data).unwrap();

    // Same bytes, checksum skipped: the (corrupt) offsets parse fine
    let loaded = OffsetIndex::load(&path, false).unwrap();
    assert_eq!(loaded.len(), 3);
}

// =============================================================================
// IndexState (Lenient Open-Path) Tests
// =============================================================================

#[test]
fn test_state_loaded_for_valid_file() {
    let (_temp, path) = setup_temp_index();

    save_index(&path, vec![5, 10]);

    let state = IndexState::load(&path, true);
    assert!(state.is_loaded());
    match state {
        IndexState::Loaded(index) => assert_eq!(index.offsets(), &[5, 10]),
        IndexState::Absent => panic!("expected loaded index"),
    }
}

#[test]
fn test_state_absent_for_missing_file() {
    let (_temp, path) = setup_temp_index();

    let state = IndexState::load(&path, true);
    assert!(!state.is_loaded());
}

#[test]
fn test_state_absent_for_garbage_file() {
    let (_temp, path) = setup_temp_index();

    fs::write(&path, b"this is not an index file at all").unwrap();

    let state = IndexState::load(&path, true);
    assert!(!state.is_loaded());
}

// =============================================================================
// Path Derivation Tests
// =============================================================================

#[test]
fn test_default_index_path_appends_suffix() {
    let derived = default_index_path(std::path::Path::new("/data/corpus.bin"));
    assert_eq!(derived, PathBuf::from("/data/corpus.bin.index"));
}

#[test]
fn test_default_index_path_keeps_storage_extension() {
    // Appends rather than swapping the extension
    let derived = default_index_path(std::path::Path::new("corpus.records"));
    assert_eq!(derived, PathBuf::from("corpus.records.index"));
}
