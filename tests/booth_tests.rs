// SPDX-License-Identifier: GPL-3.0-only

//! End-to-end booth flow against the library: load filters from disk,
//! stack overlays, capture, flatten and save.

use image::{Rgba, RgbaImage};
use picture_a_state::errors::{FilterError, PhotoError};
use picture_a_state::filters::FilterCatalog;
use picture_a_state::pipelines::photo::save_photo;
use picture_a_state::session::{ApplyOutcome, BoothSession, SessionStatus};
use std::path::Path;
use std::sync::Arc;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Frame-sized image, opaque only in the top-left 2x2 block
fn corner_filter(color: Rgba<u8>) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(8, 8, CLEAR);
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        image.put_pixel(x, y, color);
    }
    image
}

fn write_filters(dir: &Path) {
    corner_filter(RED).save(dir.join("a-red.png")).unwrap();
    corner_filter(BLUE).save(dir.join("b-blue.png")).unwrap();
    std::fs::write(dir.join("notes.txt"), "not a filter").unwrap();
}

fn gray_frame() -> RgbaImage {
    RgbaImage::from_pixel(8, 8, Rgba([128, 128, 128, 255]))
}

#[test]
fn test_catalog_from_folder_is_ordered_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    write_filters(dir.path());

    let catalog = FilterCatalog::load(dir.path());
    assert_eq!(catalog.names(), vec!["a-red".to_string(), "b-blue".to_string()]);
}

#[test]
fn test_sixth_filter_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_filters(dir.path());
    let mut session = BoothSession::new(Arc::new(FilterCatalog::load(dir.path())));

    session.show_filters().unwrap();
    for expected in 1..5 {
        assert_eq!(
            session.apply_filter().unwrap(),
            ApplyOutcome::Applied { count: expected }
        );
    }
    assert_eq!(session.apply_filter().unwrap(), ApplyOutcome::LimitReached);
    assert_eq!(session.take_status(), Some(SessionStatus::FilterLimitReached));
    assert!(session.pending().is_none());
    assert!(!session.can_add_filter());

    assert_eq!(session.apply_filter(), Err(FilterError::LimitReached));
    assert_eq!(session.next_filter(), Err(FilterError::Locked));
    assert_eq!(session.applied().len(), 5);
}

#[tokio::test]
async fn test_capture_flatten_and_save() {
    let filters = tempfile::tempdir().unwrap();
    write_filters(filters.path());
    let output = tempfile::tempdir().unwrap();

    let mut session = BoothSession::new(Arc::new(FilterCatalog::load(filters.path())));
    assert!(matches!(session.save(), Err(PhotoError::NotCaptured)));

    // Red filter is frame-sized, so the default placement maps it 1:1
    session.show_filters().unwrap();
    session.apply_filter().unwrap();

    session.capture(gray_frame());
    assert!(session.is_captured());

    let flattened = session.save().unwrap();
    assert_eq!(flattened.get_pixel(0, 0), &RED);
    assert_eq!(flattened.get_pixel(1, 1), &RED);
    assert_eq!(flattened.get_pixel(2, 2), &Rgba([128, 128, 128, 255]));
    assert_eq!(flattened.get_pixel(7, 7), &Rgba([128, 128, 128, 255]));
    assert!(session.applied().is_empty());
    assert!(!session.can_add_filter());

    let path = save_photo(flattened.clone(), output.path()).await.unwrap();
    assert_eq!(path, output.path().join("captured-photo.png"));

    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(saved, flattened);
}

#[tokio::test]
async fn test_second_save_overwrites_capture() {
    let output = tempfile::tempdir().unwrap();

    let first = RgbaImage::from_pixel(2, 2, RED);
    let second = RgbaImage::from_pixel(3, 3, BLUE);

    save_photo(first, output.path()).await.unwrap();
    let path = save_photo(second.clone(), output.path()).await.unwrap();

    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(saved, second);

    let files: Vec<_> = std::fs::read_dir(output.path())
        .unwrap()
        .flatten()
        .map(|entry| entry.file_name())
        .collect();
    assert_eq!(files, vec![std::ffi::OsString::from("captured-photo.png")]);
}

#[test]
fn test_reset_returns_to_live_session() {
    let dir = tempfile::tempdir().unwrap();
    write_filters(dir.path());
    let mut session = BoothSession::new(Arc::new(FilterCatalog::load(dir.path())));

    session.show_filters().unwrap();
    session.next_filter().unwrap();
    session.apply_filter().unwrap();
    session.capture(gray_frame());
    session.save().unwrap();

    session.reset();
    assert!(!session.is_captured());
    assert!(session.applied().is_empty());
    assert!(session.pending().is_none());
    assert_eq!(session.current_index(), 0);
    assert!(session.can_add_filter());
}
