// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use picture_a_state::constants::{
    CAPTURED_PHOTO_FILE, COUNTDOWN_CHOICES, MAX_APPLIED_OVERLAYS, file_formats, timing,
};
use std::time::Duration;

#[test]
fn test_overlay_limit() {
    assert_eq!(MAX_APPLIED_OVERLAYS, 5);
}

#[test]
fn test_capture_file_name() {
    assert_eq!(CAPTURED_PHOTO_FILE, "captured-photo.png");
}

#[test]
fn test_countdown_choices_include_default_and_off() {
    assert!(COUNTDOWN_CHOICES.contains(&0));
    assert!(COUNTDOWN_CHOICES.contains(&3));
    assert!(COUNTDOWN_CHOICES.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_countdown_timing() {
    assert_eq!(timing::COUNTDOWN_LEAD_IN, Duration::from_millis(500));
    assert_eq!(timing::COUNTDOWN_TICK, Duration::from_secs(1));
}

#[test]
fn test_image_extensions() {
    assert!(file_formats::is_image_extension("png"));
    assert!(file_formats::is_image_extension("PNG"));
    assert!(file_formats::is_image_extension("jpeg"));
    assert!(!file_formats::is_image_extension("txt"));
    assert!(!file_formats::is_image_extension(""));
}
