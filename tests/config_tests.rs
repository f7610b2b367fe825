// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use picture_a_state::Config;
use picture_a_state::config::AppTheme;
use picture_a_state::constants::MAX_OVERLAY_STEP;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.app_theme, AppTheme::System);
    assert_eq!(config.countdown_seconds, 3);
    assert_eq!(config.overlay_step, 5);
    assert!(
        !config.mirror_preview,
        "Captured photos should match the camera orientation by default"
    );
    assert!(config.last_camera_path.is_none());
    assert!(config.filters_folder.is_none());
}

#[test]
fn test_config_print_defaults() {
    let config = Config::default();
    assert_eq!(config.print_command, "lp");
    assert_eq!(config.print_title, "Picture A-State");
}

#[test]
fn test_effective_overlay_step_is_bounded() {
    let mut config = Config::default();
    assert_eq!(config.effective_overlay_step(), 5);

    config.overlay_step = 0;
    assert_eq!(config.effective_overlay_step(), 1);

    config.overlay_step = -12;
    assert_eq!(config.effective_overlay_step(), 1);

    config.overlay_step = 20;
    assert_eq!(config.effective_overlay_step(), 20);

    config.overlay_step = i32::MAX;
    assert_eq!(config.effective_overlay_step(), MAX_OVERLAY_STEP);
}

#[test]
fn test_theme_dropdown_order() {
    assert_eq!(
        AppTheme::ALL,
        [AppTheme::System, AppTheme::Dark, AppTheme::Light]
    );
}
