// SPDX-License-Identifier: GPL-3.0-only

use crate::constants::{
    DEFAULT_OVERLAY_STEP, DEFAULT_PRINT_COMMAND, DEFAULT_PRINT_TITLE, MAX_OVERLAY_STEP,
};
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::{Theme, theme};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Application theme preference
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AppTheme {
    /// Follow system theme (dark or light based on system setting)
    #[default]
    System,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl AppTheme {
    /// All variants, in settings dropdown order
    pub const ALL: [AppTheme; 3] = [AppTheme::System, AppTheme::Dark, AppTheme::Light];

    /// Get the COSMIC theme for this app theme preference
    pub fn theme(&self) -> Theme {
        match self {
            Self::Dark => {
                let mut theme = theme::system_dark();
                theme.theme_type.prefer_dark(Some(true));
                theme
            }
            Self::Light => {
                let mut theme = theme::system_light();
                theme.theme_type.prefer_dark(Some(false));
                theme
            }
            Self::System => theme::system_preference(),
        }
    }
}

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Application theme preference (System, Dark, Light)
    pub app_theme: AppTheme,
    /// Last used camera device path
    pub last_camera_path: Option<String>,
    /// Folder to load filter images from (overrides the data directory lookup)
    pub filters_folder: Option<String>,
    /// Countdown before a capture, in seconds (0 captures immediately)
    pub countdown_seconds: u32,
    /// Pixels an overlay moves or grows per button press
    pub overlay_step: i32,
    /// Mirror camera preview horizontally (selfie mode)
    pub mirror_preview: bool,
    /// Command used to submit print jobs
    pub print_command: String,
    /// Title of submitted print jobs
    pub print_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_theme: AppTheme::default(),
            last_camera_path: None,
            filters_folder: None,
            countdown_seconds: 3,
            overlay_step: DEFAULT_OVERLAY_STEP,
            mirror_preview: false,
            print_command: DEFAULT_PRINT_COMMAND.to_string(),
            print_title: DEFAULT_PRINT_TITLE.to_string(),
        }
    }
}

impl Config {
    /// Load the stored configuration for `app_id`
    ///
    /// Returns the handler used to write changes back (absent when the
    /// config store is unavailable) and the loaded values, falling back to
    /// defaults for anything that could not be read.
    pub fn load(app_id: &str) -> (Option<cosmic_config::Config>, Self) {
        match cosmic_config::Config::new(app_id, Self::VERSION) {
            Ok(handler) => {
                let config = match Self::get_entry(&handler) {
                    Ok(config) => config,
                    Err((errors, config)) => {
                        error!(?errors, "Errors loading config");
                        config
                    }
                };
                (Some(handler), config)
            }
            Err(err) => {
                error!(%err, "Failed to create config handler");
                (None, Self::default())
            }
        }
    }

    /// Overlay step clamped to `1..=MAX_OVERLAY_STEP`
    pub fn effective_overlay_step(&self) -> i32 {
        self.overlay_step.clamp(1, MAX_OVERLAY_STEP)
    }
}
