// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Maximum number of overlays that can be committed to one photo
pub const MAX_APPLIED_OVERLAYS: usize = 5;

/// Default distance (in canvas pixels) an overlay moves or grows per step
pub const DEFAULT_OVERLAY_STEP: i32 = 5;

/// Largest accepted overlay step
pub const MAX_OVERLAY_STEP: i32 = 200;

/// Application directory name under the XDG data directories
pub const APP_DIR_NAME: &str = "picture-a-state";

/// Name of the filters folder inside the application data directory
pub const FILTERS_DIR_NAME: &str = "filters";

/// File name of the saved capture (overwritten by every save)
pub const CAPTURED_PHOTO_FILE: &str = "captured-photo.png";

/// Scratch file handed to the print subsystem
pub const PRINT_JOB_FILE: &str = "print-job.png";

/// Default title of submitted print jobs
pub const DEFAULT_PRINT_TITLE: &str = "Picture A-State";

/// Default print command (CUPS)
pub const DEFAULT_PRINT_COMMAND: &str = "lp";

/// Countdown choices offered in settings (seconds, 0 = off)
pub const COUNTDOWN_CHOICES: [u32; 4] = [0, 3, 5, 10];

/// UI Constants
pub mod ui {
    /// Capture button size (outer)
    pub const CAPTURE_BUTTON_OUTER: f32 = 60.0;

    /// Capture button size (inner)
    pub const CAPTURE_BUTTON_INNER: f32 = 50.0;

    /// Capture button border radius
    pub const CAPTURE_BUTTON_RADIUS: f32 = 25.0;

    /// Overlay button/container background transparency (0.0 = transparent, 1.0 = opaque)
    pub const OVERLAY_BACKGROUND_ALPHA: f32 = 0.6;

    /// Countdown digits shown over the preview
    pub const COUNTDOWN_TEXT_SIZE: u16 = 96;

    /// Status message text size
    pub const STATUS_TEXT_SIZE: u16 = 20;

    /// Icon size for the overlay adjustment buttons
    pub const ADJUST_ICON_SIZE: u16 = 16;
}

/// GStreamer pipeline constants
pub mod pipeline {
    /// Maximum buffer queue size (keep small for low latency)
    pub const MAX_BUFFERS: u32 = 2;

    /// Output pixel format for appsink
    /// RGBA is what the compositor and the image crate work with directly
    pub const OUTPUT_FORMAT: &str = "RGBA";

    /// Frame channel capacity between the appsink callback and the UI
    pub const FRAME_CHANNEL_CAPACITY: usize = 4;
}

/// Timing constants
pub mod timing {
    use super::Duration;

    /// Frame counter modulo for periodic logging
    pub const FRAME_LOG_INTERVAL: u64 = 30;

    /// Pipeline state change timeout on stop
    pub const STOP_TIMEOUT_SECS: u64 = 2;

    /// Pipeline playing state timeout on start
    pub const START_TIMEOUT_SECS: u64 = 5;

    /// Pause before the first countdown digit appears
    pub const COUNTDOWN_LEAD_IN: Duration = Duration::from_millis(500);

    /// Interval between countdown digits
    pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

    /// How long a status message stays on the preview
    pub const STATUS_DISPLAY: Duration = Duration::from_secs(3);

    /// How long the CLI waits for the camera to deliver a usable frame
    pub const CLI_CAPTURE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Frames delivered during this warm-up window are skipped by the CLI
    pub const CLI_WARMUP: Duration = Duration::from_millis(500);
}

/// Supported filter asset formats
pub mod file_formats {
    /// Supported image file extensions
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

    /// Check if a file extension is a supported image format
    pub fn is_image_extension(ext: &str) -> bool {
        IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }
}

/// Application information utilities
pub mod app_info {
    use std::path::Path;

    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }

    /// Check if the application is running inside a Flatpak sandbox
    pub fn is_flatpak() -> bool {
        Path::new("/.flatpak-info").exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions_case_insensitive() {
        assert!(file_formats::is_image_extension("PNG"));
        assert!(file_formats::is_image_extension("jpeg"));
        assert!(!file_formats::is_image_extension("txt"));
        assert!(!file_formats::is_image_extension(""));
    }

    #[test]
    fn test_countdown_choices_include_off() {
        assert_eq!(COUNTDOWN_CHOICES[0], 0);
    }
}
