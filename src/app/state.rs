// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::backends::camera::types::{CameraDevice, CameraFrame};
use crate::config::Config;
use crate::countdown::CountdownTimer;
use crate::filters::FilterCatalog;
use crate::overlay::Compositor;
use crate::printing::PrintCompletion;
use crate::session::BoothSession;
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use cosmic::widget::image::Handle;
use std::path::PathBuf;
use std::sync::Arc;

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,

    // ===== Booth =====
    /// Filters, overlays and the captured photo
    pub session: BoothSession,
    /// Rasterizer for the preview, keeps resized overlays between frames
    pub compositor: Compositor,
    /// Folder the current catalog was loaded from
    pub filters_folder: PathBuf,
    /// Catalog thumbnails for the filter drawer, in catalog order
    pub filter_thumbnails: Vec<Handle>,
    /// Composited image shown in place of the live feed
    pub preview: Option<Handle>,
    /// Status line text and the id of the timer that clears it
    pub status: Option<(String, u64)>,
    /// Counter for status line timers
    pub status_generation: u64,

    // ===== Camera =====
    /// Enumerated cameras
    pub available_cameras: Vec<CameraDevice>,
    /// Camera names for the settings dropdown
    pub camera_dropdown_options: Vec<String>,
    /// Index into `available_cameras`
    pub current_camera_index: usize,
    /// Whether the preview pipeline should be running
    pub camera_active: bool,
    /// Bumped on every camera start so the preview subscription restarts
    pub camera_generation: u64,
    /// Latest live frame
    pub current_frame: Option<Arc<CameraFrame>>,
    /// Screen saver cookie while the camera runs
    pub inhibit_cookie: Option<u32>,

    // ===== Capture =====
    /// Capture countdown
    pub countdown: CountdownTimer,
    /// A save is in flight
    pub is_saving: bool,
    /// A print job is in flight
    pub is_printing: bool,
    /// Where the last capture was written
    pub last_saved_path: Option<PathBuf>,

    // ===== Settings =====
    /// Theme names for the settings dropdown
    pub theme_dropdown_options: Vec<String>,
    /// Countdown choices for the settings dropdown
    pub countdown_dropdown_options: Vec<String>,
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
    Filters,
}

/// Overlay edits, one per adjustment button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAdjustment {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ScaleUp,
    ScaleDown,
    RotateLeft,
    RotateRight,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page (About, Settings, Filters)
    ToggleContextPage(ContextPage),
    /// Configuration changed on disk
    UpdateConfig(Config),
    /// Clear the status line if the timer id still matches
    ClearStatus(u64),

    // ===== Startup =====
    /// Cameras enumerated asynchronously during startup
    CamerasInitialized(Vec<CameraDevice>, usize),
    /// Filter catalog decoded (folder, catalog)
    FiltersLoaded(PathBuf, Arc<FilterCatalog>),
    /// Re-read the filter folder
    ReloadFilters,

    // ===== Camera Control =====
    /// Select specific camera by index
    SelectCamera(usize),
    /// Start the live preview (resets a finished capture)
    StartCamera,
    /// Stop the live preview
    StopCamera,
    /// New camera frame received from pipeline
    CameraFrame(Arc<CameraFrame>),
    /// The preview pipeline could not be created
    CameraFailed(String),
    /// Screen saver inhibit request finished
    InhibitAcquired(Result<u32, String>),
    /// Screen saver inhibit release finished
    InhibitReleased(Result<(), String>),

    // ===== Filters =====
    /// Show the pending overlay for the current filter
    ShowFilters,
    NextFilter,
    PreviousFilter,
    /// Jump to a catalog entry
    SelectFilter(usize),
    /// Commit the pending overlay
    ApplyFilter,
    /// Edit the pending overlay
    AdjustOverlay(OverlayAdjustment),

    // ===== Capture =====
    /// Capture button pressed (starts or aborts the countdown)
    Capture,
    /// Countdown step for the countdown with this id
    CountdownTick(u64),
    /// Flatten and write the capture
    SavePhoto,
    /// Save finished
    PhotoSaved(Result<PathBuf, String>),
    /// Send the capture to the printer
    PrintPhoto,
    /// Print submission finished
    PrintFinished(PrintCompletion),

    // ===== Settings =====
    SelectTheme(usize),
    SelectCountdown(usize),
    ToggleMirrorPreview,
    OpenFiltersFolder,
    OpenOutputFolder,
}
