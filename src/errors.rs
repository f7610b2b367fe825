// SPDX-License-Identifier: MPL-2.0

//! Error types for the photo booth
//!
//! Handlers in the UI never propagate these: they are logged and the
//! interface stays in whatever state it was in.

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Overlay/filter errors
    Filter(FilterError),
    /// Photo capture and save errors
    Photo(PhotoError),
    /// Printing errors
    Print(PrintError),
    /// Storage/filesystem errors
    Storage(String),
}

/// Camera-specific errors
#[derive(Debug, Clone)]
pub enum CameraError {
    /// No camera devices found
    NoCameraFound,
    /// Camera index out of range
    InvalidIndex { index: usize, available: usize },
    /// Camera initialization failed
    InitializationFailed(String),
}

/// Filter and overlay errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The filter catalog is empty
    NoFilters,
    /// Filters are locked (limit reached or photo already saved)
    Locked,
    /// No overlay is being edited
    NoPendingOverlay,
    /// Already showing the first filter
    AtFirstFilter,
    /// Already showing the last filter
    AtLastFilter,
    /// Index outside the catalog
    IndexOutOfRange { index: usize, len: usize },
    /// The applied overlay stack is full
    LimitReached,
}

/// Photo capture errors
#[derive(Debug, Clone)]
pub enum PhotoError {
    /// Nothing has been captured yet
    NotCaptured,
    /// Frame data does not match its declared dimensions
    InvalidFrame(String),
    /// Encoding failed
    EncodingFailed(String),
    /// Save failed
    SaveFailed(String),
}

/// Printing errors
#[derive(Debug, Clone)]
pub enum PrintError {
    /// No captured photo to print
    NothingToPrint,
    /// The print command could not be started
    CommandUnavailable(String),
    /// The print subsystem rejected the job
    Rejected(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Filter(e) => write!(f, "Filter error: {}", e),
            AppError::Photo(e) => write!(f, "Photo error: {}", e),
            AppError::Print(e) => write!(f, "Print error: {}", e),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoCameraFound => write!(f, "No camera devices found"),
            CameraError::InvalidIndex { index, available } => write!(
                f,
                "Camera index {} out of range ({} available)",
                index, available
            ),
            CameraError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::NoFilters => write!(f, "No filters available"),
            FilterError::Locked => write!(f, "Filters cannot be added right now"),
            FilterError::NoPendingOverlay => write!(f, "No filter is being edited"),
            FilterError::AtFirstFilter => write!(f, "Already at the first filter"),
            FilterError::AtLastFilter => write!(f, "Already at the last filter"),
            FilterError::IndexOutOfRange { index, len } => {
                write!(f, "Filter index {} out of range ({} filters)", index, len)
            }
            FilterError::LimitReached => write!(f, "Filter Limit Reached"),
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::NotCaptured => write!(f, "No photo has been captured"),
            PhotoError::InvalidFrame(msg) => write!(f, "Invalid frame: {}", msg),
            PhotoError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            PhotoError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl fmt::Display for PrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintError::NothingToPrint => write!(f, "Nothing to print"),
            PrintError::CommandUnavailable(msg) => write!(f, "Print command unavailable: {}", msg),
            PrintError::Rejected(msg) => write!(f, "Unable to print: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for FilterError {}
impl std::error::Error for PhotoError {}
impl std::error::Error for PrintError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        AppError::Filter(err)
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Photo(err)
    }
}

impl From<PrintError> for AppError {
    fn from(err: PrintError) -> Self {
        AppError::Print(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for PhotoError {
    fn from(err: std::io::Error) -> Self {
        PhotoError::SaveFailed(err.to_string())
    }
}

impl From<image::ImageError> for PhotoError {
    fn from(err: image::ImageError) -> Self {
        PhotoError::EncodingFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_message_matches_status_text() {
        assert_eq!(FilterError::LimitReached.to_string(), "Filter Limit Reached");
    }

    #[test]
    fn test_io_error_maps_to_save_failure() {
        let err: PhotoError = std::io::Error::other("disk full").into();
        assert!(matches!(err, PhotoError::SaveFailed(ref msg) if msg.contains("disk full")));
    }
}
