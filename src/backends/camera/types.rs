// SPDX-License-Identifier: MPL-2.0

//! Shared types for the camera backend

use std::sync::Arc;

/// Represents a camera device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub name: String,
    /// Capture target: `pipewire-serial-N`, `pipewire-N`, a `/dev/video*`
    /// path, or empty to let the source pick a default camera
    pub path: String,
}

impl CameraDevice {
    /// Placeholder used when no camera could be enumerated
    pub fn default_camera() -> Self {
        Self {
            name: "Default Camera".to_string(),
            path: String::new(),
        }
    }

    pub fn is_v4l2_path(&self) -> bool {
        self.path.starts_with("/dev/video")
    }

    /// PipeWire `target-object` value for this device, if it names a node
    pub fn pipewire_target(&self) -> Option<&str> {
        self.path
            .strip_prefix("pipewire-serial-")
            .or_else(|| self.path.strip_prefix("pipewire-"))
            .filter(|target| !target.is_empty())
    }
}

/// Requested capture format; zero dimensions let the source negotiate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraFormat {
    pub width: u32,
    pub height: u32,
    pub framerate: Option<u32>,
}

impl std::fmt::Display for CameraFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.width, self.height, self.framerate) {
            (0, _, _) | (_, 0, _) => write!(f, "auto"),
            (w, h, Some(fps)) => write!(f, "{}x{} @ {}fps", w, h, fps),
            (w, h, None) => write!(f, "{}x{}", w, h),
        }
    }
}

/// A single RGBA frame from the camera
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Bytes per row, may include padding
    pub stride: u32,
    /// RGBA pixels
    pub data: Arc<[u8]>,
}

/// Frame receiver type for preview streams
pub type FrameReceiver = futures::channel::mpsc::Receiver<CameraFrame>;

/// Frame sender type for preview streams
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Backend is not available on this system
    NotAvailable(String),
    /// Failed to initialize backend
    InitializationFailed(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::NotAvailable(msg) => write!(f, "Backend not available: {}", msg),
            BackendError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<BackendError> for crate::errors::CameraError {
    fn from(err: BackendError) -> Self {
        crate::errors::CameraError::InitializationFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipewire_target_from_path() {
        let serial = CameraDevice {
            name: "Webcam".into(),
            path: "pipewire-serial-2146".into(),
        };
        assert_eq!(serial.pipewire_target(), Some("2146"));

        let node = CameraDevice {
            name: "Webcam".into(),
            path: "pipewire-76".into(),
        };
        assert_eq!(node.pipewire_target(), Some("76"));

        assert_eq!(CameraDevice::default_camera().pipewire_target(), None);
    }

    #[test]
    fn test_format_display() {
        assert_eq!(CameraFormat::default().to_string(), "auto");
        let format = CameraFormat {
            width: 1280,
            height: 720,
            framerate: Some(30),
        };
        assert_eq!(format.to_string(), "1280x720 @ 30fps");
    }
}
