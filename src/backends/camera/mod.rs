// SPDX-License-Identifier: MPL-2.0

//! Camera backend
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │  ← preview subscription owns the pipeline
//! └──────────┬──────────┘
//!            ▼
//! ┌─────────────────────┐
//! │  CameraBackend Trait│  ← enumeration, pipeline creation
//! └──────────┬──────────┘
//!            ▼
//! ┌─────────────────────┐
//! │ GStreamer pipeline  │  ← pipewiresrc / v4l2src / autovideosrc
//! └─────────────────────┘
//! ```

pub mod enumeration;
pub mod pipeline;
pub mod types;

pub use pipeline::CameraPipeline;
pub use types::*;

use crate::constants::pipeline as pipeline_consts;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub trait CameraBackend: Send + Sync {
    /// Enumerate available cameras; never empty
    fn enumerate_cameras(&self) -> Vec<CameraDevice>;

    /// Check if this backend can capture on the current system
    fn is_available(&self) -> bool;

    /// Start streaming `device` into `sender`
    ///
    /// Frames keep flowing until the returned pipeline is dropped.
    fn start_preview(
        &self,
        device: &CameraDevice,
        format: &CameraFormat,
        sender: FrameSender,
    ) -> BackendResult<CameraPipeline>;
}

/// GStreamer backend, preferring PipeWire when installed
#[derive(Debug, Default)]
pub struct GstCameraBackend;

impl GstCameraBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CameraBackend for GstCameraBackend {
    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        enumeration::enumerate_cameras()
    }

    fn is_available(&self) -> bool {
        gstreamer::init().is_ok()
    }

    fn start_preview(
        &self,
        device: &CameraDevice,
        format: &CameraFormat,
        sender: FrameSender,
    ) -> BackendResult<CameraPipeline> {
        if !self.is_available() {
            return Err(BackendError::NotAvailable(
                "GStreamer could not be initialized".to_string(),
            ));
        }
        CameraPipeline::new(
            device,
            format,
            sender,
            enumeration::is_pipewire_available(),
        )
    }
}

/// Get the camera backend
pub fn get_backend() -> Box<dyn CameraBackend> {
    Box::new(GstCameraBackend::new())
}

/// Create a frame channel sized for preview
pub fn frame_channel() -> (FrameSender, FrameReceiver) {
    futures::channel::mpsc::channel(pipeline_consts::FRAME_CHANNEL_CAPACITY)
}

/// Grab one frame, skipping those delivered during `warmup`
///
/// Used by the command line where there is no live preview.
pub async fn capture_single_frame(
    backend: &dyn CameraBackend,
    device: &CameraDevice,
    warmup: Duration,
    timeout: Duration,
) -> BackendResult<CameraFrame> {
    let (sender, mut receiver) = frame_channel();
    let pipeline = backend.start_preview(device, &CameraFormat::default(), sender)?;
    let started = Instant::now();

    let wait = async {
        while let Some(frame) = receiver.next().await {
            if started.elapsed() >= warmup {
                return Some(frame);
            }
            debug!("Skipping warm-up frame");
        }
        None
    };

    let result = tokio::time::timeout(timeout, wait).await;
    drop(pipeline);

    match result {
        Ok(Some(frame)) => {
            info!(width = frame.width, height = frame.height, "Frame captured");
            Ok(frame)
        }
        Ok(None) => Err(BackendError::Other("Camera stream ended".to_string())),
        Err(_) => Err(BackendError::Other(format!(
            "No frame within {:.1}s",
            timeout.as_secs_f32()
        ))),
    }
}
