// SPDX-License-Identifier: MPL-2.0

//! GStreamer capture pipeline
//!
//! `source ! videoconvert ! video/x-raw,format=RGBA ! appsink`, with frames
//! pushed from the appsink callback into a bounded channel. Dropping the
//! pipeline releases the camera.

use super::types::*;
use crate::constants::{pipeline, timing};
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Build the `gst-launch` style description for `device`
pub fn pipeline_description(
    device: &CameraDevice,
    format: &CameraFormat,
    pipewire_available: bool,
) -> String {
    let source = if device.is_v4l2_path() {
        format!("v4l2src device={}", device.path)
    } else if pipewire_available {
        match device.pipewire_target() {
            Some(target) => format!("pipewiresrc target-object={}", target),
            None => "pipewiresrc".to_string(),
        }
    } else {
        "autovideosrc".to_string()
    };

    let mut caps = format!("video/x-raw,format={}", pipeline::OUTPUT_FORMAT);
    if format.width > 0 && format.height > 0 {
        caps.push_str(&format!(
            ",width=(int){},height=(int){}",
            format.width, format.height
        ));
    }
    if let Some(fps) = format.framerate {
        caps.push_str(&format!(",framerate=(fraction){}/1", fps));
    }

    format!(
        "{} ! videoconvert ! videoscale ! {} ! appsink name=sink",
        source, caps
    )
}

/// Running camera pipeline
pub struct CameraPipeline {
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
}

impl CameraPipeline {
    /// Build and start a pipeline delivering RGBA frames to `frame_sender`
    pub fn new(
        device: &CameraDevice,
        format: &CameraFormat,
        frame_sender: FrameSender,
        pipewire_available: bool,
    ) -> BackendResult<Self> {
        info!(device = %device.name, format = %format, "Creating camera pipeline");

        gstreamer::init().map_err(|e| BackendError::InitializationFailed(e.to_string()))?;

        let description = pipeline_description(device, format, pipewire_available);
        info!(pipeline = %description, "Launching pipeline");

        let pipeline = gstreamer::parse::launch(&description)
            .map_err(|e| BackendError::InitializationFailed(e.to_string()))?
            .dynamic_cast::<gstreamer::Pipeline>()
            .map_err(|_| {
                BackendError::InitializationFailed("Launch did not produce a pipeline".to_string())
            })?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| BackendError::InitializationFailed("Failed to get appsink".to_string()))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| {
                BackendError::InitializationFailed("Failed to cast appsink".to_string())
            })?;

        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", pipeline::MAX_BUFFERS);
        appsink.set_property("drop", true);
        appsink.set_property("enable-last-sample", false);

        let frame_counter = Arc::new(AtomicU64::new(0));
        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame_start = Instant::now();
                    let frame_num = frame_counter.fetch_add(1, Ordering::Relaxed);

                    let sample = appsink.pull_sample().map_err(|e| {
                        if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                            error!(frame = frame_num, error = ?e, "Failed to pull sample");
                        }
                        gstreamer::FlowError::Eos
                    })?;

                    let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;
                    if buffer.flags().contains(gstreamer::BufferFlags::CORRUPTED) {
                        warn!(frame = frame_num, "Buffer marked as corrupted, skipping frame");
                        return Ok(gstreamer::FlowSuccess::Ok);
                    }

                    let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
                    let video_info = VideoInfo::from_caps(caps).map_err(|e| {
                        error!(frame = frame_num, error = ?e, "Failed to get video info");
                        gstreamer::FlowError::Error
                    })?;

                    let map = buffer.map_readable().map_err(|e| {
                        error!(frame = frame_num, error = ?e, "Failed to map buffer");
                        gstreamer::FlowError::Error
                    })?;

                    let frame = CameraFrame {
                        width: video_info.width(),
                        height: video_info.height(),
                        stride: video_info.stride()[0] as u32,
                        data: Arc::from(map.as_slice()),
                    };

                    let mut sender = frame_sender.clone();
                    match sender.try_send(frame) {
                        Ok(()) => {
                            if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                                debug!(
                                    frame = frame_num,
                                    width = video_info.width(),
                                    height = video_info.height(),
                                    elapsed_us = frame_start.elapsed().as_micros(),
                                    "Frame delivered"
                                );
                            }
                        }
                        Err(e) if e.is_disconnected() => {
                            debug!("Frame receiver gone, stopping delivery");
                            return Err(gstreamer::FlowError::Flushing);
                        }
                        Err(_) => {
                            if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                                debug!(frame = frame_num, "Frame dropped (channel full)");
                            }
                        }
                    }

                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline.set_state(gstreamer::State::Playing).map_err(|e| {
            BackendError::InitializationFailed(format!("Failed to start pipeline: {}", e))
        })?;

        let (result, state, pending) = pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::START_TIMEOUT_SECS,
        ));
        debug!(result = ?result, state = ?state, pending = ?pending, "Pipeline state");
        if result.is_err() {
            let _ = pipeline.set_state(gstreamer::State::Null);
            return Err(BackendError::InitializationFailed(
                "Pipeline failed to reach PLAYING state".to_string(),
            ));
        }
        if state != gstreamer::State::Playing {
            warn!("Pipeline is not in PLAYING state yet");
        }

        info!("Camera pipeline started");
        Ok(Self { pipeline, appsink })
    }
}

impl Drop for CameraPipeline {
    fn drop(&mut self) {
        debug!("Stopping camera pipeline");
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        if let Err(e) = self.pipeline.set_state(gstreamer::State::Null) {
            warn!(error = %e, "Failed to set pipeline to NULL");
            return;
        }
        let (result, state, _) = self.pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::STOP_TIMEOUT_SECS,
        ));
        match result {
            Ok(_) => info!(state = ?state, "Camera released"),
            Err(e) => debug!(error = ?e, state = ?state, "Pipeline state change had issues"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(path: &str) -> CameraDevice {
        CameraDevice {
            name: "Test".into(),
            path: path.into(),
        }
    }

    #[test]
    fn test_pipewire_source_with_target() {
        let desc = pipeline_description(
            &device("pipewire-serial-42"),
            &CameraFormat::default(),
            true,
        );
        assert_eq!(
            desc,
            "pipewiresrc target-object=42 ! videoconvert ! videoscale ! \
             video/x-raw,format=RGBA ! appsink name=sink"
        );
    }

    #[test]
    fn test_v4l2_path_uses_v4l2src() {
        let format = CameraFormat {
            width: 640,
            height: 480,
            framerate: Some(30),
        };
        let desc = pipeline_description(&device("/dev/video0"), &format, true);
        assert!(desc.starts_with("v4l2src device=/dev/video0 ! "));
        assert!(desc.contains("width=(int)640,height=(int)480,framerate=(fraction)30/1"));
    }

    #[test]
    fn test_fallback_without_pipewire() {
        let desc = pipeline_description(&CameraDevice::default_camera(), &CameraFormat::default(), false);
        assert!(desc.starts_with("autovideosrc ! "));
    }
}
