// SPDX-License-Identifier: GPL-3.0-only

//! Camera discovery
//!
//! Cameras are discovered as PipeWire `Video/Source` nodes through
//! `pw-cli`. Without PipeWire, `/dev/video*` nodes are listed instead, and
//! when nothing turns up a default entry lets the source auto-select.

use super::types::CameraDevice;
use tracing::{debug, info, warn};

/// Enumerate cameras, always returning at least one entry
pub fn enumerate_cameras() -> Vec<CameraDevice> {
    if let Some(cameras) = try_enumerate_with_pw_cli() {
        info!(count = cameras.len(), "Cameras enumerated via PipeWire");
        return cameras;
    }

    let cameras = enumerate_v4l2_nodes();
    if !cameras.is_empty() {
        info!(count = cameras.len(), "Cameras enumerated via V4L2 device nodes");
        return cameras;
    }

    info!("No cameras enumerated, using default camera");
    vec![CameraDevice::default_camera()]
}

/// Check whether the `pipewiresrc` element is installed
pub fn is_pipewire_available() -> bool {
    if let Err(e) = gstreamer::init() {
        warn!(error = %e, "GStreamer init failed");
        return false;
    }
    gstreamer::ElementFactory::find("pipewiresrc").is_some()
}

fn try_enumerate_with_pw_cli() -> Option<Vec<CameraDevice>> {
    debug!("Trying pw-cli for camera enumeration");

    let output = std::process::Command::new("pw-cli")
        .args(["ls", "Node"])
        .output()
        .ok()?;

    if !output.status.success() {
        debug!("pw-cli command failed");
        return None;
    }

    let cameras = parse_pw_cli_nodes(&String::from_utf8_lossy(&output.stdout));
    if cameras.is_empty() {
        debug!("No cameras found via pw-cli");
        None
    } else {
        Some(cameras)
    }
}

#[derive(Default)]
struct NodeEntry {
    id: Option<String>,
    serial: Option<String>,
    name: Option<String>,
    is_video_source: bool,
}

impl NodeEntry {
    fn into_device(self) -> Option<CameraDevice> {
        if !self.is_video_source {
            return None;
        }
        let name = self.name?;
        let path = match (self.serial, self.id) {
            (Some(serial), _) => format!("pipewire-serial-{}", serial),
            (None, Some(id)) => format!("pipewire-{}", id),
            (None, None) => return None,
        };
        debug!(name = %name, path = %path, "Found video camera");
        Some(CameraDevice { name, path })
    }
}

/// Parse `pw-cli ls Node` output into camera devices
pub fn parse_pw_cli_nodes(output: &str) -> Vec<CameraDevice> {
    let mut cameras = Vec::new();
    let mut current = NodeEntry::default();

    for line in output.lines() {
        let trimmed = line.trim();

        // "id 76, type PipeWire:Interface:Node/3"
        if let Some(rest) = trimmed.strip_prefix("id ")
            && trimmed.contains("type PipeWire:Interface:Node")
        {
            cameras.extend(std::mem::take(&mut current).into_device());
            current.id = rest.split(',').next().map(|id| id.trim().to_string());
            continue;
        }

        if trimmed.contains("media.class") && trimmed.contains("\"Video/Source\"") {
            current.is_video_source = true;
        } else if trimmed.contains("object.serial") {
            current.serial = extract_quoted_value(trimmed);
        } else if trimmed.contains("node.description") {
            current.name = extract_quoted_value(trimmed);
        }
    }
    cameras.extend(current.into_device());

    cameras
}

/// Extract quoted value from a property line (`key = "value"` -> `value`)
fn extract_quoted_value(line: &str) -> Option<String> {
    let start = line.find('"')?;
    let end = line[start + 1..].find('"')?;
    Some(line[start + 1..start + 1 + end].to_string())
}

fn enumerate_v4l2_nodes() -> Vec<CameraDevice> {
    let Ok(entries) = std::fs::read_dir("/dev") else {
        return Vec::new();
    };

    let mut paths: Vec<String> = entries
        .flatten()
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with("video"))
        .map(|name| format!("/dev/{}", name))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let node = path.trim_start_matches("/dev/").to_string();
            let name = std::fs::read_to_string(format!("/sys/class/video4linux/{}/name", node))
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|_| path.clone());
            CameraDevice { name, path }
        })
        .collect()
}
