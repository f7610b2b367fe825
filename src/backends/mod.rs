// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for camera capture
//!
//! - [`camera`]: device enumeration and RGBA frame streaming over GStreamer

pub mod camera;
