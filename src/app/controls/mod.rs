// SPDX-License-Identifier: MPL-2.0

//! Booth controls
//!
//! - Capture button (round shutter, disabled while a capture is on screen)
//! - Overlay adjustment buttons (move, scale, rotate the pending filter)

pub mod adjust_buttons;
pub mod capture_button;
