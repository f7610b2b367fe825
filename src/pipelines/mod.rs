// SPDX-License-Identifier: MPL-2.0

//! Processing pipelines
//!
//! - [`photo`]: frame conversion, PNG encoding and saving the capture

pub mod photo;
