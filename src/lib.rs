// SPDX-License-Identifier: MPL-2.0

//! Picture A-State - a photo booth for the COSMIC desktop environment
//!
//! Live camera preview with up to five decorative overlays, a countdown
//! capture, PNG export and printing.
//!
//! # Architecture
//!
//! - [`app`]: COSMIC application, views and message handlers
//! - [`backends`]: GStreamer camera source
//! - [`filters`]: Filter catalog loaded from the filter folder
//! - [`overlay`]: Overlay placement and the compositor
//! - [`session`]: Booth state (pending overlay, applied stack, capture)
//! - [`pipelines`]: Snapshot conversion and PNG encoding
//! - [`printing`]: Print job submission
//! - [`config`]: User configuration handling
//! - [`storage`]: Filter and output folder lookup
//!
//! # Example
//!
//! ```ignore
//! // This is a GUI application, typically run via:
//! // picture-a-state
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod countdown;
pub mod errors;
pub mod filters;
pub mod i18n;
pub mod inhibit;
pub mod overlay;
pub mod pipelines;
pub mod printing;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use app::{AppModel, Message};
pub use config::Config;
pub use filters::FilterCatalog;
pub use overlay::{Overlay, Rotation};
pub use session::BoothSession;
