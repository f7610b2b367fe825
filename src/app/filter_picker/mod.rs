// SPDX-License-Identifier: GPL-3.0-only

//! Filter picker module
//!
//! Grid of the decorative overlays found in the filter folder, shown in the
//! context drawer. Picking one makes it the pending overlay.

mod view;
