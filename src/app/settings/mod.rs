// SPDX-License-Identifier: GPL-3.0-only

//! Settings UI module
//!
//! Camera, appearance, capture and printing settings shown in the context drawer.

pub mod view;
