// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for booth operations
//!
//! This module provides command-line functionality for:
//! - Listing available cameras
//! - Listing the filter catalog
//! - Taking a photo with filters applied
//! - Printing a saved photo

use picture_a_state::app::APP_ID;
use picture_a_state::backends::camera::{self, CameraBackend};
use picture_a_state::config::Config;
use picture_a_state::constants::{MAX_APPLIED_OVERLAYS, timing};
use picture_a_state::errors::{CameraError, FilterError, PrintError};
use picture_a_state::filters::FilterCatalog;
use picture_a_state::pipelines::photo::{PhotoEncoder, frame_to_image};
use picture_a_state::printing::{LpPrinter, PrintCompletion, PrintJob, Printer};
use picture_a_state::session::{ApplyOutcome, BoothSession};
use picture_a_state::storage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// List all available cameras
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    gstreamer::init()?;

    let cameras = camera::get_backend().enumerate_cameras();

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        println!("  [{}] {}", index, camera.name);
        println!("      Path: {}", camera.path);
    }

    Ok(())
}

/// List the filter catalog with the indices `photo --filter` expects
pub fn list_filters() -> Result<(), Box<dyn std::error::Error>> {
    let (_, config) = Config::load(APP_ID);
    let folder = storage::filters_directory(config.filters_folder.as_deref());
    let catalog = FilterCatalog::load(&folder);

    println!("Filter folder: {}", folder.display());
    if catalog.is_empty() {
        println!("No filters found.");
        return Ok(());
    }

    println!();
    for (index, asset) in catalog.iter().enumerate() {
        println!(
            "  [{}] {} ({}x{})",
            index,
            asset.name,
            asset.image.width(),
            asset.image.height()
        );
    }

    Ok(())
}

/// Take a photo, apply `filters` at default placement and save it
pub fn take_photo(
    camera_index: usize,
    filters: Vec<usize>,
    countdown: Option<u32>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if filters.len() > MAX_APPLIED_OVERLAYS {
        return Err(FilterError::LimitReached.into());
    }

    gstreamer::init()?;
    let (_, config) = Config::load(APP_ID);

    let backend = camera::get_backend();
    let cameras = backend.enumerate_cameras();
    if cameras.is_empty() {
        return Err(CameraError::NoCameraFound.into());
    }
    let device = cameras
        .get(camera_index)
        .ok_or(CameraError::InvalidIndex {
            index: camera_index,
            available: cameras.len(),
        })?;
    println!("Using camera: {}", device.name);

    let folder = storage::filters_directory(config.filters_folder.as_deref());
    let mut session = BoothSession::new(Arc::new(FilterCatalog::load(&folder)));
    for &index in &filters {
        session.select_filter(index)?;
        if let ApplyOutcome::Applied { count } = session.apply_filter()? {
            println!("Applied filter {} ({} of {})", index, count, MAX_APPLIED_OVERLAYS);
        } else {
            println!("Applied filter {} (limit reached)", index);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let seconds = countdown.unwrap_or(config.countdown_seconds);

    let frame = runtime.block_on(async {
        for digit in (1..=seconds).rev() {
            println!("{digit}...");
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        println!("Capturing...");
        camera::capture_single_frame(
            backend.as_ref(),
            device,
            timing::CLI_WARMUP,
            timing::CLI_CAPTURE_TIMEOUT,
        )
        .await
    })?;

    session.capture(frame_to_image(&frame, config.mirror_preview)?);
    let flattened = session.save()?;

    let path = runtime.block_on(async {
        let encoded = PhotoEncoder::encode_png(flattened).await?;
        match output_target(output) {
            OutputTarget::Directory(dir) => PhotoEncoder::save(&encoded, &dir).await,
            OutputTarget::File(dir, name) => PhotoEncoder::write_file(&encoded, &dir, &name).await,
        }
    })?;

    println!("Photo saved: {}", path.display());
    Ok(())
}

/// Print `path`, or the last saved capture
pub fn print_photo(path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let (_, config) = Config::load(APP_ID);
    let path = path.unwrap_or_else(|| storage::captured_photo_path(&storage::output_directory()));
    if !path.is_file() {
        eprintln!("No photo at {}", path.display());
        return Err(PrintError::NothingToPrint.into());
    }

    let printer = LpPrinter::new(config.print_command.clone());
    let job = PrintJob::titled(config.print_title.clone());
    println!("Printing {} with {}", path.display(), printer.command());

    let runtime = tokio::runtime::Runtime::new()?;
    let completion = runtime.block_on(printer.submit(&job, &path));
    completion.log();

    match completion {
        PrintCompletion::Submitted => {
            println!("Print submitted");
            Ok(())
        }
        PrintCompletion::Failed(e) => Err(e.into()),
        PrintCompletion::Canceled => Err("Print canceled".into()),
    }
}

enum OutputTarget {
    /// Write `captured-photo.png` into this folder
    Directory(PathBuf),
    /// Write this file name into this folder
    File(PathBuf, String),
}

fn output_target(output: Option<PathBuf>) -> OutputTarget {
    let Some(path) = output else {
        return OutputTarget::Directory(storage::output_directory());
    };

    if path.is_dir() {
        return OutputTarget::Directory(path);
    }

    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            OutputTarget::File(dir, name.to_string())
        }
        None => OutputTarget::Directory(path),
    }
}
