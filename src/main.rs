// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use picture_a_state::app::AppModel;
use picture_a_state::i18n;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "picture-a-state")]
#[command(about = "Photo booth with decorative overlays for the COSMIC desktop")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    List,

    /// List the filters found in the filter folder
    Filters,

    /// Take a photo with filters applied
    Photo {
        /// Camera index to use (from 'picture-a-state list')
        #[arg(short, long, default_value = "0")]
        camera: usize,

        /// Filter index to apply (from 'picture-a-state filters'), up to 5 times
        #[arg(short, long)]
        filter: Vec<usize>,

        /// Countdown in seconds (default: configured countdown)
        #[arg(long)]
        countdown: Option<u32>,

        /// Output file or folder (default: application data folder)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a photo (default: the last saved capture)
    Print {
        /// PNG file to print
        path: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=picture_a_state=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => cli::list_cameras(),
        Some(Commands::Filters) => cli::list_filters(),
        Some(Commands::Photo {
            camera,
            filter,
            countdown,
            output,
        }) => cli::take_photo(camera, filter, countdown, output),
        Some(Commands::Print { path }) => cli::print_photo(path),
        None => run_gui(),
    }
}

fn run_gui() -> Result<(), Box<dyn std::error::Error>> {
    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    // Settings for configuring the application window and iced runtime.
    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(480.0)
            .min_height(360.0),
    );

    // Starts the application's event loop with `()` as the application's flags.
    cosmic::app::run::<AppModel>(settings, ())?;

    Ok(())
}
