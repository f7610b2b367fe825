// SPDX-License-Identifier: GPL-3.0-only

//! Print submission
//!
//! A print job is always one colour page built from the flattened photo.
//! The image is written to a scratch PNG and handed to the system print
//! command (CUPS `lp` by default).

use crate::constants::{DEFAULT_PRINT_COMMAND, DEFAULT_PRINT_TITLE, PRINT_JOB_FILE};
use crate::errors::PrintError;
use crate::pipelines::photo::PhotoEncoder;
use image::RgbaImage;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// One colour copy of a single page; only the title varies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub title: String,
}

impl Default for PrintJob {
    fn default() -> Self {
        Self::titled(DEFAULT_PRINT_TITLE)
    }
}

impl PrintJob {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// How a print submission ended
#[derive(Debug, Clone)]
pub enum PrintCompletion {
    Submitted,
    Failed(PrintError),
    Canceled,
}

impl PrintCompletion {
    /// Log the outcome the way the UI reports it
    pub fn log(&self) {
        match self {
            Self::Submitted => info!("Print Submitted"),
            Self::Failed(e) => error!(error = %e, "Unable to print"),
            Self::Canceled => warn!("Print Task canceled or abandoned"),
        }
    }
}

pub trait Printer {
    /// Submit `file` as a single-page job
    fn submit(&self, job: &PrintJob, file: &Path) -> impl Future<Output = PrintCompletion> + Send;
}

/// Printer backed by the CUPS `lp` command
#[derive(Debug, Clone)]
pub struct LpPrinter {
    command: String,
}

impl Default for LpPrinter {
    fn default() -> Self {
        Self::new(DEFAULT_PRINT_COMMAND)
    }
}

impl LpPrinter {
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        let command = if command.trim().is_empty() {
            DEFAULT_PRINT_COMMAND.to_string()
        } else {
            command
        };
        Self { command }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Arguments passed to the print command
    pub fn arguments(job: &PrintJob, file: &Path) -> Vec<String> {
        vec![
            "-t".to_string(),
            job.title.clone(),
            "-n".to_string(),
            "1".to_string(),
            "-o".to_string(),
            "print-color-mode=color".to_string(),
            "-o".to_string(),
            "fit-to-page".to_string(),
            file.display().to_string(),
        ]
    }
}

impl Printer for LpPrinter {
    fn submit(&self, job: &PrintJob, file: &Path) -> impl Future<Output = PrintCompletion> + Send {
        let command = self.command.clone();
        let args = Self::arguments(job, file);

        async move {
            info!(command = %command, ?args, "Submitting print job");

            let output = match tokio::process::Command::new(&command)
                .args(&args)
                .output()
                .await
            {
                Ok(output) => output,
                Err(e) => {
                    return PrintCompletion::Failed(PrintError::CommandUnavailable(format!(
                        "{}: {}",
                        command, e
                    )));
                }
            };

            match output.status.code() {
                Some(0) => PrintCompletion::Submitted,
                Some(_) => {
                    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                    PrintCompletion::Failed(PrintError::Rejected(stderr))
                }
                // Killed by a signal
                None => PrintCompletion::Canceled,
            }
        }
    }
}

/// Encode `image`, write it to the scratch file in `dir` and submit it
pub async fn print_image<P: Printer>(
    printer: &P,
    job: &PrintJob,
    image: RgbaImage,
    dir: PathBuf,
) -> PrintCompletion {
    let encoded = match PhotoEncoder::encode_png(image).await {
        Ok(encoded) => encoded,
        Err(e) => return PrintCompletion::Failed(PrintError::Rejected(e.to_string())),
    };

    let file = match PhotoEncoder::write_file(&encoded, &dir, PRINT_JOB_FILE).await {
        Ok(path) => path,
        Err(e) => return PrintCompletion::Failed(PrintError::Rejected(e.to_string())),
    };

    printer.submit(job, &file).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lp_arguments_for_default_job() {
        let args = LpPrinter::arguments(&PrintJob::default(), Path::new("/tmp/photo.png"));
        assert_eq!(
            args,
            vec![
                "-t",
                "Picture A-State",
                "-n",
                "1",
                "-o",
                "print-color-mode=color",
                "-o",
                "fit-to-page",
                "/tmp/photo.png",
            ]
        );
    }

    #[test]
    fn test_lp_arguments_carry_title() {
        let args = LpPrinter::arguments(&PrintJob::titled("Party"), Path::new("p.png"));
        assert_eq!(args[1], "Party");
        assert_eq!(args.last().map(String::as_str), Some("p.png"));
    }

    #[test]
    fn test_blank_command_falls_back_to_lp() {
        assert_eq!(LpPrinter::new("  ").command(), "lp");
        assert_eq!(LpPrinter::new("lpr").command(), "lpr");
    }

    #[tokio::test]
    async fn test_missing_command_reports_failure() {
        let printer = LpPrinter::new("picture-a-state-no-such-command");
        let completion = printer
            .submit(&PrintJob::default(), Path::new("/nonexistent.png"))
            .await;
        assert!(matches!(
            completion,
            PrintCompletion::Failed(PrintError::CommandUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_failing_command_is_rejected() {
        // `false` ignores its arguments and exits 1
        let printer = LpPrinter::new("false");
        let completion = printer
            .submit(&PrintJob::default(), Path::new("/nonexistent.png"))
            .await;
        assert!(matches!(completion, PrintCompletion::Failed(PrintError::Rejected(_))));
    }
}
