// SPDX-License-Identifier: GPL-3.0-only

//! Print handlers

use crate::app::state::{AppModel, Message};
use crate::errors::PrintError;
use crate::printing::{self, LpPrinter, PrintCompletion, PrintJob};
use crate::storage;
use cosmic::Task;
use tracing::{info, warn};

impl AppModel {
    pub(crate) fn handle_print_photo(&mut self) -> Task<cosmic::Action<Message>> {
        if self.is_printing {
            info!("Print already in progress");
            return Task::none();
        }

        let Some(image) = self.session.flattened() else {
            warn!(error = %PrintError::NothingToPrint, "Print skipped");
            return Task::none();
        };

        self.is_printing = true;
        let printer = LpPrinter::new(self.config.print_command.clone());
        let job = PrintJob::titled(self.config.print_title.clone());
        let dir = storage::output_directory();
        info!(command = printer.command(), title = %job.title, "Submitting print job");

        Task::perform(
            async move { printing::print_image(&printer, &job, image, dir).await },
            |completion| cosmic::Action::App(Message::PrintFinished(completion)),
        )
    }

    pub(crate) fn handle_print_finished(
        &mut self,
        completion: PrintCompletion,
    ) -> Task<cosmic::Action<Message>> {
        self.is_printing = false;
        completion.log();
        Task::none()
    }
}
