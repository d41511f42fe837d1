use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;

const PROGRESS_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting scan progress to stderr
///
/// Keeps stdout free for the report. Per-package detection is drawn as an
/// indicatif progress bar; warnings are printed in yellow above it.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        let mut slot = self.progress_bar.borrow_mut();
        slot.get_or_insert_with(|| {
            let pb = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
                pb.set_style(style.progress_chars("=>-"));
            }
            pb
        })
        .clone()
    }

    fn finish_progress(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }

    /// Prints without tearing an active progress bar
    fn print_line(&self, line: &str) {
        match self.progress_bar.borrow().as_ref() {
            Some(pb) => pb.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.print_line(message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
        if current >= total {
            self.finish_progress();
        }
    }

    fn report_warning(&self, message: &str) {
        self.print_line(&format!("{} {}", "⚠️  Warning:".yellow().bold(), message));
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress();
        eprintln!("{}", message.green());
    }
}
