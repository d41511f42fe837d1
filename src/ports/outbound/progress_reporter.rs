/// ProgressReporter port for user feedback during a scan
///
/// Domain services never print. They return warnings as data and the use
/// case forwards them here.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports per-package detection progress
    ///
    /// # Arguments
    /// * `current` - Packages processed so far
    /// * `total` - Packages to process
    /// * `message` - Optional detail, usually the package just finished
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a non-fatal problem
    fn report_warning(&self, message: &str);

    /// Reports completion of the scan
    fn report_completion(&self, message: &str);
}
