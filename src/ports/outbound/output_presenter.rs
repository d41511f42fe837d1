use crate::shared::Result;

/// OutputPresenter port for delivering the rendered report
///
/// Abstracts the destination (stdout or a file).
pub trait OutputPresenter {
    /// Writes the rendered report to its destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the destination fails
    /// - The output path is a symlink or its parent directory is missing
    fn present(&self, content: &str) -> Result<()>;
}
