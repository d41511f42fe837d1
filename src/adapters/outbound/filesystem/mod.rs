/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod license_locator;
mod source_tree_resolver;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use license_locator::FileSystemLicenseLocator;
pub use source_tree_resolver::{SourceTreeResolver, MANIFEST_FILE};
