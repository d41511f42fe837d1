use crate::shared::error::LicenseBomError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a user-supplied configuration document (overrides, config file)
pub const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum size of a license artifact. Real license texts stay well below this;
/// anything larger is almost certainly not a license file.
pub const MAX_LICENSE_FILE_SIZE: u64 = 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        return Err(LicenseBomError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "Path is a symbolic link. {} operations on symbolic links are not allowed.",
                operation
            ),
            hint: "Point the option at the link target instead".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    validate_not_symlink(path, &format!("{} read", file_description))?;

    if !path.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(LicenseBomError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Check that the path names the intended file".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Reads a user-supplied document after the symlink, file type and size checks.
pub fn read_config_document(path: &Path, file_description: &str) -> Result<String> {
    validate_regular_file(path, file_description)?;

    let size = fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?
        .len();
    validate_file_size(size, path, MAX_CONFIG_FILE_SIZE)?;

    fs::read_to_string(path).map_err(|e| {
        LicenseBomError::FileReadError {
            path: path.to_path_buf(),
            details: format!("Failed to read {}: {}", file_description, e),
        }
        .into()
    })
}

/// Reads a license artifact as raw bytes.
///
/// Symbolic links are followed here: vendored trees commonly link a shared
/// LICENSE file into sub-projects.
pub fn read_license_bytes(path: &Path) -> Result<Vec<u8>> {
    let metadata = fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read metadata of {}: {}", path.display(), e))?;

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }
    validate_file_size(metadata.len(), path, MAX_LICENSE_FILE_SIZE)?;

    fs::read(path).map_err(|e| {
        LicenseBomError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}
