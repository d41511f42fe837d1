/// Type alias for Result with anyhow::Error as the error type.
/// Typed failures (`LicenseBomError`) travel inside the anyhow error and can be
/// recovered with `downcast_ref` at the CLI boundary.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
