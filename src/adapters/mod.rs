/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// backed by the filesystem and the console.
pub mod outbound;
