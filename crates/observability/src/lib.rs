//! Process-wide tracing setup shared by Larder binaries.

/// Tracing configuration (filters, formatter).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize tracing with the format chosen by `LARDER_LOG_FORMAT`.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    self::tracing::init(LogFormat::from_env());
}
