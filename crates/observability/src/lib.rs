//! Process-wide logging setup.

/// Initialize tracing for the process.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filter, format, writer).
pub mod tracing;

pub use self::tracing::LogFormat;
