//! Logging initialization and utilities

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
///
/// # Example
/// ```
/// seasons::core::logging::init();
/// log::info!("Simulation started");
/// ```
pub fn init() {
    // Safe to call more than once; later calls are no-ops
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init();
}
