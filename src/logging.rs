//! Logger setup.

/// Install `env_logger` with an `info` default, overridable through `RUST_LOG`.
///
/// Safe to call more than once; later calls do nothing.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
