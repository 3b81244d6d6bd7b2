//! Logging initialization

/// Logger builder with the default filter level of `info`.
///
/// Override with the RUST_LOG environment variable.
pub fn builder() -> env_logger::Builder {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
}

/// Initialize the logging system
///
/// Keeps any logger the host application already installed.
///
/// # Example
/// ```
/// brickyard::core::logging::init();
/// log::info!("Editor started");
/// ```
pub fn init() {
    let _ = builder().try_init();
}

/// Initialize logging with millisecond timestamps, for command-line tools
pub fn init_timestamped() {
    let _ = builder().format_timestamp_millis().try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        init_timestamped();
        init();
        init_timestamped();
        log::info!("logger installed");
    }
}
