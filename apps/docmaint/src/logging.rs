//! Logging setup on stderr so stdout stays reserved for reports.

use tracing_subscriber::EnvFilter;

/// Level from `-v` occurrences, falling back to the configured level.
pub fn level_for(verbose: u8, configured: Option<&str>) -> String {
    match verbose {
        0 => configured.unwrap_or("warn").to_string(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `level`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: &str, color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_precedence() {
        assert_eq!(level_for(0, None), "warn");
        assert_eq!(level_for(0, Some("info")), "info");
        assert_eq!(level_for(1, Some("error")), "info");
        assert_eq!(level_for(3, None), "debug");
    }
}
