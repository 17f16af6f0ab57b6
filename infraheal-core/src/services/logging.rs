//! Logging service

use crate::models::LogLevel;

/// Initialize logging with the specified level
pub fn init_logging(level: LogLevel) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match level {
        LogLevel::Error => "infraheal=error",
        LogLevel::Warn => "infraheal=warn",
        LogLevel::Info => "infraheal=info",
        LogLevel::Debug => "infraheal=debug",
        LogLevel::Trace => "infraheal=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_initialization() {
        // Just test that initialization doesn't panic
        let _ = init_logging(LogLevel::Info);
    }
}
