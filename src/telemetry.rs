use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Directives appended to the configured level so wage lookups do not flood the log
/// with connection-pool chatter.
const HTTP_CLIENT_DIRECTIVES: &str = "hyper=warn,hyper_util=warn,reqwest=warn";

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "invalid log level/filter '{value}': unable to build EnvFilter")
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `APP_LOG_LEVEL` when set.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

fn configured_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    let directives = format!("{},{HTTP_CLIENT_DIRECTIVES}", log_level.trim());
    EnvFilter::try_new(directives).map_err(|source| TelemetryError::EnvFilter {
        value: log_level.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_filter_from_level() {
        let filter = configured_filter("debug").expect("level parses");
        let rendered = filter.to_string();
        assert!(rendered.contains("debug"));
        assert!(rendered.contains("reqwest=warn"));
    }

    #[test]
    fn reports_unparseable_levels() {
        let err = configured_filter("info,wages=loud").expect_err("filter rejected");
        assert!(err.to_string().contains("info,wages=loud"));
    }
}
