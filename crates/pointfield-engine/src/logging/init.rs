use std::sync::Once;

use log::LevelFilter;

/// Logger configuration for the demo binaries.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g.
/// "pointfield_sim=debug,wgpu_core=warn") and wins over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Level used when neither `env_filter` nor `RUST_LOG` is set.
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// wgpu internals are chatty at `info`; held at `warn` under the default level.
const QUIET_MODULES: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

static INIT: Once = Once::new();

/// Where the active filter came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterSource {
    Explicit(String),
    Level(LevelFilter),
}

fn resolve_filter(config: &LoggingConfig, rust_log: Option<String>) -> FilterSource {
    match config.env_filter.clone().or(rust_log) {
        Some(filter) if !filter.trim().is_empty() => FilterSource::Explicit(filter),
        _ => FilterSource::Level(config.default_level),
    }
}

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(&config, std::env::var("RUST_LOG").ok()) {
            FilterSource::Explicit(filter) => {
                builder.parse_filters(&filter);
            }
            FilterSource::Level(level) => {
                builder.filter_level(level);
                for module in QUIET_MODULES {
                    builder.filter_module(module, level.min(LevelFilter::Warn));
                }
            }
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_filter_beats_rust_log() {
        let config = LoggingConfig {
            env_filter: Some("pointfield_sim=debug".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_filter(&config, Some("warn".into())),
            FilterSource::Explicit("pointfield_sim=debug".into())
        );
    }

    #[test]
    fn rust_log_beats_default_level() {
        assert_eq!(
            resolve_filter(&LoggingConfig::default(), Some("trace".into())),
            FilterSource::Explicit("trace".into())
        );
    }

    #[test]
    fn blank_filter_falls_back_to_level() {
        assert_eq!(
            resolve_filter(&LoggingConfig::default(), Some("  ".into())),
            FilterSource::Level(LevelFilter::Info)
        );
        assert_eq!(
            resolve_filter(&LoggingConfig::default(), None),
            FilterSource::Level(LevelFilter::Info)
        );
    }
}
