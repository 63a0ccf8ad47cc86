use http_utility::{ConfigConflict, Http2ProtocolOptions, Http2Settings};
use serde::Deserialize;
use std::fs::File;

#[derive(Deserialize, Debug)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub sentry_dsn: Option<String>,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            sentry_dsn: None,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct UpstreamConfig {
    pub name: String,
    #[serde(flatten)]
    pub protocol: Http2ProtocolOptions,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub listener: Http2ProtocolOptions,
    #[serde(default)]
    pub upstreams: Vec<UpstreamConfig>,
}

/// HTTP/2 settings for the listener and every upstream, in config order.
#[derive(Debug)]
pub struct ResolvedSettings {
    pub listener: Http2Settings,
    pub upstreams: Vec<(String, Http2Settings)>,
}

impl Config {
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let data = serde_yaml::from_reader(file)?;

        Ok(data)
    }

    /// Resolves every HTTP/2 block. The first conflicting block fails the whole load.
    pub fn resolve_http2(&self) -> Result<ResolvedSettings, ConfigError> {
        let listener = self
            .listener
            .resolve()
            .map_err(|source| ConfigError::Conflict {
                block: "listener".into(),
                source,
            })?;

        let upstreams = self
            .upstreams
            .iter()
            .map(|upstream| {
                upstream
                    .protocol
                    .resolve()
                    .map(|settings| (upstream.name.clone(), settings))
                    .map_err(|source| ConfigError::Conflict {
                        block: format!("upstreams.{}", upstream.name),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResolvedSettings {
            listener,
            upstreams,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("invalid http2 configuration in {block}: {source}")]
    Conflict {
        block: String,
        source: ConfigConflict,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_utility::CodecOptions;
    use std::io::Write;

    fn write_tmp_file(s: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        write!(tmp, "{}", s).expect("write yaml");

        tmp
    }

    #[test]
    fn empty_config() {
        let tmp = write_tmp_file("{}");
        let config = Config::from_file(tmp.path()).expect("load config");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.sentry_dsn.is_none());
        assert_eq!(config.listener.http_codec_options, CodecOptions::Unspecified);

        let resolved = config.resolve_http2().expect("resolve");
        assert_eq!(resolved.listener, Http2Settings::default());
        assert!(resolved.upstreams.is_empty());
    }

    #[test]
    fn listener_and_upstreams() {
        let yaml = r#"
            logging:
                level: debug
            listener:
                http_codec_options: no_compression
            upstreams:
                - name: api
                  http2_settings:
                      hpack_table_size: 1
                      max_concurrent_streams: 2
                      initial_stream_window_size: 3
                      initial_connection_window_size: 4
                - name: static
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");
        assert_eq!(config.logging.level, "debug");

        let resolved = config.resolve_http2().expect("resolve");
        assert_eq!(resolved.listener.hpack_table_size, 0);
        assert_eq!(
            resolved.listener.max_concurrent_streams,
            Http2Settings::DEFAULT_MAX_CONCURRENT_STREAMS
        );
        assert_eq!(resolved.upstreams.len(), 2);
        assert_eq!(resolved.upstreams[0].0, "api");
        assert_eq!(
            resolved.upstreams[0].1,
            Http2Settings {
                hpack_table_size: 1,
                max_concurrent_streams: 2,
                initial_stream_window_size: 3,
                initial_connection_window_size: 4,
            }
        );
        assert_eq!(resolved.upstreams[1].1, Http2Settings::default());
    }

    #[test]
    fn conflicting_upstream() {
        let yaml = r#"
            upstreams:
                - name: api
                  http_codec_options: no_compression
                  http2_settings:
                      hpack_table_size: 1
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");
        let err = config.resolve_http2().unwrap_err();
        assert!(matches!(err, ConfigError::Conflict { ref block, .. } if block == "upstreams.api"));
        assert_eq!(
            err.to_string(),
            "invalid http2 configuration in upstreams.api: \
             'http_codec_options.no_compression' conflicts with 'http2_settings.hpack_table_size'"
        );
    }

    #[test]
    fn load_errors() {
        let missing = Config::from_file(std::path::Path::new("/nonexistent/utilityctl.yaml"));
        assert!(matches!(missing, Err(ConfigError::LoadError(_))));

        let tmp = write_tmp_file("listener:\n    http_codec_options: gzip\n");
        assert!(matches!(
            Config::from_file(tmp.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
