//! Resolution of per-connection HTTP/2 settings.
//!
//! Settings come from two places: the legacy `http_codec_options` string, which can only
//! say "no compression", and the structured `http2_settings` block. They are merged once per
//! config load. If the two disagree about the HPACK table size, the load is rejected instead
//! of picking one side.

use serde::Serialize;

use crate::config::{CodecOptions, Http2SettingsOverrides};
use crate::errors::ConfigConflict;
use crate::metrics_defs::{HTTP2_SETTINGS_CONFLICT, HTTP2_SETTINGS_RESOLVED};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Http2Settings {
    pub hpack_table_size: u32,
    pub max_concurrent_streams: u32,
    pub initial_stream_window_size: u32,
    pub initial_connection_window_size: u32,
}

impl Http2Settings {
    pub const DEFAULT_HPACK_TABLE_SIZE: u32 = 1 << 12;
    pub const DEFAULT_MAX_CONCURRENT_STREAMS: u32 = (1 << 31) - 1;
    pub const DEFAULT_INITIAL_STREAM_WINDOW_SIZE: u32 = 256 * 1024 * 1024;
    pub const DEFAULT_INITIAL_CONNECTION_WINDOW_SIZE: u32 = 256 * 1024 * 1024;
}

impl Default for Http2Settings {
    fn default() -> Self {
        Http2Settings {
            hpack_table_size: Self::DEFAULT_HPACK_TABLE_SIZE,
            max_concurrent_streams: Self::DEFAULT_MAX_CONCURRENT_STREAMS,
            initial_stream_window_size: Self::DEFAULT_INITIAL_STREAM_WINDOW_SIZE,
            initial_connection_window_size: Self::DEFAULT_INITIAL_CONNECTION_WINDOW_SIZE,
        }
    }
}

/// Merges the legacy codec option with the structured overrides.
///
/// `no_compression` forces the HPACK table size to 0. Combining it with an explicit
/// non-zero `hpack_table_size` is a [`ConfigConflict`]; nothing is produced in that case.
pub fn resolve_http2_settings(
    codec_options: CodecOptions,
    overrides: &Http2SettingsOverrides,
) -> Result<Http2Settings, ConfigConflict> {
    let no_compression = codec_options == CodecOptions::NoCompression;

    if no_compression && overrides.hpack_table_size.is_some_and(|size| size != 0) {
        HTTP2_SETTINGS_CONFLICT.increment();
        let err = ConfigConflict {
            setting_name: "http2_settings.hpack_table_size",
            conflicting_source: "http_codec_options.no_compression",
        };
        tracing::warn!(error = %err, "Rejecting HTTP/2 settings");
        return Err(err);
    }

    let defaults = Http2Settings::default();
    let hpack_default = if no_compression {
        0
    } else {
        defaults.hpack_table_size
    };

    let settings = Http2Settings {
        hpack_table_size: overrides.hpack_table_size.unwrap_or(hpack_default),
        max_concurrent_streams: overrides
            .max_concurrent_streams
            .unwrap_or(defaults.max_concurrent_streams),
        initial_stream_window_size: overrides
            .initial_stream_window_size
            .unwrap_or(defaults.initial_stream_window_size),
        initial_connection_window_size: overrides
            .initial_connection_window_size
            .unwrap_or(defaults.initial_connection_window_size),
    };

    HTTP2_SETTINGS_RESOLVED.increment();
    tracing::debug!(
        codec_options = codec_options.as_str(),
        settings = ?settings,
        "Resolved HTTP/2 settings"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings =
            resolve_http2_settings(CodecOptions::Unspecified, &Default::default()).unwrap();
        assert_eq!(settings.hpack_table_size, 4096);
        assert_eq!(settings.max_concurrent_streams, 2147483647);
        assert_eq!(settings.initial_stream_window_size, 268435456);
        assert_eq!(settings.initial_connection_window_size, 268435456);
    }

    #[test]
    fn test_explicit_overrides() {
        let overrides = Http2SettingsOverrides {
            hpack_table_size: Some(1),
            max_concurrent_streams: Some(2),
            initial_stream_window_size: Some(3),
            initial_connection_window_size: Some(4),
        };
        let settings = resolve_http2_settings(CodecOptions::Unspecified, &overrides).unwrap();
        assert_eq!(
            settings,
            Http2Settings {
                hpack_table_size: 1,
                max_concurrent_streams: 2,
                initial_stream_window_size: 3,
                initial_connection_window_size: 4,
            }
        );
    }

    #[test]
    fn test_no_compression() {
        let settings =
            resolve_http2_settings(CodecOptions::NoCompression, &Default::default()).unwrap();
        assert_eq!(
            settings,
            Http2Settings {
                hpack_table_size: 0,
                ..Http2Settings::default()
            }
        );

        // agreeing explicit value is fine
        let overrides = Http2SettingsOverrides {
            hpack_table_size: Some(0),
            max_concurrent_streams: Some(10),
            ..Default::default()
        };
        let settings = resolve_http2_settings(CodecOptions::NoCompression, &overrides).unwrap();
        assert_eq!(settings.hpack_table_size, 0);
        assert_eq!(settings.max_concurrent_streams, 10);
    }

    #[test]
    fn test_no_compression_conflict() {
        for size in [1, Http2Settings::DEFAULT_HPACK_TABLE_SIZE, u32::MAX] {
            let overrides = Http2SettingsOverrides {
                hpack_table_size: Some(size),
                ..Default::default()
            };
            let err = resolve_http2_settings(CodecOptions::NoCompression, &overrides).unwrap_err();
            assert_eq!(err.setting_name, "http2_settings.hpack_table_size");
            assert_eq!(err.conflicting_source, "http_codec_options.no_compression");
        }
    }
}
