use serde::Deserialize;

use crate::errors::ConfigConflict;
use crate::http2::{Http2Settings, resolve_http2_settings};

/// Legacy, coarse-grained codec option of a listener or upstream.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CodecOptions {
    #[default]
    #[serde(alias = "")]
    Unspecified,
    NoCompression,
}

impl CodecOptions {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CodecOptions::Unspecified => "unspecified",
            CodecOptions::NoCompression => "no_compression",
        }
    }
}

/// Structured HTTP/2 settings. A field left out of the config falls back to its default
/// when resolved.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Http2SettingsOverrides {
    pub hpack_table_size: Option<u32>,
    pub max_concurrent_streams: Option<u32>,
    pub initial_stream_window_size: Option<u32>,
    pub initial_connection_window_size: Option<u32>,
}

/// HTTP/2 protocol options as they appear in a listener or upstream config block.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Http2ProtocolOptions {
    #[serde(default)]
    pub http_codec_options: CodecOptions,
    #[serde(default)]
    pub http2_settings: Http2SettingsOverrides,
}

impl Http2ProtocolOptions {
    pub fn resolve(&self) -> Result<Http2Settings, ConfigConflict> {
        resolve_http2_settings(self.http_codec_options, &self.http2_settings)
    }
}
