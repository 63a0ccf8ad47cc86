//! Header helpers used on the proxy request path.
//!
//! Everything in here is a plain function over a `HeaderMap` (or a string pulled out of one).
//! Malformed request input never produces an error: callers get an empty string, `false`
//! or an empty list back. The only error surfaced to callers is a conflicting HTTP/2
//! configuration, which has to block a config load.

pub mod address;
pub mod config;
pub mod cookie;
pub mod errors;
pub mod http2;
pub mod metrics_defs;
pub mod query;
pub mod redirect;
pub mod status;
pub mod websocket;
pub mod xff;

pub use address::{PeerAddress, is_internal_address, is_internal_request};
pub use config::{CodecOptions, Http2ProtocolOptions, Http2SettingsOverrides};
pub use cookie::{CookiePair, cookie_pairs, parse_cookie_value};
pub use errors::{ConfigConflict, HeaderError};
pub use http2::{Http2Settings, resolve_http2_settings};
pub use query::{QueryParams, parse_query_string};
pub use redirect::create_ssl_redirect_path;
pub use status::response_status;
pub use websocket::is_websocket_upgrade_request;
pub use xff::{X_FORWARDED_FOR, append_xff, last_address_from_xff, xff_chain};
