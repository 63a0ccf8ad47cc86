use clap::{Args, Parser};
use http::{HeaderMap, HeaderValue};
use http_utility::{
    PeerAddress, X_FORWARDED_FOR, append_xff, is_internal_request,
    is_websocket_upgrade_request, last_address_from_xff, parse_cookie_value, parse_query_string,
};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod logging;

use config::{Config, ConfigError, LoggingConfig};

#[derive(Parser)]
#[command(name = "utilityctl", about = "Inspect proxy header handling and HTTP/2 settings")]
enum CliCommand {
    /// Resolve the HTTP/2 settings of every listener and upstream in a config file
    Http2(Http2Args),
    /// Split the query component of a request target
    Query { path: String },
    /// Look up a cookie value across one or more cookie headers
    Cookie {
        key: String,
        #[arg(long = "header")]
        headers: Vec<String>,
    },
    /// Append a peer to X-Forwarded-For and report the resulting chain
    Xff {
        #[arg(long)]
        header: Option<String>,
        /// IP address (optionally with port) or a pipe path
        #[arg(long)]
        peer: String,
    },
    /// Check whether a request is a WebSocket upgrade
    Websocket {
        #[arg(long)]
        connection: Option<String>,
        #[arg(long)]
        upgrade: Option<String>,
    },
}

#[derive(Args)]
struct Http2Args {
    #[arg(long)]
    config: PathBuf,
    /// Print the resolved settings as JSON
    #[arg(long)]
    json: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
    #[error("could not serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = CliCommand::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CliCommand) -> Result<(), CliError> {
    match cli {
        CliCommand::Http2(args) => {
            let config = Config::from_file(&args.config)?;
            let _guard = logging::init(&config.logging);
            http_utility::metrics_defs::describe_all();
            tracing::info!(path = %args.config.display(), "Loaded config");
            print_http2(&config, args.json)?;
        }
        CliCommand::Query { path } => {
            let _guard = logging::init(&LoggingConfig::default());
            for (key, value) in parse_query_string(&path) {
                println!("{key}={value}");
            }
        }
        CliCommand::Cookie { key, headers } => {
            let _guard = logging::init(&LoggingConfig::default());
            let mut map = HeaderMap::new();
            for value in headers {
                map.append(http::header::COOKIE, HeaderValue::try_from(value)?);
            }
            println!("{}", parse_cookie_value(&map, &key));
        }
        CliCommand::Xff { header, peer } => {
            let _guard = logging::init(&LoggingConfig::default());
            let mut map = HeaderMap::new();
            if let Some(value) = header {
                map.insert(X_FORWARDED_FOR, HeaderValue::try_from(value)?);
            }
            println!("internal: {}", is_internal_request(&map));

            append_xff(&mut map, &parse_peer(&peer));
            let chain = map
                .get(X_FORWARDED_FOR)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            println!("x-forwarded-for: {chain}");
            println!("last address: {}", last_address_from_xff(&map));
        }
        CliCommand::Websocket {
            connection,
            upgrade,
        } => {
            let _guard = logging::init(&LoggingConfig::default());
            let mut map = HeaderMap::new();
            if let Some(value) = connection {
                map.insert(http::header::CONNECTION, HeaderValue::try_from(value)?);
            }
            if let Some(value) = upgrade {
                map.insert(http::header::UPGRADE, HeaderValue::try_from(value)?);
            }
            println!("{}", is_websocket_upgrade_request(&map));
        }
    }

    Ok(())
}

fn print_http2(config: &Config, json: bool) -> Result<(), CliError> {
    let resolved = config.resolve_http2()?;

    if json {
        let upstreams: serde_json::Map<String, serde_json::Value> = resolved
            .upstreams
            .iter()
            .map(|(name, settings)| serde_json::to_value(settings).map(|v| (name.clone(), v)))
            .collect::<Result<_, _>>()?;
        let doc = serde_json::json!({
            "listener": resolved.listener,
            "upstreams": upstreams,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("listener: {:?}", resolved.listener);
    for (name, settings) in &resolved.upstreams {
        println!("upstream {name}: {settings:?}");
    }
    Ok(())
}

/// Anything that isn't an IP address is taken to be a pipe path.
fn parse_peer(peer: &str) -> PeerAddress {
    if let Ok(addr) = peer.parse::<SocketAddr>() {
        return PeerAddress::Ip(addr);
    }
    match peer.parse::<IpAddr>() {
        Ok(ip) => PeerAddress::Ip(SocketAddr::new(ip, 0)),
        Err(_) => PeerAddress::Pipe(PathBuf::from(peer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_peer() {
        assert_eq!(
            parse_peer("127.0.0.1"),
            PeerAddress::Ip("127.0.0.1:0".parse().unwrap())
        );
        assert_eq!(
            parse_peer("10.0.0.1:8080"),
            PeerAddress::Ip("10.0.0.1:8080".parse().unwrap())
        );
        assert_eq!(parse_peer("::1").ip(), Some("::1".parse().unwrap()));
        assert_eq!(
            parse_peer("/var/run/proxy.sock"),
            PeerAddress::Pipe("/var/run/proxy.sock".into())
        );
    }

    #[test]
    fn test_cli_parses() {
        let cli = CliCommand::try_parse_from([
            "utilityctl",
            "cookie",
            "token",
            "--header",
            "a=b",
            "--header",
            "token=abc",
        ])
        .unwrap();
        let CliCommand::Cookie { key, headers } = cli else {
            panic!("expected cookie command");
        };
        assert_eq!(key, "token");
        assert_eq!(headers, vec!["a=b", "token=abc"]);

        let args = ["utilityctl", "http2", "--config", "x.yaml", "--json"];
        let cli = CliCommand::try_parse_from(args).unwrap();
        assert!(matches!(cli, CliCommand::Http2(Http2Args { json: true, .. })));
    }
}
