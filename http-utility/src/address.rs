use http::HeaderMap;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::xff::xff_chain;

/// Address of the downstream peer of a connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeerAddress {
    Ip(SocketAddr),
    /// Unix domain socket or named pipe.
    Pipe(PathBuf),
}

impl PeerAddress {
    /// Returns the IP of the peer, or `None` for pipe peers.
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            PeerAddress::Ip(addr) => Some(addr.ip()),
            PeerAddress::Pipe(_) => None,
        }
    }
}

impl From<SocketAddr> for PeerAddress {
    fn from(addr: SocketAddr) -> Self {
        PeerAddress::Ip(addr)
    }
}

// The port is left out: this is the form that ends up in X-Forwarded-For.
impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerAddress::Ip(addr) => write!(f, "{}", addr.ip()),
            PeerAddress::Pipe(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Returns true if `address` is a dotted-quad IPv4 address in 10.0.0.0/8, 172.16.0.0/12,
/// 192.168.0.0/16 or 127.0.0.0/8. Anything that doesn't parse is not internal.
pub fn is_internal_address(address: &str) -> bool {
    let Ok(ip) = address.parse::<Ipv4Addr>() else {
        return false;
    };

    matches!(
        ip.octets(),
        [10, ..] | [172, 16..=31, ..] | [192, 168, ..] | [127, ..]
    )
}

/// A request is internal when its X-Forwarded-For holds exactly one address and that
/// address is internal. A chain of several hops, or several X-Forwarded-For lines, is never
/// internal.
pub fn is_internal_request(headers: &HeaderMap) -> bool {
    xff_chain(headers).is_some_and(|chain| is_internal_address(&chain))
}
