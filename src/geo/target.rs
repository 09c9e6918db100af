use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

use super::location::LOOPBACK_IP;

const LOCALHOST: &str = "localhost";

/// Anything a lookup can be asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// Hostname or IP address text, passed on untouched.
    Host(String),
    Octets([u8; 4]),
    Request(Box<RequestContext>),
}

/// The part of an incoming request that identifies the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub remote_ip: Identifier,
}

impl RequestContext {
    pub fn new(remote_ip: impl Into<Identifier>) -> Self {
        Self {
            remote_ip: remote_ip.into(),
        }
    }
}

impl From<SocketAddr> for RequestContext {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.ip())
    }
}

impl From<&str> for Identifier {
    fn from(host: &str) -> Self {
        Self::Host(host.to_string())
    }
}

impl From<String> for Identifier {
    fn from(host: String) -> Self {
        Self::Host(host)
    }
}

impl From<[u8; 4]> for Identifier {
    fn from(octets: [u8; 4]) -> Self {
        Self::Octets(octets)
    }
}

impl From<(u8, u8, u8, u8)> for Identifier {
    fn from((a, b, c, d): (u8, u8, u8, u8)) -> Self {
        Self::Octets([a, b, c, d])
    }
}

impl From<Ipv4Addr> for Identifier {
    fn from(addr: Ipv4Addr) -> Self {
        Self::Octets(addr.octets())
    }
}

impl From<IpAddr> for Identifier {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(addr) => addr.into(),
            IpAddr::V6(addr) => Self::Host(addr.to_string()),
        }
    }
}

impl From<RequestContext> for Identifier {
    fn from(context: RequestContext) -> Self {
        Self::Request(Box::new(context))
    }
}

/// Canonical subject of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Loopback,
    Remote(String),
}

impl Target {
    pub fn as_str(&self) -> &str {
        match self {
            Target::Loopback => LOOPBACK_IP,
            Target::Remote(target) => target,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Identifier> for Target {
    fn from(identifier: Identifier) -> Self {
        normalize(identifier)
    }
}

pub fn normalize(identifier: Identifier) -> Target {
    let host = match identifier {
        Identifier::Host(host) => host,
        Identifier::Octets(octets) => Ipv4Addr::from(octets).to_string(),
        Identifier::Request(context) => return normalize(context.remote_ip),
    };

    if host == LOOPBACK_IP || host == LOCALHOST {
        Target::Loopback
    } else {
        Target::Remote(host)
    }
}
