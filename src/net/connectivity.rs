//! Internet reachability probing.
//!
//! The installer distinguishes three network states before it tries the
//! download: full connectivity, DNS-only (resolver answers but nothing
//! else does, common behind captive portals and strict proxies), and no
//! network at all. Probing is cheap and bounded; it returns a value,
//! never an error, and the pipeline decides how to react.

use serde::Serialize;
use std::time::Duration;

use crate::error::Result;
use crate::shell::run_check;

/// HTTPS endpoints tried in order. The last one is a bare IP so a broken
/// resolver alone cannot make HTTP look down.
pub const HTTP_PROBES: &[(&str, &str)] = &[
    ("github.com", "https://github.com"),
    ("google.com", "https://www.google.com"),
    ("1.1.1.1", "https://1.1.1.1"),
];

/// Host pinged when every HTTPS probe fails.
pub const PING_HOST: &str = "8.8.8.8";

/// Host resolved for the DNS-only check.
pub const DNS_HOST: &str = "github.com";

/// Network state as observed by the probe chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Connectivity {
    /// At least one HTTPS or ICMP probe got through.
    Verified { probe: String },
    /// Only DNS resolution works. Downloads will almost certainly fail.
    DnsOnly,
    /// Nothing answered.
    Unreachable,
}

impl Connectivity {
    /// One-line description for log lines and the UI.
    pub fn describe(&self) -> String {
        match self {
            Connectivity::Verified { probe } => format!("internet reachable via {}", probe),
            Connectivity::DnsOnly => "DNS resolves but HTTP and ping both fail".to_string(),
            Connectivity::Unreachable => "no network path detected".to_string(),
        }
    }
}

/// Probe effects, injectable for tests.
pub trait NetProbes {
    /// True when an HTTP(S) request to `url` gets any response at all.
    fn http_ok(&self, url: &str) -> bool;

    /// True when a single ICMP ping to `host` succeeds.
    fn ping_ok(&self, host: &str) -> bool;

    /// True when `host` resolves to at least one address.
    fn resolves(&self, host: &str) -> bool;
}

/// Real probes against the host network.
pub struct SystemProbes {
    client: reqwest::blocking::Client,
}

impl SystemProbes {
    /// Build probes with the given connect/total timeouts.
    pub fn new(connect_timeout: Duration, total_timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(total_timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl NetProbes for SystemProbes {
    fn http_ok(&self, url: &str) -> bool {
        // Any response proves the network path; the status code is irrelevant
        self.client.get(url).send().is_ok()
    }

    fn ping_ok(&self, host: &str) -> bool {
        run_check("ping", &["-c", "1", "-W", "5", host])
    }

    fn resolves(&self, host: &str) -> bool {
        use std::net::ToSocketAddrs;
        (host, 443u16)
            .to_socket_addrs()
            .map(|mut addrs| addrs.next().is_some())
            .unwrap_or(false)
    }
}

/// Run the probe chain: HTTPS endpoints in order, then ping, then DNS.
pub fn check_internet(probes: &dyn NetProbes) -> Connectivity {
    for (label, url) in HTTP_PROBES {
        if probes.http_ok(url) {
            return Connectivity::Verified {
                probe: (*label).to_string(),
            };
        }
        tracing::debug!("HTTP probe {} did not answer", label);
    }

    if probes.ping_ok(PING_HOST) {
        return Connectivity::Verified {
            probe: format!("ping {}", PING_HOST),
        };
    }
    tracing::debug!("ping {} did not answer", PING_HOST);

    if probes.resolves(DNS_HOST) {
        return Connectivity::DnsOnly;
    }

    Connectivity::Unreachable
}
