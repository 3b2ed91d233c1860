//! Decides whether a target URL is reachable only from the caller's own network.
//!
//! Only the literal host text is inspected. No DNS lookups happen, so a public
//! name that resolves to a private address is still classified public.

use std::net::{Ipv4Addr, Ipv6Addr};
use url::{Host, Url};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// localhost, loopback or RFC 1918 space: executed directly.
    Private,
    /// Everything else, including unparsable input: executed via the backend.
    Public,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Private => "private",
            Target::Public => "public",
        }
    }
}

pub fn classify(url: &str) -> Target {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return Target::Public;
    };
    match parsed.host() {
        Some(Host::Domain(domain)) if domain.eq_ignore_ascii_case("localhost") => Target::Private,
        Some(Host::Ipv4(ip)) if is_private_v4(ip) => Target::Private,
        Some(Host::Ipv6(ip)) if is_private_v6(ip) => Target::Private,
        _ => Target::Public,
    }
}

pub fn is_private_url(url: &str) -> bool {
    classify(url) == Target::Private
}

fn is_private_v4(ip: Ipv4Addr) -> bool {
    // 127/8 and 10/8, 172.16/12, 192.168/16
    ip.is_loopback() || ip.is_private()
}

fn is_private_v6(ip: Ipv6Addr) -> bool {
    ip.is_loopback()
}
