// Copyright 2013-2024 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The host parser (§4.4): dispatches between a bracketed IPv6
//! literal, an opaque host, an IPv4 address, and a domain.

use std::fmt;

use crate::ip::{self, Ipv6ParseError};
use crate::percent_encode::{self, CONTROLS};

/// A parsed URL host.
///
/// `Domain` holds lowercase ASCII text (IDNA/Punycode is out of scope;
/// see the crate-level docs). `Opaque` is used for non-special
/// schemes, where the host is percent-encoded but otherwise
/// unstructured.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Host {
    Domain(String),
    Ipv4(u32),
    Ipv6([u16; 8]),
    Opaque(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostParseError {
    EmptyHost,
    InvalidIpv6Address,
    ForbiddenHostCodePoint,
    InvalidDomainCharacter,
    Ipv4(ip::Ipv4ParseError),
}

impl From<Ipv6ParseError> for HostParseError {
    fn from(_: Ipv6ParseError) -> Self {
        HostParseError::InvalidIpv6Address
    }
}

impl fmt::Display for HostParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostParseError::EmptyHost => f.write_str("empty host"),
            HostParseError::InvalidIpv6Address => f.write_str("invalid IPv6 address"),
            HostParseError::ForbiddenHostCodePoint => f.write_str("forbidden host code point"),
            HostParseError::InvalidDomainCharacter => f.write_str("invalid domain character"),
            HostParseError::Ipv4(e) => write!(f, "{e}"),
        }
    }
}
impl std::error::Error for HostParseError {}

/// §4.4 "forbidden host code point".
pub fn is_forbidden_host_code_point(c: char) -> bool {
    matches!(
        c,
        '\u{0}' | '\t' | '\n' | '\r' | ' ' | '#' | '/' | ':' | '<' | '>' | '?' | '@' | '[' | '\\'
            | ']' | '^' | '|'
    )
}

/// §4.1 ASCII domain normalization: NFC (a no-op for ASCII input, which
/// is all this crate supports), full-width/ideographic dots folded to
/// `.`, lowercased, then rejected if it contains a control byte or `%`.
///
/// IDNA/Punycode is intentionally not implemented; see the crate docs.
pub fn domain_to_ascii(domain: &str) -> Result<String, HostParseError> {
    let folded: String = domain
        .chars()
        .map(|c| match c {
            '\u{3002}' | '\u{FF0E}' | '\u{FF61}' => '.',
            c => c,
        })
        .collect();
    let lowered = folded.to_ascii_lowercase();
    if lowered.contains(|c: char| c == '%' || (c as u32) <= 0x20) {
        return Err(HostParseError::InvalidDomainCharacter);
    }
    Ok(lowered)
}

/// §4.4 host parser. `is_opaque` is true for non-special schemes.
pub fn parse_host(input: &str, is_opaque: bool) -> Result<Host, HostParseError> {
    if let Some(interior) = input.strip_prefix('[') {
        return if let Some(interior) = interior.strip_suffix(']') {
            Ok(Host::Ipv6(ip::parse_ipv6(interior)?))
        } else {
            Err(HostParseError::InvalidIpv6Address)
        };
    }

    if is_opaque {
        return parse_opaque_host(input).map(Host::Opaque);
    }

    if input.is_empty() {
        return Ok(Host::Domain(String::new()));
    }

    let decoded = percent_encode::percent_decode(input.as_bytes());
    let domain = String::from_utf8_lossy(&decoded).into_owned();

    if ip::ends_in_ipv4_number(&domain) {
        return ip::parse_ipv4(&domain)
            .map(Host::Ipv4)
            .map_err(HostParseError::Ipv4);
    }

    if domain.contains(is_forbidden_host_code_point) {
        return Err(HostParseError::InvalidDomainCharacter);
    }

    domain_to_ascii(&domain).map(Host::Domain)
}

fn parse_opaque_host(input: &str) -> Result<String, HostParseError> {
    if input.contains(is_forbidden_host_code_point) {
        return Err(HostParseError::ForbiddenHostCodePoint);
    }
    Ok(percent_encode::utf8_percent_encode(input, &CONTROLS))
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Domain(domain) => f.write_str(domain),
            Host::Opaque(host) => f.write_str(host),
            Host::Ipv4(address) => f.write_str(&ip::serialize_ipv4(*address)),
            Host::Ipv6(pieces) => write!(f, "[{}]", ip::serialize_ipv6(pieces)),
        }
    }
}
