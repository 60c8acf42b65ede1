// Copyright 2016-2024 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! URL origin computation (§4.5).

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::host::Host;
use crate::Url;

/// The origin of a URL.
///
/// Two URLs with the same origin are considered to originate from the
/// same entity. `blob:` recurses into the path; `ftp`/`http(s)`/`ws(s)`
/// produce a tuple of scheme, host and port; everything else
/// (including `file:`) is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A globally unique identifier, equal only to itself.
    Opaque(OpaqueOrigin),
    /// `(scheme, host, port)`.
    Tuple(String, Host, Option<u16>),
}

/// Opaque identifier for URLs without a tuple origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpaqueOrigin(usize);

impl Origin {
    pub fn new_opaque() -> Origin {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Origin::Opaque(OpaqueOrigin(COUNTER.fetch_add(1, Ordering::SeqCst)))
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Origin::Tuple(..))
    }

    /// <https://html.spec.whatwg.org/multipage/#ascii-serialisation-of-an-origin>
    pub fn ascii_serialization(&self) -> String {
        match self {
            Origin::Opaque(_) => "null".to_owned(),
            Origin::Tuple(scheme, host, Some(port)) => format!("{scheme}://{host}:{port}"),
            Origin::Tuple(scheme, host, None) => format!("{scheme}://{host}"),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ascii_serialization())
    }
}

/// §4.5 origin computation.
pub fn url_origin(url: &Url) -> Origin {
    match url.scheme() {
        "blob" => match Url::parse(&url.path_str()) {
            Ok(nested) if matches!(nested.scheme(), "http" | "https") => url_origin(&nested),
            _ => Origin::new_opaque(),
        },
        "ftp" | "http" | "https" | "ws" | "wss" => match url.host() {
            Some(host) => {
                Origin::Tuple(url.scheme().to_owned(), host.clone(), url.port())
            }
            None => Origin::new_opaque(),
        },
        // "file" is left as an exercise to the reader by the standard;
        // when in doubt, an opaque origin.
        _ => Origin::new_opaque(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_origins_are_never_equal() {
        assert_ne!(Origin::new_opaque(), Origin::new_opaque());
    }

    #[test]
    fn http_origin_is_a_tuple() {
        let url = Url::parse("http://example.com:8080/x").unwrap();
        let origin = url.origin();
        assert!(origin.is_tuple());
        assert_eq!(origin.ascii_serialization(), "http://example.com:8080");
    }

    #[test]
    fn default_port_elided_from_origin() {
        let url = Url::parse("https://example.com/x").unwrap();
        assert_eq!(url.origin().ascii_serialization(), "https://example.com");
    }

    #[test]
    fn file_origin_is_opaque() {
        let url = Url::parse("file:///etc/hosts").unwrap();
        assert!(!url.origin().is_tuple());
    }
}
