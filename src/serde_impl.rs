// Copyright 2016-2024 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `serde` support, gated behind the `serde` feature. A `Url`
//! round-trips through its string form rather than its internal
//! fields, so the wire format is stable across representation changes.

use serde::de::{Deserialize, Deserializer, Error};
use serde::ser::{Serialize, Serializer};

use crate::Url;

impl Serialize for Url {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_str())
    }
}

impl<'de> Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Url::parse(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json_as_a_string() {
        let url = Url::parse("https://example.com/a?b=1").unwrap();
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, "\"https://example.com/a?b=1\"");
        let back: Url = serde_json::from_str(&json).unwrap();
        assert_eq!(back, url);
    }

    #[test]
    fn deserialize_rejects_unparsable_string() {
        let result: Result<Url, _> = serde_json::from_str("\"not a url\"");
        assert!(result.is_err());
    }
}
