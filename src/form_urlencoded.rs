// Copyright 2013-2024 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parser and serializer for `application/x-www-form-urlencoded`
//! (§4.6), the wire format used by both query strings and
//! [`crate::SearchParams`].

use crate::percent_encode::{self, FORM_URLENCODED};

/// Parse a `application/x-www-form-urlencoded` byte string into
/// `(name, value)` pairs, both percent-decoded and UTF-8-decoded.
///
/// Mirrors the URL Standard's "application/x-www-form-urlencoded
/// parser": split on `&`, drop empty chunks, split each on the first
/// `=`, replace `+` with space in both halves, then percent-decode.
pub fn parse(input: &[u8]) -> Parse<'_> {
    Parse { input }
}

#[derive(Debug, Clone)]
pub struct Parse<'a> {
    input: &'a [u8],
}

impl<'a> Iterator for Parse<'a> {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.input.is_empty() {
                return None;
            }
            let (chunk, rest) = match self.input.iter().position(|&b| b == b'&') {
                Some(i) => (&self.input[..i], &self.input[i + 1..]),
                None => (self.input, &[][..]),
            };
            self.input = rest;
            if chunk.is_empty() {
                continue;
            }
            let (name, value) = match chunk.iter().position(|&b| b == b'=') {
                Some(i) => (&chunk[..i], &chunk[i + 1..]),
                None => (chunk, &[][..]),
            };
            return Some((decode_component(name), decode_component(value)));
        }
    }
}

fn decode_component(input: &[u8]) -> String {
    let replaced: Vec<u8> = input
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_encode::lossy_utf8_percent_decode(&replaced)
}

/// Parse into an owned `Vec<(String, String)>`, the shape
/// [`crate::SearchParams`] is built from.
pub fn parse_into_pairs(input: &[u8]) -> Vec<(String, String)> {
    parse(input).collect()
}

/// A builder for `application/x-www-form-urlencoded` strings, appending
/// `name=value` pairs separated by `&` into an existing `String`.
#[derive(Debug)]
pub struct Serializer<'a> {
    target: &'a mut String,
    start_len: usize,
}

impl<'a> Serializer<'a> {
    pub fn new(target: &'a mut String) -> Self {
        let start_len = target.len();
        Serializer { target, start_len }
    }

    fn append_separator_if_needed(&mut self) {
        if self.target.len() > self.start_len {
            self.target.push('&');
        }
    }

    pub fn append_pair(&mut self, name: &str, value: &str) -> &mut Self {
        self.append_separator_if_needed();
        encode_component(name, self.target);
        self.target.push('=');
        encode_component(value, self.target);
        self
    }

    pub fn extend_pairs<I, K, V>(&mut self, iter: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<(K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for pair in iter {
            let (name, value) = pair.borrow();
            self.append_pair(name.as_ref(), value.as_ref());
        }
        self
    }

    pub fn finish(&mut self) -> &str {
        self.target
    }
}

fn encode_component(input: &str, output: &mut String) {
    percent_encode::percent_encode_to(input.as_bytes(), &FORM_URLENCODED, true, output);
}

/// Serialize `pairs` as `application/x-www-form-urlencoded`, returning
/// a fresh `String`.
pub fn serialize<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut output = String::new();
    let mut serializer = Serializer::new(&mut output);
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    drop(serializer);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_pairs() {
        let pairs: Vec<_> = parse(b"a=1&b=2&a=3").collect();
        assert_eq!(
            pairs,
            vec![
                ("a".to_owned(), "1".to_owned()),
                ("b".to_owned(), "2".to_owned()),
                ("a".to_owned(), "3".to_owned()),
            ]
        );
    }

    #[test]
    fn parse_plus_as_space_and_missing_equals() {
        let pairs: Vec<_> = parse(b"a+b=c+d&novalue&&c=1").collect();
        assert_eq!(
            pairs,
            vec![
                ("a b".to_owned(), "c d".to_owned()),
                ("novalue".to_owned(), "".to_owned()),
                ("c".to_owned(), "1".to_owned()),
            ]
        );
    }

    #[test]
    fn serialize_roundtrip() {
        let serialized = serialize(vec![("a", "1"), ("b", "2 3")]);
        assert_eq!(serialized, "a=1&b=2+3");
        let parsed: Vec<_> = parse(serialized.as_bytes()).collect();
        assert_eq!(
            parsed,
            vec![("a".to_owned(), "1".to_owned()), ("b".to_owned(), "2 3".to_owned())]
        );
    }

    #[test]
    fn serializer_escapes_form_set() {
        let mut output = String::new();
        Serializer::new(&mut output).append_pair("k!", "v~(x)");
        assert_eq!(output, "k%21=v%7E%28x%29");
    }
}
