// Copyright 2013-2024 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `URLSearchParams`-equivalent list of name/value pairs (§4.6), backed
//! by the `application/x-www-form-urlencoded` codec in
//! [`crate::form_urlencoded`].

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::form_urlencoded;
use crate::Url;

/// An ordered, possibly-duplicate-keyed list of name/value pairs.
///
/// A standalone `SearchParams` (built with [`SearchParams::new`] or
/// parsed from a string) has no owner and never writes anywhere; it's
/// the snapshot returned by [`crate::Url::search_params`]. To edit a
/// URL's query string through this API, use
/// [`crate::Url::search_params_mut`], which hands out a
/// [`SearchParamsMut`] guard instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    pub fn new() -> SearchParams {
        SearchParams::default()
    }

    /// §4.7 construction from a sequence of `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> SearchParams
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        SearchParams {
            pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// §4.7 construction from a query string, with an optional leading
    /// `?` stripped first.
    pub fn from_query_string(input: &str) -> SearchParams {
        let stripped = input.strip_prefix('?').unwrap_or(input);
        SearchParams {
            pairs: form_urlencoded::parse_into_pairs(stripped.as_bytes()),
        }
    }

    pub fn size(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn append(&mut self, name: &str, value: &str) {
        self.pairs.push((name.to_owned(), value.to_owned()));
    }

    /// Remove every pair named `name`, or (when `value` is given) only
    /// pairs matching both `name` and `value`.
    pub fn delete(&mut self, name: &str, value: Option<&str>) {
        self.pairs.retain(|(n, v)| {
            let matches_name = n == name;
            let matches_value = match value {
                Some(value) => v == value,
                None => true,
            };
            !(matches_name && matches_value)
        });
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn has(&self, name: &str, value: Option<&str>) -> bool {
        self.pairs.iter().any(|(n, v)| {
            n == name
                && match value {
                    Some(value) => v == value,
                    None => true,
                }
        })
    }

    /// Overwrite the first pair named `name` in place with `value`,
    /// removing every later duplicate of `name`; if `name` isn't
    /// present, append a new pair instead.
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(index) = self.pairs.iter().position(|(n, _)| n == name) {
            self.pairs[index].1 = value.to_owned();
            let mut seen_first = false;
            self.pairs.retain(|(n, _)| {
                if n != name {
                    return true;
                }
                if seen_first {
                    false
                } else {
                    seen_first = true;
                    true
                }
            });
        } else {
            self.append(name, value);
        }
    }

    /// Stable sort by name, comparing UTF-16 code units rather than
    /// `char`s or bytes, per the Standard's sort steps.
    pub fn sort(&mut self) {
        self.pairs
            .sort_by(|a, b| a.0.encode_utf16().cmp(b.0.encode_utf16()));
    }

    pub fn for_each<F: FnMut(&str, &str)>(&self, mut f: F) {
        for (name, value) in &self.pairs {
            f(name, value);
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, v)| v.as_str())
    }
}

impl From<&str> for SearchParams {
    fn from(input: &str) -> Self {
        SearchParams::from_query_string(input)
    }
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let serialized = form_urlencoded::serialize(
            self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str())),
        );
        f.write_str(&serialized)
    }
}

/// A mutable borrow of a URL's query string as a [`SearchParams`] list.
///
/// Deref/DerefMut give direct access to the full `SearchParams` API;
/// on drop, the list is reserialized and written back to the owning
/// URL's query (absent entirely if the list is empty), matching the
/// "update steps" the Standard runs after every mutation of a live
/// `URLSearchParams`.
pub struct SearchParamsMut<'a> {
    url: &'a mut Url,
    params: SearchParams,
}

impl<'a> SearchParamsMut<'a> {
    pub(crate) fn new(url: &'a mut Url) -> Self {
        let params = url.query().map_or_else(SearchParams::new, SearchParams::from_query_string);
        SearchParamsMut { url, params }
    }
}

impl Deref for SearchParamsMut<'_> {
    type Target = SearchParams;

    fn deref(&self) -> &SearchParams {
        &self.params
    }
}

impl DerefMut for SearchParamsMut<'_> {
    fn deref_mut(&mut self) -> &mut SearchParams {
        &mut self.params
    }
}

impl Drop for SearchParamsMut<'_> {
    fn drop(&mut self) {
        let query = if self.params.is_empty() {
            None
        } else {
            Some(self.params.to_string())
        };
        self.url.set_query_from_params(query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_first_match_and_drops_later_duplicates() {
        let mut params = SearchParams::from_query_string("a=1&b=2&a=3");
        params.set("a", "9");
        assert_eq!(params.to_string(), "a=9&b=2");
    }

    #[test]
    fn set_appends_when_absent() {
        let mut params = SearchParams::from_query_string("a=1");
        params.set("b", "2");
        assert_eq!(params.to_string(), "a=1&b=2");
    }

    #[test]
    fn delete_with_value_filters_only_matching_pairs() {
        let mut params = SearchParams::from_query_string("a=1&a=2&a=1");
        params.delete("a", Some("1"));
        assert_eq!(params.get_all("a"), vec!["2"]);
    }

    #[test]
    fn sort_is_stable_and_uses_utf16_code_unit_order() {
        let mut params = SearchParams::from_pairs(vec![("b", "2"), ("a", "1"), ("a", "0")]);
        params.sort();
        assert_eq!(params.to_string(), "a=1&a=0&b=2");
    }

    #[test]
    fn get_all_preserves_insertion_order() {
        let params = SearchParams::from_query_string("x=1&y=2&x=3");
        assert_eq!(params.get_all("x"), vec!["1", "3"]);
    }

    #[test]
    fn has_with_and_without_value() {
        let params = SearchParams::from_query_string("a=1&a=2");
        assert!(params.has("a", None));
        assert!(params.has("a", Some("2")));
        assert!(!params.has("a", Some("3")));
    }

    #[test]
    fn strips_leading_question_mark() {
        let params = SearchParams::from_query_string("?a=1");
        assert_eq!(params.get("a"), Some("1"));
    }

    #[test]
    fn url_search_params_mut_writes_back_on_drop() {
        let mut url = Url::parse("http://example.com/?a=1&b=2&a=3").unwrap();
        url.search_params_mut().set("a", "9");
        assert_eq!(url.query(), Some("a=9&b=2"));
        assert_eq!(url.as_str(), "http://example.com/?a=9&b=2");
    }

    #[test]
    fn url_search_params_mut_clearing_to_empty_removes_query() {
        let mut url = Url::parse("http://example.com/?a=1").unwrap();
        url.search_params_mut().delete("a", None);
        assert_eq!(url.query(), None);
        assert_eq!(url.as_str(), "http://example.com/");
    }
}
