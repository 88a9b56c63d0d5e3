// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Transport-neutral request shape.

pub mod schema;

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use url::{form_urlencoded, Url};

use crate::error::ApiError;
use crate::routes::Route;

pub use schema::{FieldSchema, FieldSpec, RequestSchema};

/// Ordered query parameters. A key may repeat, one entry per list item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a form-encoded query string, with or without the leading `?`.
    pub fn parse(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        Self(form_urlencoded::parse(input.as_bytes()).into_owned().collect())
    }

    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.0.push((key.to_owned(), value.into()));
    }

    /// Appends one entry per item. An empty list is written as a single
    /// empty value (`key=`) so that it stays distinct from an absent key.
    pub fn push_list<I>(&mut self, key: &str, values: I)
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            self.push(key, "");
            return;
        }
        for value in values {
            self.push(key, value.to_string());
        }
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).next()
    }

    pub fn get_all<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every item of a list parameter.
    ///
    /// Both repeated keys (`id=1&id=2`) and comma-separated values
    /// (`id=1,2`) are accepted. Returns `None` when the key is absent and an
    /// empty list when its only value is empty (`id=`).
    pub fn get_list(&self, key: &str) -> Option<Vec<&str>> {
        let mut values = self.get_all(key).peekable();
        values.peek()?;
        let items: Vec<&str> = values.flat_map(|v| v.split(',')).collect();
        if items == [""] {
            return Some(Vec::new());
        }
        Some(items)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish();
        f.write_str(&encoded)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A request as it crosses the transport boundary: path parameters,
/// query parameters and an optional JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireRequest {
    pub params: BTreeMap<String, String>,
    pub query: Query,
    pub body: Option<Value>,
}

impl WireRequest {
    /// Value of a path parameter.
    pub fn param(&self, name: &str) -> Result<&str, ApiError> {
        self.params
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ApiError::schema(name, "missing path parameter"))
    }

    pub fn with_param(
        mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Self {
        self.params.insert(name.to_owned(), value.into());
        self
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the full URL of this request against `base`.
    ///
    /// Any path already present on `base` is kept as a prefix.
    pub fn to_url(&self, route: &Route, base: &Url) -> Result<Url, ApiError> {
        let path = route.resolve(&self.params)?;
        let mut url = base.clone();
        url.set_path(&format!("{}{path}", base.path().trim_end_matches('/')));
        if self.query.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.query.to_string()));
        }
        Ok(url)
    }
}
