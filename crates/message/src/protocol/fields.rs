//! Header field storage.
//!
//! [`Fields`] maps normalized header keys to [`FieldValue`]s. A value holds either one string
//! or, for repeated headers such as `Set-Cookie`, an ordered sequence of strings.
//!
//! Keys are sorted, so enumeration (and therefore serialization) order does not depend on the
//! order headers arrived in. The synthetic `_`-prefixed keys sort before every header name.

use std::collections::BTreeMap;
use std::slice;

use serde::Deserialize;

use crate::codec::to_snake;

/// Raw request line or status line.
pub const START_LINE_KEY: &str = "_";
/// `"<code> <reason>"` of a parsed status line.
pub const STATUS_KEY: &str = "_status";
/// Status code of a parsed status line.
///
/// Stored as the three decimal digits it was parsed from, like every other field value; read
/// it as an integer through [`Fields::status_code`].
pub const STATUS_CODE_KEY: &str = "_status_code";
/// Title-cased reason phrase of a parsed status line.
pub const STATUS_TEXT_KEY: &str = "_status_text";

/// Returns true if the normalized key names parsed metadata rather than a wire header.
#[inline]
pub fn is_synthetic(key: &str) -> bool {
    key.starts_with('_')
}

/// A header value: a single string or an ordered sequence for repeated headers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// Returns the value if single, or the first value of a sequence.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Single(value) => Some(value),
            FieldValue::Multi(values) => values.first().map(String::as_str),
        }
    }

    /// Iterates all values in order; a single value yields once.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            FieldValue::Single(value) => slice::from_ref(value),
            FieldValue::Multi(values) => values.as_slice(),
        };
        values.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        match self {
            FieldValue::Single(_) => 1,
            FieldValue::Multi(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_multi(&self) -> bool {
        matches!(self, FieldValue::Multi(_))
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            FieldValue::Single(value) => vec![value],
            FieldValue::Multi(values) => values,
        }
    }

    fn trimmed(self) -> Self {
        match self {
            FieldValue::Single(value) => FieldValue::Single(value.trim().to_owned()),
            FieldValue::Multi(values) => FieldValue::Multi(values.iter().map(|v| v.trim().to_owned()).collect()),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            FieldValue::Single(first) => *self = FieldValue::Multi(vec![std::mem::take(first), value]),
            FieldValue::Multi(values) => values.push(value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Single(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Multi(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::Multi(values.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldValue {
    fn from(values: [&str; N]) -> Self {
        FieldValue::Multi(values.into_iter().map(str::to_owned).collect())
    }
}

impl PartialEq<str> for FieldValue {
    fn eq(&self, other: &str) -> bool {
        matches!(self, FieldValue::Single(value) if value == other)
    }
}

impl PartialEq<&str> for FieldValue {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Header mapping keyed by normalized (snake case) names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    inner: BTreeMap<String, FieldValue>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a header; `key` may be given in any case or separator style.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.inner.get(&to_snake(key))
    }

    /// Looks up a header and returns its first value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_str)
    }

    /// The parsed status code as an integer; `None` when no status line was parsed.
    pub fn status_code(&self) -> Option<u16> {
        self.get_str(STATUS_CODE_KEY)?.parse().ok()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(&to_snake(key))
    }

    /// Sets a header, replacing any previous value under the same normalized key.
    ///
    /// Values are trimmed; sequences are trimmed element-wise.
    pub fn insert<V: Into<FieldValue>>(&mut self, key: &str, value: V) -> Option<FieldValue> {
        self.inner.insert(to_snake(key), value.into().trimmed())
    }

    /// Adds a value, turning an existing entry into a sequence that keeps arrival order.
    pub fn append<V: Into<String>>(&mut self, key: &str, value: V) {
        let value = value.into().trim().to_owned();
        match self.inner.get_mut(&to_snake(key)) {
            Some(existing) => existing.push(value),
            None => {
                self.inner.insert(to_snake(key), FieldValue::Single(value));
            }
        }
    }

    pub(crate) fn insert_synthetic(&mut self, key: &'static str, value: String) {
        debug_assert!(is_synthetic(key));
        self.inner.insert(key.to_owned(), FieldValue::Single(value));
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.inner.remove(&to_snake(key))
    }

    /// Copies every entry of `other` into `self`, overwriting per key.
    pub fn merge(&mut self, other: Fields) {
        self.inner.extend(other.inner);
    }

    /// Iterates `(normalized key, value)` in key order, synthetic keys included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.inner.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates the entries that have a wire representation.
    pub fn wire(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.iter().filter(|(key, _)| !is_synthetic(key))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
