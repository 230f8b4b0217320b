//! Insertion-ordered mappings for cookies, URI parameters and form bodies.
//!
//! Both are [`IndexMap`]s: keys keep the position of their first insertion and re-inserting a
//! key replaces its value in place. [`Params`] values may nest, and are flattened with the
//! conventional bracket notation (`tags[]=a`, `user[name]=b`) when encoded with
//! `serde_urlencoded`.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::protocol::MessageError;

/// Cookie name to cookie value.
pub type Cookies = IndexMap<String, String>;

/// URI query parameters or a structured form body.
pub type Params = IndexMap<String, ParamValue>;

/// A parameter value: a scalar, a sequence, or a nested mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum ParamValue {
    Scalar(String),
    List(Vec<ParamValue>),
    Map(Params),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ParamValue::Scalar(String::new()),
            Value::Bool(flag) => ParamValue::from(flag),
            Value::Number(number) => ParamValue::Scalar(number.to_string()),
            Value::String(string) => ParamValue::Scalar(string),
            Value::Array(items) => ParamValue::List(items.into_iter().map(ParamValue::from).collect()),
            Value::Object(object) => {
                ParamValue::Map(object.into_iter().map(|(k, v)| (k, ParamValue::from(v))).collect())
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<bool> for ParamValue {
    fn from(flag: bool) -> Self {
        ParamValue::Scalar(if flag { "1" } else { "0" }.to_owned())
    }
}

macro_rules! param_value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(number: $ty) -> Self {
                    ParamValue::Scalar(number.to_string())
                }
            }
        )*
    };
}

param_value_from_number!(i32, i64, u16, u32, u64, usize, f64);

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(items: Vec<T>) -> Self {
        ParamValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Params> for ParamValue {
    fn from(map: Params) -> Self {
        ParamValue::Map(map)
    }
}

/// Flattens nested values into `(key, value)` pairs using bracket notation.
pub fn flatten_params(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        flatten(key.clone(), value, &mut pairs);
    }
    pairs
}

/// Encodes as `application/x-www-form-urlencoded`, which is also the query string form.
pub fn encode_params(params: &Params) -> Result<String, MessageError> {
    Ok(serde_urlencoded::to_string(flatten_params(params))?)
}

fn flatten(prefix: String, value: &ParamValue, pairs: &mut Vec<(String, String)>) {
    match value {
        ParamValue::Scalar(scalar) => pairs.push((prefix, scalar.clone())),
        ParamValue::List(items) => {
            for item in items {
                flatten(format!("{prefix}[]"), item, pairs);
            }
        }
        ParamValue::Map(map) => {
            for (key, item) in map {
                flatten(format!("{prefix}[{key}]"), item, pairs);
            }
        }
    }
}
