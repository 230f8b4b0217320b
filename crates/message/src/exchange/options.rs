//! Typed options for configuring an exchange's request.

use serde::Deserialize;

use indexmap::IndexMap;

use crate::protocol::{Body, Cookies, FieldValue, MessageError, ParamValue, Params};

/// Request settings applied by [`Exchange::with_options`](crate::exchange::Exchange::with_options).
///
/// Unknown keys are rejected when loading from JSON.
///
/// ```
/// use micro_message::exchange::ExchangeOptions;
///
/// let options = ExchangeOptions::from_json(r#"{
///     "method": "post",
///     "uri": "example.com/users",
///     "uriParams": {"page": 2},
///     "headers": {"Accept": "application/json"},
///     "body": {"name": "kerem"}
/// }"#).unwrap();
/// assert_eq!(options.method.as_deref(), Some("post"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExchangeOptions {
    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub uri: Option<String>,

    #[serde(default, alias = "uriParams")]
    pub uri_params: Params,

    #[serde(default)]
    pub headers: IndexMap<String, FieldValue>,

    #[serde(default)]
    pub cookies: Cookies,

    #[serde(default)]
    pub body: Option<BodyOption>,
}

impl ExchangeOptions {
    /// Parses options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidOptions`] for malformed JSON, wrongly typed values or
    /// unknown keys.
    pub fn from_json(json: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A body given in options: text is sent as is, an object is form-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BodyOption {
    Text(String),
    Form(Params),
}

impl From<BodyOption> for Body {
    fn from(option: BodyOption) -> Self {
        match option {
            BodyOption::Text(text) => Body::from(text),
            BodyOption::Form(params) => Body::Structured(params),
        }
    }
}

/// Per-call additions merged into the request by [`Exchange::send`](crate::exchange::Exchange::send)
/// and the verb helpers, before the request is prepared.
///
/// ```
/// use micro_message::exchange::CallOptions;
///
/// let call = CallOptions::new().param("page", 2).header("Accept", "application/json").cookie("session", "abc");
/// assert_eq!(call.uri_params.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    pub uri_params: Params,
    pub headers: IndexMap<String, FieldValue>,
    pub cookies: Cookies,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn param<K: Into<String>, V: Into<ParamValue>>(mut self, key: K, value: V) -> Self {
        self.uri_params.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn header<K: Into<String>, V: Into<FieldValue>>(mut self, name: K, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn cookie<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }
}

impl From<Params> for CallOptions {
    fn from(uri_params: Params) -> Self {
        Self { uri_params, ..Self::default() }
    }
}
