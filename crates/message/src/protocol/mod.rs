//! HTTP message model.
//!
//! This module holds the structured form of a message. The conversion to and from wire text
//! lives in [`codec`](crate::codec).
//!
//! # Components
//!
//! - **Shared base** ([`message`]): [`MessageParts`] and the [`HttpMessage`] trait give both
//!   kinds of message their body, header and cookie accessors
//!   - [`MessageKind`]: request or response, fixed at construction
//!   - [`Body`]: raw bytes or a structured form, encoded once when set
//!
//! - **Request** ([`request`]): [`Request`] adds method, URI and URI parameters
//!
//! - **Response** ([`response`]): [`Response`] exposes the parsed status line
//!
//! - **Storage** ([`fields`], `params`): [`Fields`] for normalized headers, insertion-ordered
//!   [`Cookies`] and [`Params`]
//!
//! - **Errors** ([`error`]): [`MessageError`]

mod message;
pub use message::Body;
pub use message::HttpMessage;
pub use message::MessageKind;
pub use message::MessageParts;
pub(crate) use message::HEADER_BODY_SEPARATOR;

mod request;
pub use request::Request;

mod response;
pub use response::Response;

pub mod fields;
pub use fields::FieldValue;
pub use fields::Fields;

mod params;
pub use params::encode_params;
pub use params::flatten_params;
pub use params::Cookies;
pub use params::ParamValue;
pub use params::Params;

mod error;
pub use error::MessageError;
