//! Data models for HTTP requests and responses.
//!
//! This module contains the core data structures shared by the composer, the
//! executor and the history store.

pub mod form;
pub mod headers;
pub mod request;
pub mod response;

pub use form::RequestForm;
pub use headers::{HeaderField, HeaderList, HeaderPair};
pub use request::{HttpMethod, RequestBody, RequestSpec};
pub use response::{ResponseData, ResponseResult};
