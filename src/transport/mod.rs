//! HTTP transport to the speech service.

mod http;

pub use http::{BinaryResponse, HttpTransport, TransportError};
