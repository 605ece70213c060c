// Content type probe for the code playground
//
// This crate provides the HTTP side of resource classification: a HEAD
// request that reports the declared content type of an external URL.

pub mod errors;
pub mod http_probe;

// Re-export commonly used items
pub use errors::probe_error;
pub use http_probe::HttpContentTypeProbe;
