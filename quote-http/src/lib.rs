//! HTTP form transport for the quote wizard.
//!
//! Posts the URL-encoded submission to a static-hosting form endpoint.

mod factory;
mod transport;

pub use factory::HttpTransportFactory;
pub use transport::HttpTransport;
