//! Form submission: payload construction and pluggable transports.

pub mod factory;
pub mod memory;
pub mod payload;
pub mod transport;

pub use factory::{TransportConfig, TransportFactory, TransportRegistry};
pub use memory::{MemoryTransport, MemoryTransportFactory};
pub use payload::Submission;
pub use transport::{FormTransport, TransportError};
