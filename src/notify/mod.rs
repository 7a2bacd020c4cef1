//! Alert delivery to a LINE Notify style endpoint.

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod transport;

pub use client::Client;
pub use config::Config;
pub use context::{CancelHandle, Context};
pub use error::{AlertError, Result, TransportError};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
