pub mod client;
pub mod config;
pub mod envelope;

pub use client::RemoteClient;
pub use config::{RemoteConfig, DEFAULT_ENDPOINT};
pub use envelope::{RemoteEnvelope, RemoteError, RemoteResponse, RequestIds};
