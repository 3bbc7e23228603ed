pub mod client;
#[cfg(feature = "tokio-runtime")]
pub mod dispatcher;
pub mod endpoints;
pub mod fetch;

pub use client::{BackendApi, HttpBackend};
#[cfg(feature = "tokio-runtime")]
pub use dispatcher::FetchDispatcher;
pub use fetch::{FetchKind, FetchOutcome, FetchPayload, FetchRequest, Ticket};
