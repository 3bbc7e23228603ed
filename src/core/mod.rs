pub mod config;
pub mod constants;
pub mod geo;
pub mod loader;
#[cfg(feature = "tokio-runtime")]
pub mod map;
pub mod region;
