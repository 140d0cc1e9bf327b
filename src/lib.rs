//! trendscope library
//!
//! Typed access to the Google Trends web endpoints. The [`decode`] module turns
//! raw provider bodies into the domain types in [`types`]; [`client`] wires the
//! decoders to a pluggable [`transport`].

pub mod cli;
pub mod client;
pub mod config;
pub mod decode;
pub mod endpoints;
pub mod error;
pub mod logging;
pub mod transport;
pub mod types;

pub use client::TrendsClient;
pub use error::{Response, TrendsError};
