//! HTTP transport

pub mod client;
pub mod proxy;

pub use client::{HttpClient, HttpClientBuilder};
pub use proxy::to_reqwest_proxy;
