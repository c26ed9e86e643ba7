//! Domeneshop registrar API: wire types and the HTTP client.
pub mod client;
pub mod types;

pub use client::DomeneshopClient;
