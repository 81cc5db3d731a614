//! Typed access to the CollegeFootballData API: serde models per endpoint,
//! URL builders and the HTTP client.

pub mod api;
pub mod models;
pub mod urls;

pub use api::CfbdClient;
