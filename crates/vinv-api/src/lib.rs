// vinv-api: Async Rust client for the Cisco SD-WAN vManage REST API

pub mod auth;
pub mod certificates;
pub mod client;
pub mod devices;
pub mod error;
pub mod models;
pub mod transport;

pub use client::VManageClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
