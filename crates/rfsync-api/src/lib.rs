// rfsync-api: Async Rust client for the Meraki Dashboard API (v1)

pub mod client;
mod devices;
pub mod error;
pub mod models;
mod organizations;
pub mod transport;
mod wireless;

pub use client::DashboardClient;
pub use error::Error;
pub use models::{Device, Network, Organization, RadioSettings, RfProfile};
pub use transport::{TlsMode, TransportConfig};
