//! Runtime settings for the shop server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost/clothingdb";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);
/// Product images may arrive inline as data URIs, so the default is generous.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Upper bound on each store round trip made while serving a request.
    pub store_timeout: Duration,
    pub body_limit_bytes: usize,
    /// Directory served for paths no API route matches.
    pub static_dir: Option<PathBuf>,
}
