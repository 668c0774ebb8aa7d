use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub nominatim_url: String,
    pub overpass_url: String,
    pub user_agent: String,
    pub http_timeout_secs: u64,
    /// Server-side budget written into the Overpass QL `[timeout:N]` header.
    pub overpass_timeout_secs: u32,
    /// Upper bound on a whole search (geocode + POI query).
    pub search_timeout_secs: u64,
    /// Optional operator cap on the search radius; `None` accepts any positive radius.
    pub max_radius_miles: Option<f64>,
    pub rate_limit_per_minute: usize,
    /// Optional override for the embedded category table.
    pub categories_path: Option<PathBuf>,
}
