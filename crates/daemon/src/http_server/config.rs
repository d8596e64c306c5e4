use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct Config {
    // Listen address
    pub listen_addr: SocketAddr,
    // log level for http tracing
    pub log_level: tracing::Level,
    // CORS origins for the API routes, empty means any
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn new(listen_addr: SocketAddr, allowed_origins: Vec<String>) -> Self {
        tracing::info!(
            "Creating HTTP server Config: listen_addr={}, allowed_origins={:?}",
            listen_addr,
            allowed_origins
        );
        Self {
            listen_addr,
            log_level: tracing::Level::INFO,
            allowed_origins,
        }
    }
}
