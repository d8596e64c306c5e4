// Storage and domain layers
pub mod database;
pub mod repository;
pub mod service;

// Service modules (daemon functionality)
pub mod auth;
pub mod config;
pub mod http_server;
pub mod process;
pub mod service_state;
pub mod version;

// App state (configuration, paths)
pub mod state;

pub use config::Config as ServiceConfig;
pub use process::{spawn_service, start_service, ShutdownHandle};
pub use service_state::State as ServiceState;
pub use state::{AppConfig, AppState, StateError};
