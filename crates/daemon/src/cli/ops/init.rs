use clap::Args;

use bakery_daemon::state::{generate_api_key, AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// API server port
    #[arg(long, default_value_t = 5001)]
    pub api_port: u16,

    /// Shared secret for the API (generated when omitted)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Allowed CORS origin, repeatable (any origin when omitted)
    #[arg(long = "allowed-origin")]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] bakery_daemon::state::StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            api_port: self.api_port,
            api_key: self.api_key.clone().unwrap_or_else(generate_api_key),
            allowed_origins: self.allowed_origins.clone(),
            ..AppConfig::default()
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let origins = if state.config.allowed_origins.is_empty() {
            "any".to_string()
        } else {
            state.config.allowed_origins.join(", ")
        };

        let output = format!(
            "Initialized bakery directory at: {}\n\
             - Database: {}\n\
             - Config: {}\n\
             - API port: {}\n\
             - API key: {}\n\
             - Allowed origins: {}",
            state.app_dir.display(),
            state.db_path.display(),
            state.config_path.display(),
            state.config.api_port,
            state.config.api_key,
            origins
        );

        Ok(output)
    }
}
