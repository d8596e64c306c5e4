use std::error::Error;
use std::path::PathBuf;

use url::Url;

use bakery_daemon::http_server::api::client::{ApiClient, ApiError};
use bakery_daemon::state::AppState;

const DEFAULT_API_PORT: u16 = 5001;

/// Where the API lives and which key to present.
#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub remote: Url,
    pub api_key: Option<String>,
}

/// Resolve remote URL and API key for the client.
///
/// Explicit flags win; otherwise both come from the config directory, and
/// the URL falls back to port 5001.
pub fn resolve_settings(
    remote: Option<Url>,
    api_key: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<RemoteSettings, url::ParseError> {
    let state = AppState::load(config_path).ok();

    let remote = match remote {
        Some(url) => url,
        None => {
            let port = state
                .as_ref()
                .map(|s| s.config.api_port)
                .unwrap_or(DEFAULT_API_PORT);
            Url::parse(&format!("http://localhost:{}", port))?
        }
    };

    let api_key = api_key.or_else(|| state.map(|s| s.config.api_key));

    Ok(RemoteSettings { remote, api_key })
}

#[derive(Clone)]
pub struct OpContext {
    /// API client (always initialized with default or custom URL)
    pub client: ApiClient,
    /// Optional custom config path (defaults to ~/.bakery)
    pub config_path: Option<PathBuf>,
}

impl OpContext {
    pub fn new(settings: RemoteSettings, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        Ok(Self {
            client: ApiClient::new(&settings.remote, settings.api_key.as_deref())?,
            config_path,
        })
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use bakery_daemon::state::AppConfig;

    use super::*;

    #[test]
    fn test_explicit_flags_win() {
        let explicit = Url::parse("http://example.com:9999").unwrap();
        let settings = resolve_settings(
            Some(explicit.clone()),
            Some("k".to_string()),
            Some(PathBuf::from("/nonexistent")),
        )
        .unwrap();
        assert_eq!(settings.remote, explicit);
        assert_eq!(settings.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_falls_back_to_default() {
        let settings = resolve_settings(None, None, Some(PathBuf::from("/nonexistent"))).unwrap();
        assert_eq!(settings.remote.as_str(), "http://localhost:5001/");
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_reads_config_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bakery");
        let config = AppConfig {
            api_port: 7007,
            api_key: "from-config".to_string(),
            ..AppConfig::default()
        };
        AppState::init(Some(path.clone()), Some(config)).unwrap();

        let settings = resolve_settings(None, None, Some(path)).unwrap();
        assert_eq!(settings.remote.port(), Some(7007));
        assert_eq!(settings.api_key.as_deref(), Some("from-config"));
    }
}
