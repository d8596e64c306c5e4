use axum::extract::FromRef;

use crate::auth::CredentialGate;
use crate::config::Config;
use crate::database::{Database, DatabaseSetupError};
use crate::repository::{BakeryItemRepository, OrderRepository};
use crate::service::{BakeryItemService, OrderService};

/// Main service state: the shared store handle plus everything built on it.
#[derive(Clone, Debug)]
pub struct State {
    database: Database,
    bakery_items: BakeryItemService,
    orders: OrderService,
    gate: CredentialGate,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        if config.api_key.is_empty() {
            return Err(StateSetupError::MissingApiKey);
        }

        let database = match config.sqlite_path {
            Some(ref path) => {
                tracing::info!(path = %path.display(), "opening document store");
                Database::open(path).await?
            }
            None => {
                tracing::info!("using in-memory document store");
                Database::in_memory().await?
            }
        };

        Ok(Self::new(database, CredentialGate::new(config.api_key.as_str())))
    }

    pub fn new(database: Database, gate: CredentialGate) -> Self {
        let bakery_items = BakeryItemService::new(BakeryItemRepository::bakery_items(&database));
        let orders = OrderService::new(OrderRepository::orders(&database));

        Self {
            database,
            bakery_items,
            orders,
            gate,
        }
    }

    pub fn bakery_items(&self) -> &BakeryItemService {
        &self.bakery_items
    }

    pub fn orders(&self) -> &OrderService {
        &self.orders
    }
}

impl FromRef<State> for Database {
    fn from_ref(state: &State) -> Self {
        state.database.clone()
    }
}

impl FromRef<State> for CredentialGate {
    fn from_ref(state: &State) -> Self {
        state.gate.clone()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("no api key configured")]
    MissingApiKey,
    #[error("Database setup error: {0}")]
    DatabaseSetupError(#[from] DatabaseSetupError),
}
