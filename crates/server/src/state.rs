use std::sync::Arc;

use configs::{AppConfig, StatusMode};
use models::db::Store;
use service::accounts::{
    repo::seaorm::SeaOrmAccountRepository,
    repository::AccountRepository,
    service::{AccountConfig, AccountService},
};
use service::places::{
    repository::{PlaceRepository, SeaOrmPlaceRepository},
    PlaceService,
};

pub type DynPlaceService = PlaceService<dyn PlaceRepository>;
pub type DynAccountService = AccountService<dyn AccountRepository>;

/// Shared by every handler. Holds no per-request data.
#[derive(Clone)]
pub struct ServerState {
    pub places: Arc<DynPlaceService>,
    pub accounts: Arc<DynAccountService>,
    pub status_mode: StatusMode,
}

impl ServerState {
    pub fn new(
        place_repo: Arc<dyn PlaceRepository>,
        account_repo: Arc<dyn AccountRepository>,
        account_cfg: AccountConfig,
        status_mode: StatusMode,
    ) -> Self {
        Self {
            places: Arc::new(PlaceService::new(place_repo)),
            accounts: Arc::new(AccountService::new(account_repo, account_cfg)),
            status_mode,
        }
    }

    /// Wire SeaORM repositories over the store's pool.
    pub fn from_store(store: &Store, cfg: &AppConfig) -> Self {
        let db = store.conn().clone();
        Self::new(
            Arc::new(SeaOrmPlaceRepository { db: db.clone() }),
            Arc::new(SeaOrmAccountRepository { db }),
            AccountConfig { enforce_signup_rules: cfg.auth.enforce_signup_rules },
            cfg.api.status_mode,
        )
    }
}
