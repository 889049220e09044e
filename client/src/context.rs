//! Client context
//! --------------
//! The explicit context object that screens receive instead of a global
//! store. It wires the store, token keeper, API client, session manager,
//! and cache synchronizer together and owns the cross-component flows:
//! login/logout spanning session and cache, mutate-then-refresh chaining,
//! and the concurrent detail fetch.
use std::sync::Arc;

use tracing::Instrument;

use api::client::ApiClient;
use api::types::{
    AuthPayload, GroupMember, ListPayload, NewAccount, NewProduct, Notification, Product,
    ShoppingList, UserProfile,
};
use cache::CacheSynchronizer;
use common::logger::{init_logger, root_span, TraceId};
use session::gates::{self, Gate};
use session::manager::SessionManager;
use session::model::SessionStatus;
use session::token::TokenKeeper;
use store::sqlite_store::SQLiteStateStore;
use store::StateStore;

use crate::config::ClientConfig;
use crate::error::AppError;

/// Everything one list screen shows: the list itself, its products, and
/// the members of its backing group.
#[derive(Debug, Clone)]
pub struct ListView {
    pub list: ShoppingList,
    pub products: Vec<Product>,
    pub members: Vec<GroupMember>,
}

pub struct ClientContext<S> {
    config: ClientConfig,
    session: Arc<SessionManager<S>>,
    api: Arc<ApiClient<TokenKeeper<S>>>,
    cache: CacheSynchronizer<S, ApiClient<TokenKeeper<S>>>,
}

impl ClientContext<SQLiteStateStore> {
    /// Production wiring: logging, SQLite store, then the full stack.
    pub async fn bootstrap(config: ClientConfig) -> Result<Self, AppError> {
        init_logger("shopping-list-client");

        let span = root_span("bootstrap", &TraceId::default());
        async {
            let store = Arc::new(SQLiteStateStore::new(&config.database_url).await?);
            Self::with_store(store, config).await
        }
        .instrument(span)
        .await
    }
}

impl<S: StateStore + 'static> ClientContext<S> {
    /// Wire the stack over any state store. Tests use this with an
    /// in-memory store.
    pub async fn with_store(store: Arc<S>, config: ClientConfig) -> Result<Self, AppError> {
        let keeper = Arc::new(TokenKeeper::new(store.clone()));
        let api = Arc::new(ApiClient::new(&config.base_api_url, keeper.clone())?);
        let session = Arc::new(SessionManager::new(keeper, api.clone()).await);
        let cache = CacheSynchronizer::new(api.clone(), store);

        Ok(Self {
            config,
            session,
            api,
            cache,
        })
    }

    // ---- Session ----

    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn guest_gate(&self) -> Gate {
        gates::guest_gate(self.status())
    }

    pub fn protected_gate(&self) -> Gate {
        gates::protected_gate(self.status())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, AppError> {
        let span = root_span("login", &TraceId::default());
        async { Ok(self.session.login(email, password).await?) }
            .instrument(span)
            .await
    }

    /// Tear down the session end to end: timer and memory via the cache,
    /// then persisted keys and status via the session manager. Infallible
    /// and idempotent.
    ///
    /// The cache goes first: invalidation takes the snapshot lock, so a
    /// refresh that already passed the sequence guard finishes its persist
    /// before the keys are cleared, and the clear then removes whatever it
    /// wrote. The reverse order would let such a refresh re-insert the
    /// snapshot key after logout.
    pub async fn logout(&self) {
        let span = root_span("logout", &TraceId::default());
        async {
            self.cache.invalidate().await;
            self.session.logout().await;
        }
        .instrument(span)
        .await
    }

    pub async fn register(&self, account: &NewAccount) -> Result<UserProfile, AppError> {
        Ok(self.session.register(account).await?)
    }

    pub async fn change_password(&self, new_password: &str) -> Result<(), AppError> {
        Ok(self.session.change_password(new_password).await?)
    }

    pub async fn profile(&self) -> Result<UserProfile, AppError> {
        Ok(self.session.fetch_profile().await?)
    }

    pub async fn cached_profile(&self) -> Result<Option<UserProfile>, AppError> {
        Ok(self.session.cached_profile().await?)
    }

    // ---- Lists ----

    pub async fn lists(&self) -> Option<Vec<ShoppingList>> {
        self.cache.snapshot().await
    }

    /// Cache-first load: hydrate from the store, refresh only when nothing
    /// was persisted.
    pub async fn load_lists(&self) -> Result<Vec<ShoppingList>, AppError> {
        Ok(self.cache.bootstrap().await?)
    }

    pub async fn refresh(&self) -> Result<Vec<ShoppingList>, AppError> {
        Ok(self.cache.refresh().await?)
    }

    pub async fn search(&self, term: &str) -> Vec<ShoppingList> {
        self.cache.search(term).await
    }

    /// Create, then refresh, so the caller never refetches by hand after
    /// mutating.
    pub async fn create_list(&self, name: &str, description: &str) -> Result<(), AppError> {
        self.api
            .create_list(&ListPayload {
                shopping_list_name: name.to_string(),
                description: description.to_string(),
            })
            .await?;
        self.cache.refresh().await?;
        Ok(())
    }

    /// Edit screens leave the snapshot alone until the next sync.
    pub async fn update_list(
        &self,
        id: i64,
        name: &str,
        description: &str,
    ) -> Result<(), AppError> {
        self.api
            .update_list(
                id,
                &ListPayload {
                    shopping_list_name: name.to_string(),
                    description: description.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    pub async fn delete_list(&self, id: i64) -> Result<(), AppError> {
        self.api.delete_list(id).await?;
        self.cache.refresh().await?;
        Ok(())
    }

    /// One list screen's worth of data. The list comes from the snapshot
    /// (server fallback on a miss); products and members are fetched
    /// concurrently.
    pub async fn list_detail(&self, id: i64) -> Result<ListView, AppError> {
        let list = self.cache.list_detail(id).await?;

        let products = self.api.products_for_list(id);
        let members = async {
            match &list.user_group {
                Some(group) => self.api.members_for_group(group.group_id).await,
                None => Ok(vec![]),
            }
        };
        let (products, members) = futures::try_join!(products, members)?;

        Ok(ListView {
            list,
            products,
            members,
        })
    }

    // ---- Products ----

    pub async fn add_product(&self, product: &NewProduct) -> Result<Product, AppError> {
        Ok(self.api.create_product(product).await?)
    }

    pub async fn update_product(&self, product: &Product) -> Result<(), AppError> {
        Ok(self.api.update_product(product).await?)
    }

    pub async fn delete_product(&self, product_id: i64) -> Result<(), AppError> {
        Ok(self.api.delete_product(product_id).await?)
    }

    // ---- Group members ----

    pub async fn members(&self, group_id: i64) -> Result<Vec<GroupMember>, AppError> {
        Ok(self.api.members_for_group(group_id).await?)
    }

    pub async fn add_member(&self, group_id: i64, user_id: i64) -> Result<(), AppError> {
        Ok(self.api.add_member(group_id, user_id).await?)
    }

    pub async fn remove_member(&self, membership_id: i64) -> Result<(), AppError> {
        Ok(self.api.remove_member(membership_id).await?)
    }

    pub async fn all_users(&self) -> Result<Vec<UserProfile>, AppError> {
        Ok(self.api.all_users().await?)
    }

    // ---- Notifications ----

    /// The logged-in user's notifications, newest first (the service
    /// returns them oldest first).
    pub async fn notifications(&self) -> Result<Vec<Notification>, AppError> {
        let profile = match self.session.cached_profile().await? {
            Some(profile) => profile,
            None => self.session.fetch_profile().await?,
        };

        let mut notifications = self.api.notifications_for_user(profile.user_id).await?;
        notifications.reverse();
        Ok(notifications)
    }

    // ---- Sync mode ----

    /// Toggle between timed and manual refresh. Enabling while enabled
    /// restarts the timer at the configured period.
    pub fn set_auto_sync(&self, enabled: bool) {
        if enabled {
            self.cache.start_auto_sync(self.config.sync_interval);
        } else {
            self.cache.stop_auto_sync();
        }
    }
}
