use api::client::ApiClient;
use api::dispatcher::TokenProvider;
use api::error::ApiError;
use api::types::ShoppingList;

/// Where the synchronizer gets lists from. The API client is the real
/// source; tests script one.
#[async_trait::async_trait]
pub trait ListSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<ShoppingList>, ApiError>;
    async fn fetch_by_id(&self, id: i64) -> Result<ShoppingList, ApiError>;
}

#[async_trait::async_trait]
impl<P: TokenProvider> ListSource for ApiClient<P> {
    async fn fetch_all(&self) -> Result<Vec<ShoppingList>, ApiError> {
        self.lists_all().await
    }

    async fn fetch_by_id(&self, id: i64) -> Result<ShoppingList, ApiError> {
        self.list_by_id(id).await
    }
}
