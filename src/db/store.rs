use serde_json::Value;

use crate::{error::AppResult, services::filter::TitleFilter};

/// Name of the collection holding title documents
pub const TITLE_COLLECTION: &str = "title";

/// Document store holding catalog titles
///
/// Implementations hand back raw documents; validation happens in the
/// service layer. Returned documents carry the store identity under
/// [`crate::models::ID_FIELD`].
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TitleStore: Send + Sync {
    /// Number of documents in the title collection
    async fn count_titles(&self) -> AppResult<u64>;

    /// Inserts documents into the title collection, returning how many were written
    async fn insert_titles(&self, documents: Vec<Value>) -> AppResult<u64>;

    /// Fetches up to `limit` documents matching `filter`, in the store's natural order
    async fn find_titles(&self, filter: &TitleFilter, limit: u32) -> AppResult<Vec<Value>>;

    /// Name of the database the store is connected to
    async fn database_name(&self) -> AppResult<String>;

    /// Collections (tables) visible in the database
    async fn list_collections(&self) -> AppResult<Vec<String>>;

    /// Releases the underlying connections
    async fn close(&self);

    /// Store name for logging
    fn name(&self) -> &'static str;
}
