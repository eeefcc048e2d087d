use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    db::store::{TitleStore, TITLE_COLLECTION},
    error::AppResult,
    models::ID_FIELD,
    services::filter::TitleFilter,
};

/// In-process title store for tests and local runs without PostgreSQL
///
/// Documents keep insertion order, which is also the order `find_titles`
/// returns them in.
pub struct InMemoryTitleStore {
    database: String,
    inner: RwLock<Inner>,
}

struct Inner {
    next_id: u64,
    documents: Vec<(u64, Value)>,
}

impl InMemoryTitleStore {
    pub fn new(database: impl Into<String>) -> Self {
        Self::with_documents(database, Vec::new())
    }

    /// Creates a store pre-populated with raw documents, stored as given
    pub fn with_documents(database: impl Into<String>, documents: Vec<Value>) -> Self {
        let mut inner = Inner {
            next_id: 1,
            documents: Vec::new(),
        };
        for document in documents {
            inner.push(document);
        }

        Self {
            database: database.into(),
            inner: RwLock::new(inner),
        }
    }
}

impl Inner {
    fn push(&mut self, document: Value) {
        let id = self.next_id;
        self.next_id += 1;
        self.documents.push((id, document));
    }
}

#[async_trait::async_trait]
impl TitleStore for InMemoryTitleStore {
    async fn count_titles(&self) -> AppResult<u64> {
        Ok(self.inner.read().await.documents.len() as u64)
    }

    async fn insert_titles(&self, documents: Vec<Value>) -> AppResult<u64> {
        let mut inner = self.inner.write().await;
        let inserted = documents.len() as u64;
        for document in documents {
            inner.push(document);
        }
        Ok(inserted)
    }

    async fn find_titles(&self, filter: &TitleFilter, limit: u32) -> AppResult<Vec<Value>> {
        let inner = self.inner.read().await;
        let documents = inner
            .documents
            .iter()
            .filter(|(_, document)| filter.matches(document))
            .take(limit as usize)
            .map(|(id, document)| {
                let mut document = document.clone();
                if let Value::Object(fields) = &mut document {
                    fields.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
                }
                document
            })
            .collect();
        Ok(documents)
    }

    async fn database_name(&self) -> AppResult<String> {
        Ok(self.database.clone())
    }

    async fn list_collections(&self) -> AppResult<Vec<String>> {
        Ok(vec![TITLE_COLLECTION.to_string()])
    }

    async fn close(&self) {}

    fn name(&self) -> &'static str {
        "memory"
    }
}
