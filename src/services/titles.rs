use crate::{
    db::TitleStore,
    error::{AppError, AppResult},
    models::Title,
    services::{filter::TitleFilter, seed::Seeder},
};

pub const DEFAULT_LIMIT: u32 = 50;
pub const MAX_LIMIT: u32 = 100;

/// A validated title listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleQuery {
    pub filter: TitleFilter,
    pub limit: u32,
}

impl TitleQuery {
    /// Builds a query from raw parameters, rejecting limits outside `1..=MAX_LIMIT`
    pub fn new(
        name: Option<&str>,
        genre: Option<&str>,
        kind: Option<&str>,
        limit: Option<i64>,
    ) -> AppResult<Self> {
        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(limit) if (1..=i64::from(MAX_LIMIT)).contains(&limit) => limit as u32,
            Some(limit) => {
                return Err(AppError::InvalidInput(format!(
                    "limit must be between 1 and {}, got {}",
                    MAX_LIMIT, limit
                )))
            }
        };

        Ok(Self {
            filter: TitleFilter::new(name, genre, kind),
            limit,
        })
    }
}

/// Lists catalog titles matching `query`
///
/// Seeding runs first and never fails the request. Any document that does not
/// validate fails the whole listing; partial results are never returned.
pub async fn list_titles(
    store: Option<&dyn TitleStore>,
    seeder: &Seeder,
    query: &TitleQuery,
) -> AppResult<Vec<Title>> {
    // Best-effort: seeding problems are logged and otherwise ignored
    if let Err(e) = seeder.ensure_seeded(store).await {
        tracing::warn!(error = %e, "Seeding sample titles failed");
    }

    let store = store.ok_or(AppError::StoreUnavailable)?;

    let documents = store
        .find_titles(&query.filter, query.limit)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, store = store.name(), "Title query failed");
            e
        })?;

    let mut titles = Vec::with_capacity(documents.len());
    for document in documents {
        let title = Title::from_document(document).map_err(|violations| {
            tracing::error!(
                violations = ?violations,
                store = store.name(),
                "Stored title failed validation"
            );
            AppError::InvalidDocument(violations)
        })?;
        titles.push(title);
    }

    tracing::info!(
        filter = ?query.filter,
        limit = query.limit,
        results = titles.len(),
        "Title listing completed"
    );

    Ok(titles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{store::MockTitleStore, InMemoryTitleStore};
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn query(name: Option<&str>, genre: Option<&str>, kind: Option<&str>) -> TitleQuery {
        TitleQuery::new(name, genre, kind, None).unwrap()
    }

    #[test]
    fn test_query_limit_defaults_and_bounds() {
        assert_eq!(query(None, None, None).limit, DEFAULT_LIMIT);
        assert_eq!(assert_ok!(TitleQuery::new(None, None, None, Some(1))).limit, 1);
        assert_eq!(assert_ok!(TitleQuery::new(None, None, None, Some(100))).limit, 100);
        assert_err!(TitleQuery::new(None, None, None, Some(0)));
        assert_err!(TitleQuery::new(None, None, None, Some(101)));
        assert_err!(TitleQuery::new(None, None, None, Some(-3)));
    }

    #[tokio::test]
    async fn test_lists_seeded_titles_on_empty_store() {
        let store = InMemoryTitleStore::new("catalog");
        let seeder = Seeder::new();

        let titles = assert_ok!(list_titles(Some(&store), &seeder, &query(None, None, None)).await);
        let names: Vec<&str> = titles.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"Stranger Things"));
        assert!(names.contains(&"Extraction"));
        assert!(names.contains(&"Wednesday"));
    }

    #[tokio::test]
    async fn test_filters_and_limit_are_applied() {
        let store = InMemoryTitleStore::new("catalog");
        let seeder = Seeder::new();

        let movies = list_titles(Some(&store), &seeder, &query(None, None, Some("movie")))
            .await
            .unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].name, "Extraction");

        let thrillers = query(Some("STRANGER"), Some("Thriller"), None);
        let thrillers = list_titles(Some(&store), &seeder, &thrillers).await.unwrap();
        assert_eq!(thrillers.len(), 1);
        assert_eq!(thrillers[0].name, "Stranger Things");

        let one = TitleQuery::new(None, None, None, Some(1)).unwrap();
        let limited = list_titles(Some(&store), &seeder, &one).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_document_fails_whole_listing() {
        let store = InMemoryTitleStore::with_documents(
            "catalog",
            vec![
                json!({ "name": "Fine", "type": "movie", "rating": 6.0 }),
                json!({ "name": "Broken", "type": "movie", "rating": 11.0 }),
            ],
        );
        let seeder = Seeder::new();

        let result = list_titles(Some(&store), &seeder, &query(None, None, None)).await;
        match result {
            Err(AppError::InvalidDocument(violations)) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "rating");
            }
            other => panic!("expected InvalidDocument, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_store_fails_listing() {
        let seeder = Seeder::new();
        let result = list_titles(None, &seeder, &query(None, None, None)).await;
        assert!(matches!(result, Err(AppError::StoreUnavailable)));
    }

    #[tokio::test]
    async fn test_seed_failure_does_not_fail_listing() {
        let mut store = MockTitleStore::new();
        store
            .expect_count_titles()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        store
            .expect_find_titles()
            .returning(|_, _| Ok(vec![json!({ "_id": "9", "name": "Dark", "type": "series" })]));
        store.expect_name().return_const("mock");

        let seeder = Seeder::new();
        let titles = assert_ok!(list_titles(Some(&store), &seeder, &query(None, None, None)).await);
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].name, "Dark");
    }

    #[tokio::test]
    async fn test_store_failure_fails_listing() {
        let mut store = MockTitleStore::new();
        store.expect_count_titles().returning(|| Ok(3));
        store
            .expect_find_titles()
            .returning(|_, _| Err(AppError::Database(sqlx::Error::PoolClosed)));
        store.expect_name().return_const("mock");

        let seeder = Seeder::new();
        let result = list_titles(Some(&store), &seeder, &query(None, None, None)).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_filter_and_limit_are_passed_to_store() {
        let mut store = MockTitleStore::new();
        store.expect_count_titles().returning(|| Ok(3));
        store
            .expect_find_titles()
            .withf(|filter, limit| {
                filter.genre.as_deref() == Some("Mystery") && filter.name.is_none() && *limit == 7
            })
            .returning(|_, _| Ok(vec![]));
        store.expect_name().return_const("mock");

        let seeder = Seeder::new();
        let query = TitleQuery::new(None, Some("Mystery"), None, Some(7)).unwrap();
        let titles = assert_ok!(list_titles(Some(&store), &seeder, &query).await);
        assert!(titles.is_empty());
    }
}
