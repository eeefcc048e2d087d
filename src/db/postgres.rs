use std::str::FromStr;

use serde_json::Value;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    types::Json,
    PgPool, Postgres, QueryBuilder,
};

use crate::{
    db::store::{TitleStore, TITLE_COLLECTION},
    error::AppResult,
    models::ID_FIELD,
    services::filter::TitleFilter,
};

/// Creates a PostgreSQL connection pool
///
/// `database_name`, when given, overrides the database named in the URL.
pub async fn create_pool(
    database_url: &str,
    database_name: Option<&str>,
) -> anyhow::Result<PgPool> {
    let mut options = PgConnectOptions::from_str(database_url)?;
    if let Some(name) = database_name.filter(|n| !n.is_empty()) {
        options = options.database(name);
    }

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Title documents stored as JSONB rows in PostgreSQL
///
/// Each row is `(id BIGSERIAL, doc JSONB)`; the row id is exposed as the
/// document identity.
#[derive(Clone)]
pub struct PgTitleStore {
    pool: PgPool,
}

impl PgTitleStore {
    /// Wraps a pool, creating the title collection if it does not exist yet
    pub async fn open(pool: PgPool) -> AppResult<Self> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} (id BIGSERIAL PRIMARY KEY, doc JSONB NOT NULL)",
            TITLE_COLLECTION
        );
        sqlx::query(&ddl).execute(&pool).await?;

        tracing::info!(collection = TITLE_COLLECTION, "Title collection ready");

        Ok(Self { pool })
    }
}

/// Appends the filter conditions to a query that already has a `WHERE` clause
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &TitleFilter) {
    if let Some(name) = &filter.name {
        // strpos keeps the search literal; LIKE would interpret % and _
        query
            .push(" AND strpos(lower(doc->>'name'), lower(")
            .push_bind(name.clone())
            .push(")) > 0");
    }
    if let Some(genre) = &filter.genre {
        query
            .push(" AND doc->'genres' @> jsonb_build_array(")
            .push_bind(genre.clone())
            .push("::text)");
    }
    if let Some(kind) = &filter.kind {
        query.push(" AND doc->>'type' = ").push_bind(kind.clone());
    }
}

#[async_trait::async_trait]
impl TitleStore for PgTitleStore {
    async fn count_titles(&self) -> AppResult<u64> {
        let query = format!("SELECT COUNT(*) FROM {}", TITLE_COLLECTION);
        let count: i64 = sqlx::query_scalar(&query).fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn insert_titles(&self, documents: Vec<Value>) -> AppResult<u64> {
        if documents.is_empty() {
            return Ok(0);
        }

        let mut query =
            QueryBuilder::<Postgres>::new(format!("INSERT INTO {} (doc) ", TITLE_COLLECTION));
        query.push_values(documents, |mut row, document| {
            row.push_bind(Json(document));
        });

        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn find_titles(&self, filter: &TitleFilter, limit: u32) -> AppResult<Vec<Value>> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT doc || jsonb_build_object('{}', id::text) FROM {} WHERE TRUE",
            ID_FIELD, TITLE_COLLECTION
        ));
        push_filter(&mut query, filter);
        query.push(" LIMIT ").push_bind(i64::from(limit));

        let rows: Vec<(Json<Value>,)> = query.build_query_as().fetch_all(&self.pool).await?;

        tracing::debug!(
            rows = rows.len(),
            unconstrained = filter.is_unconstrained(),
            filter = ?filter,
            "Title documents fetched"
        );

        Ok(rows.into_iter().map(|(Json(document),)| document).collect())
    }

    async fn database_name(&self) -> AppResult<String> {
        let name: String = sqlx::query_scalar("SELECT current_database()")
            .fetch_one(&self.pool)
            .await?;
        Ok(name)
    }

    async fn list_collections(&self) -> AppResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = current_schema()
            ORDER BY table_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(filter: &TitleFilter) -> String {
        let mut query = QueryBuilder::<Postgres>::new("SELECT doc FROM title WHERE TRUE");
        push_filter(&mut query, filter);
        query.into_sql()
    }

    #[test]
    fn test_unconstrained_filter_adds_no_conditions() {
        assert_eq!(render(&TitleFilter::default()), "SELECT doc FROM title WHERE TRUE");
    }

    #[test]
    fn test_filter_conditions_are_bound_in_order() {
        let sql = render(&TitleFilter::new(Some("wed"), Some("Mystery"), Some("series")));
        assert_eq!(
            sql,
            "SELECT doc FROM title WHERE TRUE \
             AND strpos(lower(doc->>'name'), lower($1)) > 0 \
             AND doc->'genres' @> jsonb_build_array($2::text) \
             AND doc->>'type' = $3"
        );
    }

    #[test]
    fn test_single_condition_uses_first_placeholder() {
        let sql = render(&TitleFilter::new(None, None, Some("movie")));
        assert_eq!(sql, "SELECT doc FROM title WHERE TRUE AND doc->>'type' = $1");
    }
}
