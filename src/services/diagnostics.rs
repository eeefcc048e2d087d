use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{config::Config, db::TitleStore};

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

/// Status snapshot returned by the diagnostics endpoint
///
/// `database_url` and `database_name` only say whether the corresponding
/// setting is present; their values are never reported.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub store_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
    pub checked_at: DateTime<Utc>,
}

/// Inspects the store and configuration. Never fails: every step that goes
/// wrong is reported in its own field.
pub async fn inspect(store: Option<&dyn TitleStore>, config: &Config) -> DiagnosticsReport {
    let mut report = DiagnosticsReport {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: presence(config.has_database_url()),
        database_name: presence(config.has_database_name()),
        store_name: None,
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
        checked_at: Utc::now(),
    };

    let Some(store) = store else {
        report.database = "⚠️  Available but not initialized".to_string();
        return report;
    };

    report.database = "✅ Available".to_string();
    report.connection_status = "Connected".to_string();

    report.store_name = Some(match store.database_name().await {
        Ok(name) => name,
        Err(e) => format!("❌ Error: {}", truncate(&e.to_string())),
    });

    match store.list_collections().await {
        Ok(collections) => {
            report.collections = collections.into_iter().take(MAX_COLLECTIONS).collect();
            report.database = "✅ Connected & Working".to_string();
        }
        Err(e) => {
            tracing::warn!(error = %e, store = store.name(), "Listing collections failed");
            report.database = format!("⚠️  Connected but Error: {}", truncate(&e.to_string()));
        }
    }

    report
}

fn presence(set: bool) -> String {
    let label = if set { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}
