use tokio::sync::Mutex;

use crate::{db::TitleStore, error::AppResult, models::Title};

/// What a seeding attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// No store is configured, nothing to seed
    StoreUnavailable,
    /// The collection already holds titles
    AlreadySeeded,
    /// The collection was empty and this many sample titles were inserted
    Seeded(u64),
}

/// Inserts the sample titles into an empty collection
///
/// The count-then-insert runs under a mutex so concurrent first requests in
/// this process seed at most once. The count is taken on every call, so a
/// collection emptied while the service runs is seeded again.
#[derive(Debug, Default)]
pub struct Seeder {
    guard: Mutex<()>,
}

impl Seeder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the collection if it is empty.
    ///
    /// Failures are returned rather than raised so callers can decide to
    /// ignore them; the list endpoint does.
    pub async fn ensure_seeded(&self, store: Option<&dyn TitleStore>) -> AppResult<SeedOutcome> {
        let Some(store) = store else {
            return Ok(SeedOutcome::StoreUnavailable);
        };

        let _guard = self.guard.lock().await;

        let count = store.count_titles().await?;
        if count > 0 {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let documents = sample_titles().iter().map(Title::to_document).collect();
        let inserted = store.insert_titles(documents).await?;

        tracing::info!(inserted = inserted, store = store.name(), "Seeded sample titles");

        Ok(SeedOutcome::Seeded(inserted))
    }
}

/// The fixed sample catalog inserted into an empty collection
pub fn sample_titles() -> Vec<Title> {
    vec![
        Title {
            name: "Stranger Things".to_string(),
            kind: "series".to_string(),
            year: Some(2016),
            rating: Some(8.6),
            genres: vec!["Sci-Fi".to_string(), "Thriller".to_string()],
            description: Some(
                "When a young boy vanishes, a small town uncovers a mystery involving secret experiments."
                    .to_string(),
            ),
            poster_url: Some("https://image.tmdb.org/t/p/w342/x2LSRK2Cm7MZhjluni1msVJ3wDF.jpg".to_string()),
            backdrop_url: Some("https://image.tmdb.org/t/p/w1280/56v2KjBlU4XaOv9rVYEQypROD7P.jpg".to_string()),
            thumb_url: Some("https://image.tmdb.org/t/p/w300/49WJfeN0moxb9IPfGn8AIqMGskD.jpg".to_string()),
            mature: false,
        },
        Title {
            name: "Extraction".to_string(),
            kind: "movie".to_string(),
            year: Some(2020),
            rating: Some(7.1),
            genres: vec!["Action".to_string(), "Thriller".to_string()],
            description: Some(
                "A fearless black market mercenary embarks on the most deadly extraction of his career."
                    .to_string(),
            ),
            poster_url: Some("https://image.tmdb.org/t/p/w342/wlfDxbGEsW58vGhFljKkcR5IxDj.jpg".to_string()),
            backdrop_url: Some("https://image.tmdb.org/t/p/w1280/wwF9c83TtqgkQJu1Mst7IRYpA8Y.jpg".to_string()),
            thumb_url: Some("https://image.tmdb.org/t/p/w300/wlfDxbGEsW58vGhFljKkcR5IxDj.jpg".to_string()),
            mature: true,
        },
        Title {
            name: "Wednesday".to_string(),
            kind: "series".to_string(),
            year: Some(2022),
            rating: Some(8.3),
            genres: vec!["Comedy".to_string(), "Mystery".to_string()],
            description: Some(
                "Wednesday Addams investigates a murder spree while making new friends and foes at Nevermore Academy."
                    .to_string(),
            ),
            poster_url: Some("https://image.tmdb.org/t/p/w342/9PFonBhy4cQy7Jz20NpMygczOkv.jpg".to_string()),
            backdrop_url: Some("https://image.tmdb.org/t/p/w1280/jeGvzg2vYqMENAqaE3ULw7qGRCF.jpg".to_string()),
            thumb_url: Some("https://image.tmdb.org/t/p/w300/9PFonBhy4cQy7Jz20NpMygczOkv.jpg".to_string()),
            mature: false,
        },
    ]
}
