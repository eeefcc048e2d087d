use serde::Serialize;

pub mod title;

pub use title::{FieldViolation, Title, ID_FIELD};

/// Response body of the title listing endpoint
#[derive(Debug, Serialize)]
pub struct TitlesResponse {
    pub items: Vec<Title>,
}
