pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryTitleStore;
pub use postgres::{create_pool, PgTitleStore};
pub use store::{TitleStore, TITLE_COLLECTION};
