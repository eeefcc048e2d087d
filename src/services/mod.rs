pub mod diagnostics;
pub mod filter;
pub mod seed;
pub mod titles;

pub use filter::TitleFilter;
pub use seed::{SeedOutcome, Seeder};
pub use titles::{list_titles, TitleQuery};
