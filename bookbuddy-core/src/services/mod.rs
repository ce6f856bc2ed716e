//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod auth;
mod category;
mod collection;
pub mod library;
mod search;
mod status;
pub mod validation;

pub use auth::AuthService;
pub use category::{CategoryCount, CategoryService};
pub use collection::CollectionService;
pub use library::{LibraryService, NewBook, SortOption};
pub use search::{SearchService, MIN_QUERY_LEN};
pub use status::{GoalProgress, LibrarySummary, StatusCount, StatusService};
pub use validation::RegistrationData;
