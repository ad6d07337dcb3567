pub mod core;
pub mod feed_client;
pub mod mock;
pub mod observability;
pub mod repositories;
pub mod simulation;

pub use feed_client::HttpFeedProvider;
pub use mock::MockFeedProvider;
pub use repositories::InMemoryHistoryRepository;
