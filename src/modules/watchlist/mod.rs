pub mod domain;
pub mod infrastructure;

pub use domain::source::{WatchListSource, WatchListTitle};
pub use infrastructure::mal::MalClient;
