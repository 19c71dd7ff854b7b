pub mod anime_store;
pub mod subscription_store;

pub use anime_store::InMemoryAnimeStore;
pub use subscription_store::{InMemorySubscriberStore, InMemoryTrackedAccountStore};
