pub mod service;

pub use service::{SubscribeOutcome, SubscriptionService, UnsubscribeOutcome};
