pub mod application;
pub mod domain;

pub use application::{SubscribeOutcome, SubscriptionService, UnsubscribeOutcome};
pub use domain::entities::{Subscriber, TrackedAccount};
pub use domain::repositories::{SubscriberRepository, TrackedAccountRepository};
