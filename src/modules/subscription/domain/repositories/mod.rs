pub mod subscriber_repository;
pub mod tracked_account_repository;

pub use subscriber_repository::SubscriberRepository;
pub use tracked_account_repository::TrackedAccountRepository;
