pub mod subscriber;
pub mod tracked_account;

pub use subscriber::Subscriber;
pub use tracked_account::TrackedAccount;
