pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::dispatcher::NotificationDispatcher;
pub use domain::messenger::ChangeMessenger;
pub use domain::notifier::AnimeNotifier;
pub use infrastructure::discord::DiscordMessenger;
