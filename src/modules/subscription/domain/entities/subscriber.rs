use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// A notification recipient following one or more tracked accounts.
/// Unique by `recipient_id` (the messaging channel's address).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: Uuid,
    pub recipient_id: String,
    pub subscribed_accounts: HashSet<Uuid>,
}

impl Subscriber {
    pub fn new(recipient_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient_id: recipient_id.into(),
            subscribed_accounts: HashSet::new(),
        }
    }

    /// Returns false when the subscription already existed.
    pub fn subscribe_to(&mut self, account_id: Uuid) -> bool {
        self.subscribed_accounts.insert(account_id)
    }

    /// Returns false when there was no subscription to remove.
    pub fn unsubscribe_from(&mut self, account_id: Uuid) -> bool {
        self.subscribed_accounts.remove(&account_id)
    }

    pub fn has_subscriptions(&self) -> bool {
        !self.subscribed_accounts.is_empty()
    }
}
