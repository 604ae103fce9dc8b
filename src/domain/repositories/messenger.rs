use async_trait::async_trait;

use crate::domain::entities::notification::Notification;
use crate::domain::errors::DeliveryError;

/// Outbound side of the chat platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Deliver a message to a user or channel
    async fn notify(&self, notification: &Notification) -> Result<(), DeliveryError>;
}
