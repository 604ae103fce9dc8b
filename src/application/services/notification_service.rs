use crate::domain::entities::notification::{Message, Notification, Target};
use crate::domain::repositories::Messenger;
use std::sync::Arc;
use tracing::{debug, error};

/// Fire-and-forget delivery on top of a `Messenger`.
#[derive(Clone)]
pub struct NotificationService {
    messenger: Arc<dyn Messenger>,
}

impl NotificationService {
    pub fn new(messenger: Arc<dyn Messenger>) -> Self {
        Self { messenger }
    }

    /// Hands the notification to a background task and returns at once.
    /// Failures are logged there and never reach the caller.
    pub fn deliver(&self, notification: Notification) {
        let messenger = Arc::clone(&self.messenger);
        tokio::spawn(async move {
            match messenger.notify(&notification).await {
                Ok(()) => debug!("Delivered '{}' to {}", notification.message.title, notification.target),
                Err(e) => error!("Failed to deliver '{}': {}", notification.message.title, e),
            }
        });
    }

    pub fn send_dm(&self, user_id: u64, message: Message) {
        self.deliver(Notification::new(Target::User(user_id), message));
    }

    pub fn send_channel(&self, channel_id: u64, message: Message) {
        self.deliver(Notification::new(Target::Channel(channel_id), message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DeliveryError;
    use async_trait::async_trait;
    use tokio::sync::{Mutex, Notify};

    /// Holds every send until the gateway is released.
    #[derive(Default)]
    struct SlowMessenger {
        gate: Notify,
        sent: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl Messenger for SlowMessenger {
        async fn notify(&self, notification: &Notification) -> Result<(), DeliveryError> {
            self.gate.notified().await;
            self.sent.lock().await.push(notification.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn delivery_does_not_wait_for_the_gateway() {
        let messenger = Arc::new(SlowMessenger::default());
        let service = NotificationService::new(messenger.clone());

        service.send_dm(10, Message::new("hello"));
        tokio::task::yield_now().await;
        assert!(messenger.sent.lock().await.is_empty());

        messenger.gate.notify_one();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        let sent = messenger.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].target, Target::User(10));
    }
}
