use crate::domain::entities::notification::{Notification, Target};
use crate::domain::errors::DeliveryError;
use crate::domain::repositories::Messenger;
use crate::infrastructure::discord_bot::render::{build_components, build_embed};
use async_trait::async_trait;
use serenity::builder::CreateMessage;
use serenity::http::Http;
use serenity::model::id::{ChannelId, UserId};
use std::sync::Arc;

/// Delivers notifications as embeds with button rows, in DMs or channels.
pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    async fn resolve_channel(&self, target: Target) -> Result<ChannelId, DeliveryError> {
        match target {
            Target::Channel(0) | Target::User(0) => Err(DeliveryError {
                target: target.to_string(),
                reason: "zero is not a valid id".to_string(),
            }),
            Target::Channel(id) => Ok(ChannelId::new(id)),
            Target::User(id) => {
                let dm_channel = UserId::new(id)
                    .create_dm_channel(&self.http)
                    .await
                    .map_err(|e| DeliveryError {
                        target: target.to_string(),
                        reason: format!("failed to open DM channel: {}", e),
                    })?;
                Ok(dm_channel.id)
            }
        }
    }
}

#[async_trait]
impl Messenger for DiscordMessenger {
    async fn notify(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let channel = self.resolve_channel(notification.target).await?;

        let msg = CreateMessage::new()
            .embed(build_embed(&notification.message))
            .components(build_components(&notification.message));

        channel
            .send_message(&self.http, msg)
            .await
            .map_err(|e| DeliveryError {
                target: notification.target.to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }
}
