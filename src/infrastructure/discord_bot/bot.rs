use crate::application::handlers::{BotEvent, BotInbox, build_scheduler, run_event_loop};
use crate::application::services::{BotConfig, NotificationService, TaskOrchestrator};
use crate::domain::entities::chat_command::ChatCommand;
use crate::domain::entities::notification::Reply;
use crate::domain::entities::task_action::TaskButton;
use crate::domain::entities::user::User;
use crate::infrastructure::discord_bot::discord_messenger::DiscordMessenger;
use crate::infrastructure::discord_bot::render::interaction_response;
use crate::infrastructure::repositories::JsonCatalogRepository;
use crate::infrastructure::scheduler::start_scheduler;
use crate::infrastructure::timezone::SystemCalendar;

use serenity::all::{
    CommandInteraction, ComponentInteraction, CreateCommand, Interaction, Ready,
};
use serenity::prelude::*;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

/// Decodes Discord interactions and forwards them to the bot inbox.
pub struct CommandHandler {
    inbox: BotInbox,
}

impl CommandHandler {
    pub fn new(inbox: BotInbox) -> Self {
        Self { inbox }
    }

    /// Queues an event and waits for the orchestrator's answer
    async fn ask(&self, event: impl FnOnce(oneshot::Sender<Reply>) -> BotEvent) -> Option<Reply> {
        let (tx, rx) = oneshot::channel();
        if self.inbox.send(event(tx)).is_err() {
            error!("Bot inbox is closed, dropping interaction");
            return None;
        }
        rx.await.ok()
    }

    async fn handle_command(&self, ctx: &Context, command: &CommandInteraction) {
        let Some(chat_command) = ChatCommand::parse(&command.data.name) else {
            debug!("Command not recognized: {}", command.data.name);
            return;
        };
        let user = to_user(&command.user);

        let Some(reply) = self
            .ask(|reply| BotEvent::Command {
                command: chat_command,
                user,
                reply,
            })
            .await
        else {
            return;
        };

        if let Err(e) = command
            .create_response(&ctx.http, interaction_response(&reply))
            .await
        {
            error!("Failed to answer /{}: {}", command.data.name, e);
        }
    }

    async fn handle_component(&self, ctx: &Context, component: &ComponentInteraction) {
        let Some(button) = TaskButton::parse(&component.data.custom_id) else {
            debug!("Unknown component interaction: {}", component.data.custom_id);
            return;
        };
        let action = button.pressed_by(to_user(&component.user));

        let Some(reply) = self.ask(|reply| BotEvent::Action { action, reply }).await else {
            return;
        };

        if let Err(e) = component
            .create_response(&ctx.http, interaction_response(&reply))
            .await
        {
            error!("Failed to answer button {}: {}", component.data.custom_id, e);
        }
    }
}

fn to_user(user: &serenity::model::user::User) -> User {
    let name = user.global_name.clone().unwrap_or_else(|| user.name.clone());
    User::new(user.id.get(), name)
}

#[serenity::async_trait]
impl EventHandler for CommandHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Bot ready as {}", ready.user.name);

        // register commands for each guild
        for guild_status in ready.guilds {
            for command in ChatCommand::ALL {
                let builder = CreateCommand::new(command.name()).description(command.description());
                if let Err(e) = guild_status.id.create_command(&ctx.http, builder).await {
                    error!(
                        "Failed to register /{} in guild {}: {}",
                        command.name(),
                        guild_status.id,
                        e
                    );
                }
            }
            info!("Commands registered for guild {}", guild_status.id.get());
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Some(command) = interaction.clone().command() {
            self.handle_command(&ctx, &command).await;
        }

        // buttons
        if let Some(component) = interaction.message_component() {
            self.handle_component(&ctx, &component).await;
        }
    }
}

/// Wires catalog, calendar, orchestrator, scheduler and gateway, then runs until the client stops
pub async fn run_bot(config: BotConfig) -> anyhow::Result<()> {
    let (inbox, events) = mpsc::unbounded_channel();

    let intents = GatewayIntents::GUILDS;
    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(CommandHandler::new(inbox.clone()))
        .await?;

    let messenger = Arc::new(DiscordMessenger::new(client.http.clone()));
    let catalog = Arc::new(JsonCatalogRepository::new(config.catalog_path.clone()));
    let calendar = Arc::new(SystemCalendar::new(config.timezone));
    let orchestrator = TaskOrchestrator::new(
        catalog,
        calendar,
        NotificationService::new(messenger),
        config.chores_channel_id,
    )?;
    tokio::spawn(run_event_loop(orchestrator, events));

    let scheduler = build_scheduler(&config.schedule, &inbox)?;
    start_scheduler(scheduler, config.timezone);

    client.start().await?;
    Ok(())
}
