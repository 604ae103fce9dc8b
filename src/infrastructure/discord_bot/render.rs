use crate::domain::entities::notification::{Message, MessageOption, Reply, ReplyVisibility};
use crate::domain::entities::task_action::ActionKind;
use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};
use serenity::model::colour::Color;

// Discord limits
const MAX_TITLE: usize = 256;
const MAX_FIELD_VALUE: usize = 1024;
const MAX_FIELDS: usize = 25;
const MAX_BUTTON_LABEL: usize = 80;
const BUTTONS_PER_ROW: usize = 5;
const MAX_ROWS: usize = 5;

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn build_embed(message: &Message) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(truncate(&message.title, MAX_TITLE))
        .color(Color::from_rgb(66, 135, 245));

    for section in message.sections.iter().take(MAX_FIELDS) {
        let value = if section.text.trim().is_empty() {
            "\u{200B}".to_string()
        } else {
            truncate(&section.text, MAX_FIELD_VALUE)
        };
        embed = embed.field(truncate(&section.heading, MAX_TITLE), value, false);
    }

    embed
}

fn build_button(option: &MessageOption) -> CreateButton {
    let style = match option.button.kind {
        ActionKind::Pick => ButtonStyle::Primary,
        ActionKind::Unpick => ButtonStyle::Secondary,
        ActionKind::Done => ButtonStyle::Success,
    };

    CreateButton::new(option.button.custom_id())
        .label(truncate(&option.label, MAX_BUTTON_LABEL))
        .style(style)
}

pub fn build_components(message: &Message) -> Vec<CreateActionRow> {
    message
        .options
        .chunks(BUTTONS_PER_ROW)
        .take(MAX_ROWS)
        .map(|row| CreateActionRow::Buttons(row.iter().map(build_button).collect()))
        .collect()
}

pub fn interaction_response(reply: &Reply) -> CreateInteractionResponse {
    let data = CreateInteractionResponseMessage::new()
        .embed(build_embed(&reply.message))
        .components(build_components(&reply.message));

    match reply.visibility {
        ReplyVisibility::Public => CreateInteractionResponse::Message(data),
        ReplyVisibility::Private => CreateInteractionResponse::Message(data.ephemeral(true)),
        ReplyVisibility::ReplaceOriginal => CreateInteractionResponse::UpdateMessage(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::task_action::TaskButton;

    #[test]
    fn long_text_is_cut_to_the_limit() {
        let cut = truncate(&"x".repeat(300), MAX_TITLE);
        assert_eq!(cut.chars().count(), MAX_TITLE);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate("short", MAX_TITLE), "short");
    }

    #[test]
    fn buttons_are_split_into_rows_of_five() {
        let mut message = Message::new("Tasks");
        for id in 0..12 {
            message = message.option("Pick", TaskButton::new(ActionKind::Pick, id, 0, 1));
        }
        assert_eq!(build_components(&message).len(), 3);

        for id in 12..40 {
            message = message.option("Pick", TaskButton::new(ActionKind::Pick, id, 0, 1));
        }
        assert_eq!(build_components(&message).len(), MAX_ROWS);
    }
}
