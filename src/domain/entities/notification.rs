use crate::domain::entities::task_action::{ActionKind, TaskButton};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    User(u64),
    Channel(u64),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::User(id) => write!(f, "user {}", id),
            Target::Channel(id) => write!(f, "channel {}", id),
        }
    }
}

/// Transport-agnostic message content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub title: String,
    pub sections: Vec<MessageSection>,
    pub options: Vec<MessageOption>,
}

/// One block of a message, usually a single task card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSection {
    pub heading: String,
    pub text: String,
}

/// Interactive button with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOption {
    pub label: String,
    pub button: TaskButton,
}

impl Message {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn section(mut self, heading: impl Into<String>, text: impl Into<String>) -> Self {
        self.sections.push(MessageSection {
            heading: heading.into(),
            text: text.into(),
        });
        self
    }

    pub fn option(mut self, label: impl Into<String>, button: TaskButton) -> Self {
        self.options.push(MessageOption {
            label: label.into(),
            button,
        });
        self
    }

    /// Buttons of a given kind, in message order
    pub fn buttons(&self, kind: ActionKind) -> impl Iterator<Item = &TaskButton> {
        self.options
            .iter()
            .map(|option| &option.button)
            .filter(move |button| button.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub target: Target,
    pub message: Message,
}

impl Notification {
    pub fn new(target: Target, message: Message) -> Self {
        Self { target, message }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyVisibility {
    /// Seen by the whole channel
    Public,
    /// Seen only by the user who interacted
    Private,
    /// Replaces the message that carried the pressed button
    ReplaceOriginal,
}

/// Synchronous answer to a command or button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: Message,
    pub visibility: ReplyVisibility,
}

impl Reply {
    pub fn public(message: Message) -> Self {
        Self {
            message,
            visibility: ReplyVisibility::Public,
        }
    }

    pub fn private(message: Message) -> Self {
        Self {
            message,
            visibility: ReplyVisibility::Private,
        }
    }

    pub fn replacing(message: Message) -> Self {
        Self {
            message,
            visibility: ReplyVisibility::ReplaceOriginal,
        }
    }
}
