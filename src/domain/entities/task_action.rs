use crate::domain::entities::user::User;

const CUSTOM_ID_PREFIX: &str = "chore";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Pick,
    Unpick,
    Done,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Pick => "pick",
            ActionKind::Unpick => "unpick",
            ActionKind::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Pick => "Pick task",
            ActionKind::Unpick => "Unpick",
            ActionKind::Done => "Finish task",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "pick" => Some(ActionKind::Pick),
            "unpick" => Some(ActionKind::Unpick),
            "done" => Some(ActionKind::Done),
            _ => None,
        }
    }
}

/// Button attached to an outgoing message. Identifies one task of one registry generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskButton {
    pub kind: ActionKind,
    pub task_id: u64,
    pub day: u8,
    pub generation: u64,
}

impl TaskButton {
    pub fn new(kind: ActionKind, task_id: u64, day: u8, generation: u64) -> Self {
        Self {
            kind,
            task_id,
            day,
            generation,
        }
    }

    /// Encodes as `chore|<kind>|<generation>|<day>|<id>`
    pub fn custom_id(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            CUSTOM_ID_PREFIX,
            self.kind.as_str(),
            self.generation,
            self.day,
            self.task_id
        )
    }

    /// Decodes a custom id produced by `custom_id`; `None` for foreign components
    pub fn parse(custom_id: &str) -> Option<Self> {
        let mut parts = custom_id.split('|');
        if parts.next()? != CUSTOM_ID_PREFIX {
            return None;
        }

        let kind = ActionKind::parse(parts.next()?)?;
        let generation = parts.next()?.parse().ok()?;
        let day = parts.next()?.parse().ok()?;
        let task_id = parts.next()?.parse().ok()?;

        if parts.next().is_some() {
            return None;
        }

        Some(Self::new(kind, task_id, day, generation))
    }

    pub fn pressed_by(self, actor: User) -> TaskAction {
        TaskAction {
            button: self,
            actor,
        }
    }
}

/// Decoded interaction: which button was pressed and by whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAction {
    pub button: TaskButton,
    pub actor: User,
}

impl TaskAction {
    pub fn kind(&self) -> ActionKind {
        self.button.kind
    }
}
