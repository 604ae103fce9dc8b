/// Commands a channel member can issue to the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Tasks,
    MyTasks,
    Help,
}

impl ChatCommand {
    pub const ALL: [ChatCommand; 3] = [ChatCommand::Tasks, ChatCommand::MyTasks, ChatCommand::Help];

    /// Slash command name
    pub fn name(&self) -> &'static str {
        match self {
            ChatCommand::Tasks => "tasks",
            ChatCommand::MyTasks => "my_tasks",
            ChatCommand::Help => "help",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChatCommand::Tasks => "Show today's chores",
            ChatCommand::MyTasks => "Show the chores you picked this week",
            ChatCommand::Help => "Show available commands",
        }
    }

    /// Accepts slash names as well as the free-text "tasks" / "my tasks" forms
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().trim_start_matches('/').to_lowercase().replace('_', " ");
        match normalized.as_str() {
            "tasks" => Some(ChatCommand::Tasks),
            "my tasks" => Some(ChatCommand::MyTasks),
            "help" => Some(ChatCommand::Help),
            _ => None,
        }
    }
}
