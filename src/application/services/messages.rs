use crate::application::services::task_statistics::DailyStatistics;
use crate::domain::entities::chat_command::ChatCommand;
use crate::domain::entities::notification::Message;
use crate::domain::entities::task::{TaskInstance, TaskState};
use crate::domain::entities::task_action::{ActionKind, TaskButton};
use crate::domain::entities::user::User;
use crate::domain::value_objects::day_name;

pub const NEW_TASK_FOR_USER_TITLE: &str = "You have a new task today!";
pub const USER_TASKS_TITLE: &str = "Here is a list of your tasks:";
pub const NO_USER_TASKS_TITLE: &str = "You have not picked any task this week.";
pub const USER_COMPLETED_TASK: &str =
    "Thank you for completing your task. I shall reward you nicely :taco:";
pub const NOT_COMPLETED_TASKS: &str =
    "Please do not forget to complete your tasks for today :anguished:";
pub const COMPLETED_TOO_LATE: &str =
    "Sorry but this task was supposed to be completed on a previous day :white_frowning_face:";
pub const FORGOT_DONE_TASKS: &str = "Did you forget to mark some tasks as done? If you have not completed the tasks, well it's too late and I will be very angry :rage3:";
pub const TASKS_STILL_UNASSIGNED: &str =
    "@here some tasks are still unassigned! Please help :pray:";
pub const NO_SUCH_TASK: &str =
    "This task does not exist anymore. Ask me for `tasks` to get a fresh list.";
pub const TASK_NOT_ASSIGNED: &str = "Nobody picked this task yet, pick it before finishing it.";
pub const TASK_ALREADY_DONE: &str = "This task is already done :tada:";

pub fn unpicked_private(user: &User) -> String {
    format!("Unpicking tasks makes {} a dull boy :rage3:", user.name)
}

pub fn unpicked_public(user: &User) -> String {
    format!("{} cannot complete their task today. Please help out!", user.mention())
}

/// Beyond this many the count is written out instead of repeated.
const MAX_TACO_EMOJIS: u32 = 10;

fn taco_count(tacos: u32) -> String {
    if tacos <= MAX_TACO_EMOJIS {
        ":taco:".repeat(tacos as usize)
    } else {
        format!("{} :taco:", tacos)
    }
}

pub fn reward_announcement(user: &User, tacos: u32, task_title: &str) -> String {
    format!(
        "{} earned {} {} for \"{}\"",
        user.mention(),
        taco_count(tacos),
        if tacos == 1 { "taco" } else { "tacos" },
        task_title
    )
}

fn task_card(task: &TaskInstance) -> String {
    let mut text = String::new();
    if !task.description.trim().is_empty() {
        text.push_str(&task.description);
        text.push('\n');
    }
    text.push_str(&format!("Tacos: {}", task.tacos));

    match (&task.assignee, task.state()) {
        (Some(user), TaskState::Done) => text.push_str(&format!("\nDone by {} :white_check_mark:", user.mention())),
        (Some(user), _) => text.push_str(&format!("\nPicked by {}", user.mention())),
        (None, _) => {}
    }
    text
}

/// Day listing; unassigned tasks get a Pick button
pub fn day_tasks(tasks: &[TaskInstance], day: u8, generation: u64) -> Message {
    if tasks.is_empty() {
        return Message::new(format!("There are no tasks for {}! :beers:", day_name(day)));
    }

    let open = tasks.iter().filter(|task| task.state() == TaskState::Unassigned).count();
    let title = if open == 0 {
        format!("Every task for {} has been picked! :beers:", day_name(day))
    } else {
        format!("Here are the tasks for {}:", day_name(day))
    };

    let mut message = Message::new(title);
    for task in tasks {
        message = message.section(&task.title, task_card(task));
        if task.state() == TaskState::Unassigned {
            let button = TaskButton::new(ActionKind::Pick, task.id, task.day, generation);
            message = message.option(format!("Pick \"{}\"", task.title), button);
        }
    }
    message
}

/// A user's own tasks; open ones get Unpick and Done buttons
pub fn user_tasks(title: &str, tasks: &[&TaskInstance], generation: u64) -> Message {
    if tasks.is_empty() {
        return Message::new(NO_USER_TASKS_TITLE);
    }

    let mut message = Message::new(title);
    for task in tasks {
        message = message.section(
            format!("{} ({})", task.title, day_name(task.day)),
            task_card(task),
        );
        if !task.done {
            for kind in [ActionKind::Unpick, ActionKind::Done] {
                let button = TaskButton::new(kind, task.id, task.day, generation);
                message = message.option(format!("{} \"{}\"", kind.label(), task.title), button);
            }
        }
    }
    message
}

/// Public statistics of one day, grouped by outcome
pub fn statistics(day: u8, stats: &DailyStatistics<'_>) -> Message {
    let total = stats.total();
    let mut message = Message::new(format!("Here are the stats for {}'s tasks", day_name(day)));

    if !stats.completed.is_empty() {
        let lines: Vec<String> = stats
            .completed
            .iter()
            .map(|task| format!("{} completed \"{}\"", assignee_mention(task), task.title))
            .collect();
        message = message.section(
            format!("{} of {} tasks were completed", stats.completed.len(), total),
            lines.join("\n"),
        );
    }

    if !stats.uncompleted.is_empty() {
        let lines: Vec<String> = stats
            .uncompleted
            .iter()
            .map(|task| format!("{} did not complete \"{}\"", assignee_mention(task), task.title))
            .collect();
        message = message.section(
            format!("{} of {} tasks were not completed", stats.uncompleted.len(), total),
            lines.join("\n"),
        );
    }

    if !stats.unassigned.is_empty() {
        let lines: Vec<String> = stats
            .unassigned
            .iter()
            .map(|task| format!("\"{}\" was left unassigned", task.title))
            .collect();
        message = message.section(
            format!("{} of {} tasks were left unassigned", stats.unassigned.len(), total),
            lines.join("\n"),
        );
    }

    message
}

fn assignee_mention(task: &TaskInstance) -> String {
    task.assignee
        .as_ref()
        .map(User::mention)
        .unwrap_or_else(|| "Nobody".to_string())
}

pub fn help() -> Message {
    let lines: Vec<String> = ChatCommand::ALL
        .iter()
        .map(|command| format!("`/{}` - {}", command.name(), command.description()))
        .collect();
    Message::new("Available commands").section("Chores", lines.join("\n"))
}
