use crate::application::scheduler::Job;
use crate::application::services::messages;
use crate::application::services::notification_service::NotificationService;
use crate::application::services::task_lifecycle;
use crate::application::services::task_registry::TaskRegistry;
use crate::application::services::task_statistics::{
    DayFilter, daily_statistics, tasks_by_user, uncompleted_in_bucket, uncompleted_tasks_by_user,
};
use crate::domain::entities::chat_command::ChatCommand;
use crate::domain::entities::notification::{Message, Reply};
use crate::domain::entities::task::TaskInstance;
use crate::domain::entities::task_action::{ActionKind, TaskAction, TaskButton};
use crate::domain::entities::user::User;
use crate::domain::errors::{ConfigError, TaskError};
use crate::domain::repositories::{Calendar, CatalogRepository};
use crate::domain::value_objects::{DAYS_PER_WEEK, day_name};
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Owns the weekly registry and turns commands, button presses and scheduled
/// jobs into lifecycle calls and outgoing notifications.
pub struct TaskOrchestrator {
    registry: TaskRegistry,
    catalog: Arc<dyn CatalogRepository>,
    calendar: Arc<dyn Calendar>,
    notifications: NotificationService,
    channel_id: u64,
    closed_day: Option<ClosedDay>,
}

/// Last day with tasks of a week that has been regenerated away.
#[derive(Debug)]
struct ClosedDay {
    day: u8,
    tasks: Vec<TaskInstance>,
}

const LAST_DAY: u8 = DAYS_PER_WEEK as u8 - 1;

impl TaskOrchestrator {
    /// Loads the catalog and builds the first registry. A bad catalog is fatal here.
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        calendar: Arc<dyn Calendar>,
        notifications: NotificationService,
        channel_id: u64,
    ) -> Result<Self, ConfigError> {
        let templates = catalog.load_templates()?;
        let registry = TaskRegistry::generate(&templates, 1)?;
        info!(
            "Generated {} tasks from {} templates",
            registry.len(),
            templates.len()
        );

        Ok(Self {
            registry,
            catalog,
            calendar,
            notifications,
            channel_id,
            closed_day: None,
        })
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Replaces the registry with a fresh generation. On error the current week is kept.
    pub fn regenerate(&mut self) -> Result<(), ConfigError> {
        let templates = self.catalog.load_templates()?;
        let registry = TaskRegistry::generate(&templates, self.registry.generation() + 1)?;
        info!(
            "Regenerated weekly tasks: generation {}, {} tasks",
            registry.generation(),
            registry.len()
        );
        self.closed_day = last_day_with_tasks(&self.registry, 0..=LAST_DAY).map(|day| ClosedDay {
            day,
            tasks: self.registry.get_by_day(day as usize).to_vec(),
        });
        self.registry = registry;
        Ok(())
    }

    // === COMMANDS ===

    pub fn handle_command(&mut self, command: ChatCommand, user: &User) -> Reply {
        let generation = self.registry.generation();
        match command {
            ChatCommand::Tasks => {
                let today = self.calendar.current_day();
                Reply::public(messages::day_tasks(
                    self.registry.get_by_day(today as usize),
                    today,
                    generation,
                ))
            }
            ChatCommand::MyTasks => {
                let by_user = tasks_by_user(&self.registry, DayFilter::All);
                let tasks = by_user.get(&user.id).map(Vec::as_slice).unwrap_or(&[]);
                Reply::private(messages::user_tasks(messages::USER_TASKS_TITLE, tasks, generation))
            }
            ChatCommand::Help => Reply::private(messages::help()),
        }
    }

    // === BUTTON ACTIONS ===

    /// Applies a button press. Lifecycle errors become user-facing text here and nowhere else.
    pub fn handle_action(&mut self, action: TaskAction) -> Reply {
        match self.apply_action(&action) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    "Rejected {} on task #{} by {}: {}",
                    action.kind().as_str(),
                    action.button.task_id,
                    action.actor.name,
                    e
                );
                Reply::private(Message::new(Self::error_text(&e)))
            }
        }
    }

    fn error_text(error: &TaskError) -> &'static str {
        match error {
            TaskError::NotFound { .. } => messages::NO_SUCH_TASK,
            TaskError::Stale { .. } => messages::COMPLETED_TOO_LATE,
            TaskError::NotAssigned => messages::TASK_NOT_ASSIGNED,
            TaskError::AlreadyDone => messages::TASK_ALREADY_DONE,
        }
    }

    fn apply_action(&mut self, action: &TaskAction) -> Result<Reply, TaskError> {
        let button = action.button;
        let not_found = TaskError::NotFound {
            id: button.task_id,
            day: button.day,
        };

        // buttons from a previous week point at tasks that no longer exist
        if button.generation != self.registry.generation() {
            return Err(not_found);
        }
        let task = self
            .registry
            .get_by_id(button.task_id, button.day)
            .ok_or(not_found)?;
        info!(
            "{} pressed {} on \"{}\" ({})",
            action.actor.name,
            button.kind.as_str(),
            task.title,
            day_name(task.day)
        );

        match button.kind {
            ActionKind::Pick => self.pick(button, &action.actor),
            ActionKind::Unpick => self.unpick(button, &action.actor),
            ActionKind::Done => self.finish(button),
        }
    }

    fn pick(&mut self, button: TaskButton, actor: &User) -> Result<Reply, TaskError> {
        let generation = self.registry.generation();
        let task = self
            .registry
            .get_by_id_mut(button.task_id, button.day)
            .ok_or(TaskError::NotFound {
                id: button.task_id,
                day: button.day,
            })?;
        task_lifecycle::assign(task, actor.clone())?;
        let card = messages::user_tasks(messages::NEW_TASK_FOR_USER_TITLE, &[&*task], generation);

        self.notifications.send_dm(actor.id, card);

        Ok(Reply::replacing(messages::day_tasks(
            self.registry.get_by_day(button.day as usize),
            button.day,
            generation,
        )))
    }

    fn unpick(&mut self, button: TaskButton, actor: &User) -> Result<Reply, TaskError> {
        let generation = self.registry.generation();
        let task = self
            .registry
            .get_by_id_mut(button.task_id, button.day)
            .ok_or(TaskError::NotFound {
                id: button.task_id,
                day: button.day,
            })?;
        let previous = task.assignee.clone();
        task_lifecycle::unassign(task)?;

        if let Some(previous) = previous {
            let pick = TaskButton::new(ActionKind::Pick, task.id, task.day, generation);
            let help_wanted = Message::new(messages::unpicked_public(&previous))
                .section(
                    format!("{} ({})", task.title, day_name(task.day)),
                    task.description.clone(),
                )
                .option(format!("Pick \"{}\"", task.title), pick);

            self.notifications
                .send_dm(previous.id, Message::new(messages::unpicked_private(&previous)));
            self.notifications.send_channel(self.channel_id, help_wanted);
        }

        let by_user = tasks_by_user(&self.registry, DayFilter::All);
        let remaining = by_user.get(&actor.id).map(Vec::as_slice).unwrap_or(&[]);
        Ok(Reply::replacing(messages::user_tasks(
            messages::USER_TASKS_TITLE,
            remaining,
            generation,
        )))
    }

    fn finish(&mut self, button: TaskButton) -> Result<Reply, TaskError> {
        let today = self.calendar.current_day();
        let task = self
            .registry
            .get_by_id_mut(button.task_id, button.day)
            .ok_or(TaskError::NotFound {
                id: button.task_id,
                day: button.day,
            })?;
        let reward = task_lifecycle::complete(task, today)?;

        // the completion is committed whatever happens to this announcement
        self.notifications.send_channel(
            self.channel_id,
            Message::new(messages::reward_announcement(
                &reward.user,
                reward.tacos,
                &reward.task_title,
            )),
        );

        Ok(Reply::private(Message::new(messages::USER_COMPLETED_TASK)))
    }

    // === SCHEDULED JOBS ===

    pub fn run_job(&mut self, job: Job) {
        info!("Running scheduled job {}", job.name());
        match job {
            Job::RegenerateTasks => {
                if let Err(e) = self.regenerate() {
                    error!("Weekly regeneration failed, keeping current tasks: {}", e);
                }
            }
            Job::AnnounceTasks => self.announce_tasks(),
            Job::ReportStatistics => self.report_statistics(),
            Job::RemindUnassigned => self.remind_unassigned(),
            Job::RemindUncompleted => self.remind_uncompleted(),
        }
    }

    fn announce_tasks(&self) {
        let today = self.calendar.current_day();
        let tasks = self.registry.get_by_day(today as usize);
        if tasks.is_empty() {
            info!("No tasks to announce for {}", day_name(today));
            return;
        }

        let message = messages::day_tasks(tasks, today, self.registry.generation());
        self.notifications.send_channel(self.channel_id, message);
    }

    fn remind_unassigned(&self) {
        let today = self.calendar.current_day();
        let tasks = self.registry.get_by_day(today as usize);
        if daily_statistics(tasks).unassigned.is_empty() {
            return;
        }

        let mut message = messages::day_tasks(tasks, today, self.registry.generation());
        message.title = messages::TASKS_STILL_UNASSIGNED.to_string();
        self.notifications.send_channel(self.channel_id, message);
    }

    fn remind_uncompleted(&self) {
        let today = self.calendar.current_day();
        let generation = self.registry.generation();
        let reminders: Vec<(u64, Message)> =
            uncompleted_tasks_by_user(&self.registry, DayFilter::Day(today))
                .into_iter()
                .map(|(user_id, tasks)| {
                    (
                        user_id,
                        messages::user_tasks(messages::NOT_COMPLETED_TASKS, &tasks, generation),
                    )
                })
                .collect();

        info!("Reminding {} users of unfinished tasks", reminders.len());
        for (user_id, message) in reminders {
            self.notifications.send_dm(user_id, message);
        }
    }

    /// Posts the statistics of the last finished day that had tasks, and nudges
    /// users who left their tasks open that day. Right after a regeneration this
    /// is the closing day of the previous week.
    fn report_statistics(&mut self) {
        if let Some(day) = self.last_finished_day() {
            self.closed_day = None;
            self.send_report(day, self.registry.get_by_day(day as usize));
        } else if let Some(closed) = self.closed_day.take() {
            self.send_report(closed.day, &closed.tasks);
        } else {
            info!("No finished day with tasks to report on");
        }
    }

    fn send_report(&self, day: u8, bucket: &[TaskInstance]) {
        let report = messages::statistics(day, &daily_statistics(bucket));

        let generation = self.registry.generation();
        let nudges: Vec<(u64, Message)> = uncompleted_in_bucket(bucket)
            .into_iter()
            .map(|(user_id, tasks)| {
                let mut message = messages::user_tasks(messages::FORGOT_DONE_TASKS, &tasks, generation);
                // too late to act on these
                message.options.clear();
                (user_id, message)
            })
            .collect();

        self.notifications.send_channel(self.channel_id, report);
        for (user_id, message) in nudges {
            self.notifications.send_dm(user_id, message);
        }
    }

    /// Closest day before today with tasks in the current week. Today is never finished.
    fn last_finished_day(&self) -> Option<u8> {
        if self.calendar.current_day() == 0 {
            return None;
        }
        last_day_with_tasks(&self.registry, 0..=self.calendar.previous_day())
    }
}

fn last_day_with_tasks(registry: &TaskRegistry, days: RangeInclusive<u8>) -> Option<u8> {
    days.rev().find(|&day| !registry.get_by_day(day as usize).is_empty())
}
