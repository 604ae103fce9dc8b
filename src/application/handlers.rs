use crate::application::scheduler::recurrence_scheduler::CallbackError;
use crate::application::scheduler::{Job, JobCallback, RecurrenceScheduler, SchedulePolicy};
use crate::application::services::task_orchestrator::TaskOrchestrator;
use crate::domain::entities::chat_command::ChatCommand;
use crate::domain::entities::notification::Reply;
use crate::domain::entities::task_action::TaskAction;
use crate::domain::entities::user::User;
use crate::domain::errors::ConfigError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Everything that may touch the registry goes through this inbox.
#[derive(Debug)]
pub enum BotEvent {
    Command {
        command: ChatCommand,
        user: User,
        reply: oneshot::Sender<Reply>,
    },
    Action {
        action: TaskAction,
        reply: oneshot::Sender<Reply>,
    },
    Scheduled(Job),
}

pub type BotInbox = mpsc::UnboundedSender<BotEvent>;

/// Handles events one at a time until every sender is dropped
pub async fn run_event_loop(
    mut orchestrator: TaskOrchestrator,
    mut inbox: mpsc::UnboundedReceiver<BotEvent>,
) {
    info!("Event loop started");
    while let Some(event) = inbox.recv().await {
        handle_event(&mut orchestrator, event);
    }
    info!("Event loop stopped");
}

pub fn handle_event(orchestrator: &mut TaskOrchestrator, event: BotEvent) {
    match event {
        BotEvent::Command {
            command,
            user,
            reply,
        } => {
            debug!("Command {} from {}", command.name(), user.name);
            let response = orchestrator.handle_command(command, &user);
            if reply.send(response).is_err() {
                warn!("Interaction for command {} went away before the reply", command.name());
            }
        }
        BotEvent::Action { action, reply } => {
            debug!(
                "Action {} on task #{} from {}",
                action.kind().as_str(),
                action.button.task_id,
                action.actor.name
            );
            let response = orchestrator.handle_action(action);
            if reply.send(response).is_err() {
                warn!("Interaction went away before the reply");
            }
        }
        BotEvent::Scheduled(job) => orchestrator.run_job(job),
    }
}

fn enqueue_job(inbox: BotInbox, job: Job) -> JobCallback {
    Box::new(move || -> Result<(), CallbackError> {
        inbox
            .send(BotEvent::Scheduled(job))
            .map_err(|_| format!("inbox closed, dropping {}", job.name()).into())
    })
}

/// One scheduler rule per policy entry, each feeding its job into the inbox
pub fn build_scheduler(
    policy: &SchedulePolicy,
    inbox: &BotInbox,
) -> Result<RecurrenceScheduler, ConfigError> {
    let mut scheduler = RecurrenceScheduler::new();
    for entry in &policy.entries {
        let rule = entry.to_rule()?;
        scheduler.schedule_recurring(entry.job.name(), rule, enqueue_job(inbox.clone(), entry.job));
    }
    info!("Scheduled {} recurring jobs", scheduler.len());
    Ok(scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::scheduler::schedule_policy::ScheduleEntry;
    use chrono::NaiveDate;

    #[test]
    fn scheduler_enqueues_matching_jobs() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let policy = SchedulePolicy {
            entries: vec![
                ScheduleEntry::new(Job::AnnounceTasks, &[0], &[9], &[0]),
                ScheduleEntry::new(Job::RemindUncompleted, &[0], &[17], &[0]),
            ],
        };
        let mut scheduler = build_scheduler(&policy, &tx).unwrap();

        // Monday 09:00
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(scheduler.tick(monday), 1);

        match rx.try_recv() {
            Ok(BotEvent::Scheduled(job)) => assert_eq!(job, Job::AnnounceTasks),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_inbox_does_not_break_the_scheduler() {
        let (tx, rx) = mpsc::unbounded_channel();
        let policy = SchedulePolicy {
            entries: vec![ScheduleEntry::new(Job::AnnounceTasks, &[0], &[9], &[0])],
        };
        let mut scheduler = build_scheduler(&policy, &tx).unwrap();
        drop(rx);

        let monday = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(scheduler.tick(monday), 1);
        assert_eq!(scheduler.len(), 1);
    }
}
