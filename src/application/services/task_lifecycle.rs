use crate::domain::entities::task::{RewardEvent, TaskInstance, TaskState};
use crate::domain::entities::user::User;
use crate::domain::errors::TaskError;
use tracing::info;

/// Gives the task to `user`. An assigned task silently changes hands.
pub fn assign(task: &mut TaskInstance, user: User) -> Result<(), TaskError> {
    if task.state() == TaskState::Done {
        return Err(TaskError::AlreadyDone);
    }

    info!("Task #{} '{}' picked by {}", task.id, task.title, user.name);
    task.assignee = Some(user);
    Ok(())
}

/// Releases the task. No-op when nobody holds it.
pub fn unassign(task: &mut TaskInstance) -> Result<(), TaskError> {
    match task.state() {
        TaskState::Done => Err(TaskError::AlreadyDone),
        TaskState::Unassigned => Ok(()),
        TaskState::Assigned => {
            if let Some(user) = task.assignee.take() {
                info!("Task #{} '{}' unpicked by {}", task.id, task.title, user.name);
            }
            Ok(())
        }
    }
}

/// Marks an assigned task of `current_day` as done.
///
/// A task of any other day is stale and left untouched.
pub fn complete(task: &mut TaskInstance, current_day: u8) -> Result<RewardEvent, TaskError> {
    if task.day != current_day {
        return Err(TaskError::Stale {
            task_day: task.day,
            current_day,
        });
    }

    let user = match task.state() {
        TaskState::Done => return Err(TaskError::AlreadyDone),
        TaskState::Unassigned => return Err(TaskError::NotAssigned),
        TaskState::Assigned => task.assignee.clone().ok_or(TaskError::NotAssigned)?,
    };

    task.done = true;
    info!("Task #{} '{}' completed by {}", task.id, task.title, user.name);

    Ok(RewardEvent {
        user,
        tacos: task.tacos,
        task_title: task.title.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::task::TaskTemplate;

    fn dishes(day: u8) -> TaskInstance {
        TaskTemplate::new(1, "Dishes", "", 2, [day]).instantiate(day)
    }

    fn alice() -> User {
        User::new(10, "alice")
    }

    #[test]
    fn assign_then_complete_emits_reward() {
        let mut task = dishes(1);
        assign(&mut task, alice()).unwrap();
        assert_eq!(task.state(), TaskState::Assigned);

        let reward = complete(&mut task, 1).unwrap();
        assert!(task.done);
        assert_eq!(reward.tacos, 2);
        assert_eq!(reward.user, alice());
        assert_eq!(reward.task_title, "Dishes");

        assert_eq!(complete(&mut task, 1), Err(TaskError::AlreadyDone));
    }

    #[test]
    fn reassigning_overwrites_the_assignee() {
        let mut task = dishes(1);
        assign(&mut task, alice()).unwrap();
        assign(&mut task, User::new(11, "bob")).unwrap();
        assert!(task.is_assigned_to(11));
    }

    #[test]
    fn unassign_twice_equals_once() {
        let mut task = dishes(1);
        assign(&mut task, alice()).unwrap();

        unassign(&mut task).unwrap();
        let once = task.clone();
        unassign(&mut task).unwrap();
        assert_eq!(task, once);
        assert_eq!(task.state(), TaskState::Unassigned);
    }

    #[test]
    fn completing_another_days_task_is_stale_and_mutates_nothing() {
        let mut task = dishes(1);
        assign(&mut task, alice()).unwrap();

        let result = complete(&mut task, 2);
        assert_eq!(
            result,
            Err(TaskError::Stale {
                task_day: 1,
                current_day: 2
            })
        );
        assert!(!task.done);
        assert_eq!(task.assignee, Some(alice()));
    }

    #[test]
    fn unassigned_task_cannot_be_completed() {
        let mut task = dishes(3);
        assert_eq!(complete(&mut task, 3), Err(TaskError::NotAssigned));
        assert!(!task.done);
    }

    #[test]
    fn done_task_is_frozen() {
        let mut task = dishes(1);
        assign(&mut task, alice()).unwrap();
        complete(&mut task, 1).unwrap();

        assert_eq!(unassign(&mut task), Err(TaskError::AlreadyDone));
        assert_eq!(assign(&mut task, User::new(11, "bob")), Err(TaskError::AlreadyDone));
        assert!(task.is_assigned_to(10));
    }
}
