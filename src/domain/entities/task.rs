use crate::domain::entities::user::User;
use crate::domain::errors::ConfigError;
use crate::domain::value_objects::DAYS_PER_WEEK;
use std::collections::BTreeSet;

/// Recurring chore definition from the static catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskTemplate {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub tacos: u32,
    pub days: BTreeSet<u8>,
}

impl TaskTemplate {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        tacos: u32,
        days: impl IntoIterator<Item = u8>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            tacos,
            days: days.into_iter().collect(),
        }
    }

    /// Checks title and day range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle { id: self.id });
        }

        if let Some(&day) = self.days.iter().find(|&&day| day as usize >= DAYS_PER_WEEK) {
            return Err(ConfigError::InvalidDay {
                title: self.title.clone(),
                day,
            });
        }

        Ok(())
    }

    /// Concrete occurrence of this template on `day`
    pub fn instantiate(&self, day: u8) -> TaskInstance {
        TaskInstance {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            tacos: self.tacos,
            day,
            assignee: None,
            done: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Unassigned,
    Assigned,
    Done,
}

/// One occurrence of a template within the current weekly cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInstance {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub tacos: u32,
    pub day: u8,
    pub assignee: Option<User>,
    pub done: bool,
}

impl TaskInstance {
    pub fn state(&self) -> TaskState {
        match (&self.assignee, self.done) {
            (_, true) => TaskState::Done,
            (Some(_), false) => TaskState::Assigned,
            (None, false) => TaskState::Unassigned,
        }
    }

    #[cfg(test)]
    pub fn is_assigned_to(&self, user_id: u64) -> bool {
        self.assignee.as_ref().is_some_and(|user| user.id == user_id)
    }
}

/// Emitted by a successful completion; carries the tacos to grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardEvent {
    pub user: User,
    pub tacos: u32,
    pub task_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_rejects_day_out_of_range() {
        let template = TaskTemplate::new(1, "Dishes", "", 2, [1, 7]);
        assert!(matches!(
            template.validate(),
            Err(ConfigError::InvalidDay { day: 7, .. })
        ));
    }

    #[test]
    fn template_rejects_blank_title() {
        let template = TaskTemplate::new(4, "  ", "", 1, [0]);
        assert!(matches!(
            template.validate(),
            Err(ConfigError::EmptyTitle { id: 4 })
        ));
    }

    #[test]
    fn fresh_instance_is_unassigned() {
        let task = TaskTemplate::new(1, "Dishes", "Wash them", 2, [1]).instantiate(1);
        assert_eq!(task.state(), TaskState::Unassigned);
        assert_eq!(task.tacos, 2);
        assert!(!task.done);
        assert!(task.assignee.is_none());
    }
}
