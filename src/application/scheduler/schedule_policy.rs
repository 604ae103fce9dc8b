use crate::application::scheduler::recurrence_scheduler::RecurrenceRule;
use crate::domain::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scheduled work the orchestrator knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Job {
    RegenerateTasks,
    AnnounceTasks,
    ReportStatistics,
    RemindUnassigned,
    RemindUncompleted,
}

impl Job {
    pub fn name(&self) -> &'static str {
        match self {
            Job::RegenerateTasks => "regenerate_tasks",
            Job::AnnounceTasks => "announce_tasks",
            Job::ReportStatistics => "report_statistics",
            Job::RemindUnassigned => "remind_unassigned",
            Job::RemindUncompleted => "remind_uncompleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleEntry {
    pub job: Job,
    pub weekdays: Vec<u8>,
    pub hours: Vec<u8>,
    #[serde(default = "default_minutes")]
    pub minutes: Vec<u8>,
}

fn default_minutes() -> Vec<u8> {
    vec![0]
}

impl ScheduleEntry {
    pub fn new(job: Job, weekdays: &[u8], hours: &[u8], minutes: &[u8]) -> Self {
        Self {
            job,
            weekdays: weekdays.to_vec(),
            hours: hours.to_vec(),
            minutes: minutes.to_vec(),
        }
    }

    pub fn to_rule(&self) -> Result<RecurrenceRule, ConfigError> {
        RecurrenceRule::new(
            self.weekdays.iter().copied(),
            self.hours.iter().copied(),
            self.minutes.iter().copied(),
        )
        .map_err(|e| ConfigError::InvalidRule(format!("{}: {}", self.job.name(), e)))
    }
}

/// What fires when. Days follow the Monday = 0 convention.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchedulePolicy {
    pub entries: Vec<ScheduleEntry>,
}

const WORKDAYS: [u8; 5] = [0, 1, 2, 3, 4];

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            entries: vec![
                ScheduleEntry::new(Job::RegenerateTasks, &[0], &[0], &[0]),
                ScheduleEntry::new(Job::AnnounceTasks, &WORKDAYS, &[9], &[0]),
                ScheduleEntry::new(Job::ReportStatistics, &WORKDAYS, &[9], &[30]),
                ScheduleEntry::new(Job::RemindUnassigned, &WORKDAYS, &[12, 15], &[0]),
                ScheduleEntry::new(Job::RemindUncompleted, &WORKDAYS, &[16, 21], &[0]),
            ],
        }
    }
}

impl SchedulePolicy {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let policy: SchedulePolicy = serde_json::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Every entry must convert into a valid rule
    pub fn validate(&self) -> Result<(), ConfigError> {
        for entry in &self.entries {
            entry.to_rule()?;
        }
        Ok(())
    }
}
