use crate::domain::entities::task::{TaskInstance, TaskTemplate};
use crate::domain::errors::ConfigError;
use crate::domain::value_objects::DAYS_PER_WEEK;
use std::collections::HashSet;

/// Weekly task table: one bucket of task instances per weekday.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    buckets: [Vec<TaskInstance>; DAYS_PER_WEEK],
    generation: u64,
}

impl TaskRegistry {
    /// Instantiates every template on each day it recurs on.
    ///
    /// The whole catalog is validated before anything is built, so a malformed
    /// template never yields a partial registry.
    pub fn generate(catalog: &[TaskTemplate], generation: u64) -> Result<Self, ConfigError> {
        let mut seen_ids = HashSet::new();
        for template in catalog {
            template.validate()?;
            if !seen_ids.insert(template.id) {
                return Err(ConfigError::DuplicateId(template.id));
            }
        }

        let mut buckets: [Vec<TaskInstance>; DAYS_PER_WEEK] = Default::default();
        for template in catalog {
            for &day in &template.days {
                buckets[day as usize].push(template.instantiate(day));
            }
        }

        Ok(Self {
            buckets,
            generation,
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tasks scheduled for `day`; empty for days outside the week
    pub fn get_by_day(&self, day: usize) -> &[TaskInstance] {
        self.buckets.get(day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_by_id(&self, id: u64, day: u8) -> Option<&TaskInstance> {
        self.buckets
            .get(day as usize)?
            .iter()
            .find(|task| task.id == id)
    }

    pub fn get_by_id_mut(&mut self, id: u64, day: u8) -> Option<&mut TaskInstance> {
        self.buckets
            .get_mut(day as usize)?
            .iter_mut()
            .find(|task| task.id == id)
    }

    /// All instances, Monday first
    pub fn iter(&self) -> impl Iterator<Item = &TaskInstance> {
        self.buckets.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}
