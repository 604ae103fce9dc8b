use crate::application::services::task_registry::TaskRegistry;
use crate::domain::entities::task::TaskInstance;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    Day(u8),
    All,
}

/// Assigned tasks grouped by assignee id. Unassigned tasks are left out.
pub fn tasks_by_user(registry: &TaskRegistry, filter: DayFilter) -> BTreeMap<u64, Vec<&TaskInstance>> {
    group_by_assignee(filtered(registry, filter), |_| true)
}

/// Same grouping as `tasks_by_user`, restricted to tasks not done yet
pub fn uncompleted_tasks_by_user(
    registry: &TaskRegistry,
    filter: DayFilter,
) -> BTreeMap<u64, Vec<&TaskInstance>> {
    group_by_assignee(filtered(registry, filter), |task| !task.done)
}

/// Open tasks of a single bucket, which may outlive the registry it came from
pub fn uncompleted_in_bucket(bucket: &[TaskInstance]) -> BTreeMap<u64, Vec<&TaskInstance>> {
    group_by_assignee(bucket.iter(), |task| !task.done)
}

fn filtered(registry: &TaskRegistry, filter: DayFilter) -> Box<dyn Iterator<Item = &TaskInstance> + '_> {
    match filter {
        DayFilter::Day(day) => Box::new(registry.get_by_day(day as usize).iter()),
        DayFilter::All => Box::new(registry.iter()),
    }
}

fn group_by_assignee<'a>(
    tasks: impl Iterator<Item = &'a TaskInstance>,
    keep: impl Fn(&TaskInstance) -> bool,
) -> BTreeMap<u64, Vec<&'a TaskInstance>> {
    let mut grouped: BTreeMap<u64, Vec<&TaskInstance>> = BTreeMap::new();
    for task in tasks.filter(|task| keep(task)) {
        if let Some(assignee) = &task.assignee {
            grouped.entry(assignee.id).or_default().push(task);
        }
    }
    grouped
}

/// Partition of one day's bucket. Every task lands in exactly one list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyStatistics<'a> {
    pub completed: Vec<&'a TaskInstance>,
    pub uncompleted: Vec<&'a TaskInstance>,
    pub unassigned: Vec<&'a TaskInstance>,
}

impl DailyStatistics<'_> {
    pub fn total(&self) -> usize {
        self.completed.len() + self.uncompleted.len() + self.unassigned.len()
    }
}

pub fn daily_statistics(bucket: &[TaskInstance]) -> DailyStatistics<'_> {
    let mut stats = DailyStatistics::default();
    for task in bucket {
        match (&task.assignee, task.done) {
            (Some(_), true) => stats.completed.push(task),
            (Some(_), false) => stats.uncompleted.push(task),
            (None, _) => stats.unassigned.push(task),
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::task_lifecycle::{assign, complete};
    use crate::domain::entities::task::TaskTemplate;
    use crate::domain::entities::user::User;

    fn registry() -> TaskRegistry {
        TaskRegistry::generate(
            &[
                TaskTemplate::new(1, "Dishes", "", 2, [1, 3]),
                TaskTemplate::new(2, "Plants", "", 1, [1]),
                TaskTemplate::new(3, "Fridge", "", 3, [1, 4]),
            ],
            1,
        )
        .unwrap()
    }

    #[test]
    fn assigned_task_counts_as_uncompleted() {
        let mut registry = registry();
        assign(registry.get_by_id_mut(1, 1).unwrap(), User::new(7, "u")).unwrap();

        let stats = daily_statistics(registry.get_by_day(1));
        assert_eq!(stats.uncompleted.len(), 1);
        assert_eq!(stats.uncompleted[0].id, 1);
        assert!(stats.completed.iter().all(|task| task.id != 1));
        assert!(stats.unassigned.iter().all(|task| task.id != 1));
    }

    #[test]
    fn partition_is_complete_and_disjoint() {
        let mut registry = registry();
        assign(registry.get_by_id_mut(1, 1).unwrap(), User::new(7, "u")).unwrap();
        assign(registry.get_by_id_mut(3, 1).unwrap(), User::new(8, "v")).unwrap();
        complete(registry.get_by_id_mut(3, 1).unwrap(), 1).unwrap();

        let bucket = registry.get_by_day(1);
        let stats = daily_statistics(bucket);
        assert_eq!(stats.total(), bucket.len());

        let mut ids: Vec<u64> = stats
            .completed
            .iter()
            .chain(&stats.uncompleted)
            .chain(&stats.unassigned)
            .map(|task| task.id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), bucket.len());

        assert_eq!(stats.completed.len(), 1);
        assert_eq!(stats.uncompleted.len(), 1);
        assert_eq!(stats.unassigned.len(), 1);
    }

    #[test]
    fn empty_bucket_has_empty_statistics() {
        let registry = registry();
        assert_eq!(daily_statistics(registry.get_by_day(6)).total(), 0);
    }

    #[test]
    fn groups_by_assignee_and_skips_unassigned() {
        let mut registry = registry();
        assign(registry.get_by_id_mut(1, 1).unwrap(), User::new(7, "u")).unwrap();
        assign(registry.get_by_id_mut(1, 3).unwrap(), User::new(7, "u")).unwrap();
        assign(registry.get_by_id_mut(2, 1).unwrap(), User::new(8, "v")).unwrap();

        let all = tasks_by_user(&registry, DayFilter::All);
        assert_eq!(all.len(), 2);
        assert_eq!(all[&7].len(), 2);
        assert_eq!(all[&8].len(), 1);

        let wednesday = tasks_by_user(&registry, DayFilter::Day(3));
        assert_eq!(wednesday.len(), 1);
        assert_eq!(wednesday[&7][0].day, 3);

        assert!(tasks_by_user(&registry, DayFilter::Day(9)).is_empty());
    }

    #[test]
    fn uncompleted_grouping_drops_done_tasks() {
        let mut registry = registry();
        assign(registry.get_by_id_mut(1, 1).unwrap(), User::new(7, "u")).unwrap();
        assign(registry.get_by_id_mut(2, 1).unwrap(), User::new(7, "u")).unwrap();
        complete(registry.get_by_id_mut(2, 1).unwrap(), 1).unwrap();

        let open = uncompleted_tasks_by_user(&registry, DayFilter::Day(1));
        assert_eq!(open[&7].len(), 1);
        assert_eq!(open[&7][0].id, 1);
    }

    #[test]
    fn bucket_grouping_works_on_a_detached_copy() {
        let mut registry = registry();
        assign(registry.get_by_id_mut(1, 1).unwrap(), User::new(7, "u")).unwrap();
        let copy = registry.get_by_day(1).to_vec();
        drop(registry);

        let open = uncompleted_in_bucket(&copy);
        assert_eq!(open.len(), 1);
        assert_eq!(open[&7][0].title, "Dishes");
    }
}
