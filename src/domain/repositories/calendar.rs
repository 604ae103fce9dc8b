use crate::domain::value_objects::previous_day_index;

/// Abstract calendar so the lifecycle never reads the wall clock directly.
pub trait Calendar: Send + Sync {
    /// Current day index, Monday = 0
    fn current_day(&self) -> u8;

    fn previous_day(&self) -> u8 {
        previous_day_index(self.current_day())
    }
}
