use crate::domain::entities::task::TaskTemplate;
use crate::domain::errors::ConfigError;

/// Source of the static chore catalog. Read again on every weekly regeneration.
pub trait CatalogRepository: Send + Sync {
    fn load_templates(&self) -> Result<Vec<TaskTemplate>, ConfigError>;
}
