use crate::domain::entities::task::TaskTemplate;
use crate::domain::errors::ConfigError;
use crate::domain::repositories::CatalogRepository;
use std::sync::RwLock;

/// In-memory catalog. The templates can be swapped between regenerations.
#[derive(Debug, Default)]
pub struct MemoryCatalogRepository {
    templates: RwLock<Vec<TaskTemplate>>,
}

impl MemoryCatalogRepository {
    pub fn new(templates: Vec<TaskTemplate>) -> Self {
        Self {
            templates: RwLock::new(templates),
        }
    }

    pub fn replace(&self, templates: Vec<TaskTemplate>) {
        if let Ok(mut current) = self.templates.write() {
            *current = templates;
        }
    }
}

impl CatalogRepository for MemoryCatalogRepository {
    fn load_templates(&self) -> Result<Vec<TaskTemplate>, ConfigError> {
        Ok(self
            .templates
            .read()
            .map(|templates| templates.clone())
            .unwrap_or_default())
    }
}
