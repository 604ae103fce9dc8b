use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::domain::entities::task::TaskTemplate;
use crate::domain::errors::ConfigError;
use crate::domain::repositories::CatalogRepository;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    tasks: Vec<TaskRecord>,
}

#[derive(Debug, Deserialize)]
struct TaskRecord {
    id: Option<u64>,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(alias = "tacoCount", alias = "taco_count")]
    tacos: u32,
    days: Vec<u8>,
}

/// Parses `{"tasks": [...]}`. Records without an id get one after the highest explicit id.
pub fn parse_catalog(content: &str) -> Result<Vec<TaskTemplate>, ConfigError> {
    let file: CatalogFile = serde_json::from_str(content)?;

    let mut last_id = file
        .tasks
        .iter()
        .filter_map(|record| record.id)
        .max()
        .unwrap_or(0);

    let mut templates = Vec::with_capacity(file.tasks.len());
    for record in file.tasks {
        let id = match record.id {
            Some(id) => id,
            None => {
                last_id = last_id.checked_add(1).ok_or_else(|| ConfigError::IdsExhausted {
                    title: record.title.clone(),
                })?;
                last_id
            }
        };
        templates.push(TaskTemplate::new(
            id,
            record.title,
            record.description,
            record.tacos,
            record.days,
        ));
    }

    for template in &templates {
        template.validate()?;
    }

    Ok(templates)
}

/// Catalog read from a JSON file on every load, so edits land at the next regeneration
pub struct JsonCatalogRepository {
    file_path: PathBuf,
}

impl JsonCatalogRepository {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

impl CatalogRepository for JsonCatalogRepository {
    fn load_templates(&self) -> Result<Vec<TaskTemplate>, ConfigError> {
        let content = fs::read_to_string(&self.file_path).map_err(|source| ConfigError::Io {
            path: self.file_path.clone(),
            source,
        })?;
        parse_catalog(&content)
    }
}

impl std::fmt::Debug for JsonCatalogRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCatalogRepository")
            .field("file_path", &self.file_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_and_synthesizes_missing_ids() {
        let json = r#"{
            "tasks": [
                { "id": 4, "title": "Dishes", "description": "Empty the dishwasher", "tacos": 2, "days": [1, 3] },
                { "title": "Plants", "tacoCount": 1, "days": [0] },
                { "title": "Fridge", "tacos": 3, "days": [4] }
            ]
        }"#;
        let templates = parse_catalog(json).unwrap();
        let ids: Vec<u64> = templates.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 5, 6]);
        assert_eq!(templates[1].tacos, 1);
        assert_eq!(templates[1].description, "");
        assert!(templates[0].days.contains(&3));
    }

    #[test]
    fn highest_possible_id_leaves_no_room_for_synthesized_ones() {
        let json = r#"{
            "tasks": [
                { "id": 18446744073709551615, "title": "Dishes", "tacos": 2, "days": [1] },
                { "title": "Plants", "tacos": 1, "days": [0] }
            ]
        }"#;
        assert!(matches!(
            parse_catalog(json),
            Err(ConfigError::IdsExhausted { title }) if title == "Plants"
        ));

        // explicit ids alone are fine
        let json = r#"{ "tasks": [ { "id": 18446744073709551615, "title": "Dishes", "tacos": 2, "days": [1] } ] }"#;
        assert_eq!(parse_catalog(json).unwrap()[0].id, u64::MAX);
    }

    #[test]
    fn shipped_catalog_builds_a_registry() {
        let templates = parse_catalog(include_str!("../../../data/tasks.json")).unwrap();
        let registry =
            crate::application::services::task_registry::TaskRegistry::generate(&templates, 1).unwrap();
        assert_eq!(templates.len(), 5);
        assert!(registry.get_by_day(5).is_empty());
        assert!(!registry.get_by_day(0).is_empty());
    }

    #[test]
    fn missing_required_field_is_a_config_error() {
        let json = r#"{ "tasks": [ { "id": 1, "title": "Dishes", "days": [1] } ] }"#;
        assert!(matches!(parse_catalog(json), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn day_out_of_range_is_a_config_error() {
        let json = r#"{ "tasks": [ { "id": 1, "title": "Dishes", "tacos": 2, "days": [7] } ] }"#;
        assert!(matches!(
            parse_catalog(json),
            Err(ConfigError::InvalidDay { day: 7, .. })
        ));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let repo = JsonCatalogRepository::new("does/not/exist.json");
        match repo.load_templates() {
            Err(ConfigError::Io { path, .. }) => assert_eq!(path, PathBuf::from("does/not/exist.json")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
