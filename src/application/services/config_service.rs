use crate::application::scheduler::SchedulePolicy;
use crate::domain::errors::ConfigError;
use chrono_tz::Tz;
use std::path::PathBuf;

const DEFAULT_CATALOG_PATH: &str = "data/tasks.json";

/// Runtime settings, read from the environment after `.env` is loaded.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub chores_channel_id: u64,
    pub catalog_path: PathBuf,
    pub timezone: Tz,
    pub schedule: SchedulePolicy,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingEnv("DISCORD_TOKEN"))?;

        let channel = lookup("CHORES_CHANNEL_ID").ok_or(ConfigError::MissingEnv("CHORES_CHANNEL_ID"))?;
        let chores_channel_id = channel
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or(ConfigError::InvalidEnv {
                name: "CHORES_CHANNEL_ID",
                value: channel.clone(),
            })?;

        let catalog_path = lookup("TASK_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

        let timezone = match lookup("BOT_TIMEZONE") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::InvalidTimezone(name.clone()))?,
            None => Tz::UTC,
        };

        let schedule = match lookup("SCHEDULE_PATH") {
            Some(path) => SchedulePolicy::load(&PathBuf::from(path))?,
            None => SchedulePolicy::default(),
        };

        Ok(Self {
            discord_token,
            chores_channel_id,
            catalog_path,
            timezone,
            schedule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let config =
            BotConfig::from_lookup(lookup(&[("DISCORD_TOKEN", "abc"), ("CHORES_CHANNEL_ID", "42")]))
                .unwrap();
        assert_eq!(config.chores_channel_id, 42);
        assert_eq!(config.catalog_path, PathBuf::from("data/tasks.json"));
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.schedule, SchedulePolicy::default());
    }

    #[test]
    fn reads_timezone_and_catalog_path() {
        let config = BotConfig::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "abc"),
            ("CHORES_CHANNEL_ID", "42"),
            ("BOT_TIMEZONE", "Europe/Paris"),
            ("TASK_CATALOG_PATH", "/etc/chores.json"),
        ]))
        .unwrap();
        assert_eq!(config.timezone, chrono_tz::Europe::Paris);
        assert_eq!(config.catalog_path, PathBuf::from("/etc/chores.json"));
    }

    #[test]
    fn missing_or_invalid_values_are_reported() {
        assert!(matches!(
            BotConfig::from_lookup(lookup(&[("CHORES_CHANNEL_ID", "42")])),
            Err(ConfigError::MissingEnv("DISCORD_TOKEN"))
        ));
        assert!(matches!(
            BotConfig::from_lookup(lookup(&[("DISCORD_TOKEN", "abc"), ("CHORES_CHANNEL_ID", "general")])),
            Err(ConfigError::InvalidEnv { name: "CHORES_CHANNEL_ID", .. })
        ));
        assert!(matches!(
            BotConfig::from_lookup(lookup(&[
                ("DISCORD_TOKEN", "abc"),
                ("CHORES_CHANNEL_ID", "42"),
                ("BOT_TIMEZONE", "Mars/Olympus"),
            ])),
            Err(ConfigError::InvalidTimezone(_))
        ));
    }
}
