//! Generator configuration.
//!
//! Every field has a default, so an empty JSON object is a complete
//! configuration: Monday–Friday workdays, two random lecture days, the
//! seven standard slots, a daily ceiling of four lessons per subgroup, and
//! an entropy-seeded random source.

use std::collections::HashSet;
use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};
use crate::models::{default_time_slots, TimeSlot, WORK_DAYS};

fn default_work_days() -> Vec<Weekday> {
    WORK_DAYS.to_vec()
}

const fn default_lecture_day_count() -> usize {
    2
}

const fn default_max_daily_lessons() -> u32 {
    4
}

/// Tunable parameters of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Weekdays on which lessons may be held.
    #[serde(default = "default_work_days")]
    pub work_days: Vec<Weekday>,

    /// How many workdays are drawn as lecture days.
    #[serde(default = "default_lecture_day_count")]
    pub lecture_day_count: usize,

    /// Fixed lecture days. When set, no random draw takes place.
    #[serde(default)]
    pub lecture_days: Option<Vec<Weekday>>,

    /// Ordered daily time slots.
    #[serde(default = "default_time_slots")]
    pub time_slots: Vec<TimeSlot>,

    /// Maximum lessons per subgroup per date.
    #[serde(default = "default_max_daily_lessons")]
    pub max_daily_lessons: u32,

    /// Seed for the random source. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            work_days: default_work_days(),
            lecture_day_count: default_lecture_day_count(),
            lecture_days: None,
            time_slots: default_time_slots(),
            max_daily_lessons: default_max_daily_lessons(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Loads and validates a configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TimetableError::config_parse(path, format!("cannot read file: {e}"))
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| TimetableError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fixes the lecture days.
    pub fn with_lecture_days(mut self, days: Vec<Weekday>) -> Self {
        self.lecture_days = Some(days);
        self
    }

    /// Replaces the daily time slots.
    pub fn with_time_slots(mut self, slots: Vec<TimeSlot>) -> Self {
        self.time_slots = slots;
        self
    }

    /// Sets the per-subgroup daily ceiling.
    pub fn with_max_daily_lessons(mut self, max: u32) -> Self {
        self.max_daily_lessons = max;
        self
    }

    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.work_days.is_empty() {
            return Err(TimetableError::config_validation(
                "workDays is empty",
                "List at least one weekday, e.g. [\"Mon\", \"Tue\"]",
            ));
        }

        let unique: HashSet<Weekday> = self.work_days.iter().copied().collect();
        if unique.len() != self.work_days.len() {
            return Err(TimetableError::config_validation(
                "workDays contains duplicates",
                "List each weekday once",
            ));
        }

        if self.lecture_day_count > self.work_days.len() {
            return Err(TimetableError::config_validation(
                format!(
                    "lectureDayCount is {} but only {} workdays are configured",
                    self.lecture_day_count,
                    self.work_days.len()
                ),
                "Lower lectureDayCount or add workdays",
            ));
        }

        if let Some(days) = &self.lecture_days {
            if let Some(day) = days.iter().find(|d| !unique.contains(*d)) {
                return Err(TimetableError::config_validation(
                    format!("lecture day {day} is not a workday"),
                    "Choose lectureDays from workDays",
                ));
            }
        }

        if self.time_slots.is_empty() {
            return Err(TimetableError::config_validation(
                "timeSlots is empty",
                "Define at least one slot or omit the field for the standard seven",
            ));
        }

        if let Some(slot) = self.time_slots.iter().find(|s| s.end <= s.start) {
            return Err(TimetableError::config_validation(
                format!("slot starting {} does not end after it starts", slot.start),
                "Make every slot end after its start",
            ));
        }

        if self
            .time_slots
            .windows(2)
            .any(|w| w[1].start < w[0].end)
        {
            return Err(TimetableError::config_validation(
                "timeSlots overlap or are out of order",
                "List slots in chronological order without overlap",
            ));
        }

        if self.max_daily_lessons == 0 {
            return Err(TimetableError::config_validation(
                "maxDailyLessons is 0",
                "Allow at least one lesson per day",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.work_days.len(), 5);
        assert_eq!(config.lecture_day_count, 2);
        assert_eq!(config.time_slots.len(), 7);
        assert_eq!(config.max_daily_lessons, 4);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: GeneratorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "workDays": ["Mon", "Tue", "Wed"],
            "lectureDays": ["Wed"],
            "timeSlots": [{"start": "09:00:00", "end": "10:20:00"}],
            "seed": 42
        }"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.work_days, vec![Weekday::Mon, Weekday::Tue, Weekday::Wed]);
        assert_eq!(config.lecture_days, Some(vec![Weekday::Wed]));
        assert_eq!(config.time_slots.len(), 1);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_daily_lessons, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GeneratorConfig::default();
        config.lecture_day_count = 6;
        assert!(config.validate().is_err());

        let config = GeneratorConfig::default().with_lecture_days(vec![Weekday::Sun]);
        assert!(config.validate().is_err());

        let config = GeneratorConfig::default().with_time_slots(Vec::new());
        assert!(config.validate().is_err());

        let overlapping = vec![
            TimeSlot::from_hm(9, 0, 10, 20).unwrap(),
            TimeSlot::from_hm(10, 0, 11, 0).unwrap(),
        ];
        let config = GeneratorConfig::default().with_time_slots(overlapping);
        assert!(config.validate().is_err());

        let inverted = vec![TimeSlot::from_hm(11, 0, 10, 0).unwrap()];
        let config = GeneratorConfig::default().with_time_slots(inverted);
        assert!(config.validate().is_err());

        let config = GeneratorConfig::default().with_max_daily_lessons(0);
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.work_days = vec![Weekday::Mon, Weekday::Mon];
        assert!(config.validate().is_err());

        config.work_days.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("u_timetable_config_valid.json");
        std::fs::write(&path, r#"{"maxDailyLessons": 3, "seed": 7}"#).unwrap();
        let config = GeneratorConfig::load_from_file(&path).unwrap();
        assert_eq!(config.max_daily_lessons, 3);
        assert_eq!(config.seed, Some(7));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_invalid_json() {
        let path = std::env::temp_dir().join("u_timetable_config_invalid.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = GeneratorConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, TimetableError::ConfigParse { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("u_timetable_config_missing.json");
        assert!(GeneratorConfig::load_from_file(&path).is_err());
    }
}
