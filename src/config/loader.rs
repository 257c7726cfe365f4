//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the work
//! schedule from a JSON or YAML file.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::types::{ScheduleConfig, ScheduleFile};

/// Default schedule file name, shared with the schedule editor.
pub const DEFAULT_CONFIG_FILE: &str = "work_schedule_config.json";

/// Serialization format of a schedule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON, as written by the schedule editor.
    Json,
    /// YAML.
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from the file extension; anything other than
    /// `.yaml`/`.yml` is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Loads and provides access to the work schedule.
///
/// The schedule is loaded once at startup and is read-only afterwards.
///
/// # Example
///
/// ```no_run
/// use work_hours::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./work_schedule_config.json").unwrap();
/// println!("Standard shift: {}", loader.schedule().standard_shift());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    schedule: ScheduleConfig,
}

impl ConfigLoader {
    /// Loads the schedule from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file does not exist or cannot be read (`ConfigNotFound`)
    /// - The file is not valid JSON/YAML or misses a field (`ConfigParseError`)
    /// - A time or interval is malformed (`InvalidTime` / `InvalidInterval`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::parse(&content, ConfigFormat::from_path(path), &path_str)?;

        let schedule = loader.schedule();
        info!(
            path = %path_str,
            standard_shift = %schedule.standard_shift(),
            lunch_break = %schedule.lunch_break(),
            rest_periods = schedule.rest_periods().len(),
            "Loaded work schedule"
        );

        Ok(loader)
    }

    /// Parses schedule text in the given format.
    ///
    /// `origin` names the source in error messages.
    pub fn parse(content: &str, format: ConfigFormat, origin: &str) -> EngineResult<Self> {
        let parse_error = |message: String| EngineError::ConfigParseError {
            path: origin.to_string(),
            message,
        };

        let file: ScheduleFile = match format {
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
        };

        let schedule = ScheduleConfig::try_from(file)?;

        // Overlaps are accepted; only the first matching window snaps a boundary.
        for (first, second) in schedule.overlapping_rest_pairs() {
            warn!(
                origin = %origin,
                first = %first,
                second = %second,
                "Rest intervals overlap; the first one takes precedence"
            );
        }

        Ok(Self { schedule })
    }

    /// Wraps an already-built schedule.
    pub fn from_schedule(schedule: ScheduleConfig) -> Self {
        Self { schedule }
    }

    /// Returns the loaded schedule.
    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    /// Writes a schedule file in the format implied by `path`.
    pub fn save<P: AsRef<Path>>(schedule: &ScheduleConfig, path: P) -> EngineResult<()> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        let file = ScheduleFile::from(schedule);

        let write_error = |message: String| EngineError::ConfigWriteError {
            path: path_str.clone(),
            message,
        };

        let content = match ConfigFormat::from_path(path) {
            ConfigFormat::Json => {
                serde_json::to_string_pretty(&file).map_err(|e| write_error(e.to_string()))?
            }
            ConfigFormat::Yaml => {
                serde_yaml::to_string(&file).map_err(|e| write_error(e.to_string()))?
            }
        };

        fs::write(path, content).map_err(|e| write_error(e.to_string()))?;
        info!(path = %path_str, "Wrote work schedule");
        Ok(())
    }

    /// Writes the default schedule to `path`.
    pub fn write_default<P: AsRef<Path>>(path: P) -> EngineResult<ScheduleConfig> {
        let schedule = ScheduleConfig::default();
        Self::save(&schedule, path)?;
        Ok(schedule)
    }
}
