//! Configuration loading and management for the Work Hours Engine.
//!
//! This module provides functionality to load the work schedule (standard
//! shift, lunch break and rest periods) from a JSON or YAML file.
//!
//! # Example
//!
//! ```no_run
//! use work_hours::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./work_schedule_config.json").unwrap();
//! println!("Lunch break: {}", config.schedule().lunch_break());
//! ```

mod loader;
mod types;

pub use loader::{ConfigFormat, ConfigLoader, DEFAULT_CONFIG_FILE};
pub use types::{ScheduleConfig, ScheduleFile};
