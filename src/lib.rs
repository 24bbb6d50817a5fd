pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use self::config::CliConfig;

pub use self::config::{cli::LocalStorage, toml_config::RosterConfig, Settings};
pub use self::core::{engine::MenuAction, engine::RosterEngine, notifier::Notifier};
pub use self::domain::hierarchy::{Campus, Course, Group, Institute};
pub use self::domain::model::Student;
pub use self::utils::error::{CampusError, Result};
