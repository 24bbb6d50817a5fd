pub mod engine;
pub mod notifier;
pub mod queries;
pub mod report;
pub mod seed;

pub use crate::domain::ports::{ConfigProvider, ExportFormat, Storage};
pub use crate::utils::error::Result;
