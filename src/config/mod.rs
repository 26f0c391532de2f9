pub mod settings;

pub use settings::{AppConfig, PagingSettings, PollingSettings};
