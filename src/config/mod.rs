//! Application configuration

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, DatabaseSettings, H4aConfig, LogFormat, LoggingConfig, NoticeConfig,
    ServerConfig,
};
