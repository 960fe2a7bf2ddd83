mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseProviderSetting, DatabaseSettings, LoggingSettings, ProcessingSettings,
    ServerSettings, Settings, StorageProviderSetting, StorageSettings, WebhookSettings,
};
