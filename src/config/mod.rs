pub mod environment;
pub mod hooks;
pub mod log;
pub mod migrations;
pub mod settings;

pub use environment::EnvironmentConfig;
pub use hooks::HooksConfig;
pub use log::LogConfig;
pub use migrations::MigrationsConfig;
pub use settings::Settings;
