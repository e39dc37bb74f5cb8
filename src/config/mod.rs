pub mod logging;
pub mod secrets;
pub mod settings;

pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use secrets::{SecretError, SecretManager};
pub use settings::{BrevoSettings, Settings};
