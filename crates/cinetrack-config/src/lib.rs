pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{CatalogConfig, Config, StorageConfig, DEFAULT_NAMESPACE};
pub use credentials::{CredentialStore, API_KEY_ENV_VAR};
pub use paths::{PathManager, base_path_override};
