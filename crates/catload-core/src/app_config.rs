use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for an import run, passed explicitly to the admin client
/// and the bulk submitter.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Admin API origin, without a trailing slash (e.g. `http://localhost:5000`).
    pub api_base_url: String,
    pub log_level: String,
    pub manifest_path: PathBuf,
    pub categories_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Log a progress line after every this-many submitted records.
    pub progress_every: usize,
    pub inter_request_delay_ms: u64,
}
