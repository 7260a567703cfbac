pub mod app_config;
pub mod catalogs;
pub mod categories;
pub mod config;
pub mod products;
pub mod row;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalogs::{load_catalogs, CatalogSpec, CatalogsFile, ProfileName, SourceFormat};
pub use categories::{
    load_categories, slugify, CategoriesFile, Category, CategoryRecord, CategorySeed,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{ProductRecord, TextField};
pub use row::{CellValue, RawRow};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    FileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}
