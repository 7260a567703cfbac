mod categories;
mod import;
mod normalize;
mod plans;

use std::path::PathBuf;

use catload_core::{ProfileName, SourceFormat};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::categories::CategoriesCommands;

#[derive(Debug, Parser)]
#[command(name = "catload")]
#[command(about = "Normalize product catalogs and import them into the storefront admin API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import every catalog listed in the manifest
    Import {
        /// Restrict the import to one catalog (by manifest name)
        #[arg(long)]
        catalog: Option<String>,

        /// Print normalized records as JSON instead of submitting them
        #[arg(long)]
        dry_run: bool,
    },
    /// Import a platform-plans JSON document, one subcategory per platform
    ImportPlans {
        /// Path to the platform-plans document
        file: PathBuf,

        /// Slug of the parent category the platform subcategories go under
        #[arg(long, default_value = "ott-subscriptions")]
        parent_slug: String,

        /// Substring used to find an existing parent category with a different slug
        #[arg(long, default_value = "ott")]
        parent_hint: String,
    },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Print normalized records for one source file without submitting them
    Normalize {
        /// Source file to read
        file: PathBuf,

        /// Mapping profile: ott-sheet, plan-sheet, ott-plans or canonical
        #[arg(long)]
        profile: ProfileName,

        /// Category slug written to every record
        #[arg(long)]
        category: String,

        /// Source format: csv, json-rows or platform-plans (default: by extension)
        #[arg(long)]
        format: Option<SourceFormat>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = catload_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, api = %config.api_base_url, "configuration loaded");

    match cli.command {
        Some(Commands::Import { catalog, dry_run }) => {
            import::run_import(&config, catalog.as_deref(), dry_run).await?;
        }
        Some(Commands::ImportPlans {
            file,
            parent_slug,
            parent_hint,
        }) => {
            plans::run_import_plans(&config, &file, &parent_slug, &parent_hint).await?;
        }
        Some(Commands::Categories { command }) => match command {
            CategoriesCommands::Seed { file } => {
                let path = file.unwrap_or_else(|| config.categories_path.clone());
                categories::run_seed(&config, &path).await?;
            }
            CategoriesCommands::List => categories::run_list(&config).await?,
        },
        Some(Commands::Normalize {
            file,
            profile,
            category,
            format,
        }) => normalize::run_normalize(&file, profile, &category, format)?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
