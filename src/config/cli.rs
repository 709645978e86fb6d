use crate::config::toml_config::CatalogConfig;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ride-booking")]
#[command(about = "Interactive console for the ride-booking selection flow")]
pub struct CliConfig {
    /// Catalog TOML file; the built-in catalog is used when omitted
    #[arg(short, long)]
    pub catalog: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Print snapshots as JSON instead of text")]
    pub json: bool,
}

impl CliConfig {
    /// Load and validate the catalog the flags point at.
    pub fn load_catalog(&self) -> Result<CatalogConfig> {
        let config = match &self.catalog {
            Some(path) => CatalogConfig::from_file(path)?,
            None => CatalogConfig::builtin()?,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.catalog {
            validation::validate_path("catalog", path)?;
        }
        Ok(())
    }
}
