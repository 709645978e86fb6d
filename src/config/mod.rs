#[cfg(feature = "cli")]
pub mod cli;
pub mod script_config;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use script_config::ScriptConfig;
pub use toml_config::CatalogConfig;
