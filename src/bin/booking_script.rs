use clap::Parser;
use ride_booking::adapters::command;
use ride_booking::adapters::{MemorySink, RecordingPresenter};
use ride_booking::config::{CatalogConfig, ScriptConfig};
use ride_booking::utils::{logger, validation::Validate};
use ride_booking::BookingCoordinator;
use serde_json::json;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "booking-script")]
#[command(about = "Replay a scripted booking session and print what the UI was asked to show")]
struct Args {
    /// Path to the script TOML file
    #[arg(short, long, default_value = "scripts/book-moto.toml")]
    script: String,

    /// Override the catalog named by the script
    #[arg(long)]
    catalog: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Exit non-zero when any step is rejected
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_logger(args.verbose, args.log_json);

    tracing::info!("📁 Loading script from: {}", args.script);

    let script = match ScriptConfig::from_file(&args.script) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("❌ Failed to load script '{}': {}", args.script, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = script.validate() {
        tracing::error!("❌ Script validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let catalog_path = args.catalog.clone().or_else(|| script.script.catalog.clone());
    let catalog_config = match &catalog_path {
        Some(path) => CatalogConfig::from_file(path)?,
        None => CatalogConfig::builtin()?,
    };
    catalog_config.validate()?;
    let catalog = Arc::new(catalog_config.to_catalog()?);
    let policy = catalog_config.policy()?;

    tracing::info!(
        "🚀 Running '{}' ({} steps)",
        script.script.name,
        script.steps.len()
    );

    let presenter = RecordingPresenter::answering(script.responses()?);
    let mut coordinator =
        BookingCoordinator::with_policy(catalog, policy, presenter, MemorySink::new());
    coordinator.render();

    let mut rejected = Vec::new();
    for (i, command) in script.commands()?.iter().enumerate() {
        tracing::debug!("Step {}: {:?}", i, command);
        if let Err(e) = command::execute(&mut coordinator, command) {
            tracing::warn!("Step {} rejected: {}", i, e);
            rejected.push(json!({ "step": i, "command": script.steps[i], "error": e.to_string() }));
        }
    }

    let final_state = coordinator.flow_state();
    let final_snapshot = coordinator.snapshot();
    let (presenter, sink) = coordinator.into_parts();

    let report = json!({
        "script": script.script.name,
        "events": presenter.events(),
        "rejected": rejected,
        "receipts": sink.receipts(),
        "final_state": final_state,
        "final_snapshot": final_snapshot,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if args.strict && !rejected.is_empty() {
        tracing::error!("❌ {} step(s) rejected", rejected.len());
        std::process::exit(2);
    }

    tracing::info!("✅ Script finished in state {}", final_state);
    Ok(())
}
