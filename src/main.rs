use clap::Parser;
use ride_booking::adapters::command::{self, Command, HELP};
use ride_booking::adapters::{ConsolePresenter, LogSink};
use ride_booking::utils::error::{BookingError, ErrorSeverity};
use ride_booking::utils::{logger, validation::Validate};
use ride_booking::{BookingCoordinator, Category, CliConfig, ConfirmOutcome, FlowState, Screen};
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::sync::Arc;

type Console = ConsolePresenter<StdinLock<'static>, Stdout>;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("🚀 Starting ride-booking console");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let catalog_config = match config.load_catalog() {
        Ok(catalog_config) => catalog_config,
        Err(e) => fail(&e),
    };
    let catalog = match catalog_config.to_catalog() {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => fail(&e),
    };
    let policy = catalog_config.policy()?;
    tracing::info!("✅ Catalog loaded, required: {:?}", policy.required);

    let presenter = ConsolePresenter::new(Arc::clone(&catalog), io::stdin().lock(), io::stdout())
        .with_json(config.json);
    let mut coordinator = BookingCoordinator::with_policy(catalog, policy, presenter, LogSink);

    println!("{}", HELP);
    coordinator.render();
    coordinator.apply_deferred();

    run(&mut coordinator, config.json)?;

    tracing::info!("👋 Console closed");
    Ok(())
}

fn run(coordinator: &mut BookingCoordinator<Console, LogSink>, json: bool) -> anyhow::Result<()> {
    loop {
        print!("{}> ", coordinator.current_screen());
        io::stdout().flush()?;

        let mut line = String::new();
        if coordinator.presenter_mut().input().read_line(&mut line)? == 0 {
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match &command {
            Command::Quit => return Ok(()),
            Command::Help => println!("{}", HELP),
            Command::List(category) => list(coordinator, *category),
            Command::Status => status(coordinator, json)?,
            _ if command.is_flow_event() => match command::execute(coordinator, &command) {
                Ok(Some(ConfirmOutcome::Booked(receipt))) => {
                    println!("Receipt {}", receipt.receipt_id);
                }
                Ok(Some(ConfirmOutcome::AwaitingAnswer)) => {
                    println!("Answer with 'accept' or 'decline'.");
                }
                Ok(_) => {
                    if command == Command::Go(Screen::Booking) {
                        coordinator.apply_deferred();
                    }
                }
                // rejected events leave the flow untouched
                Err(e) => println!("{}", e.user_friendly_message()),
            },
            _ => {}
        }
    }
}

fn list(coordinator: &mut BookingCoordinator<Console, LogSink>, category: Option<Category>) {
    let categories = match category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };
    for category in categories {
        let highlighted = coordinator.current(category).map(str::to_string);
        coordinator
            .presenter_mut()
            .print_options(category, highlighted.as_deref());
    }
}

fn status(coordinator: &BookingCoordinator<Console, LogSink>, json: bool) -> anyhow::Result<()> {
    let snapshot = coordinator.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", snapshot);
    }

    match coordinator.flow_state() {
        FlowState::ReadyToConfirm => println!("Ready to book."),
        FlowState::Confirming => println!("Waiting for your answer."),
        _ => {
            let missing = coordinator.booking().missing();
            if !missing.is_empty() {
                let names: Vec<String> = missing.iter().map(|c| c.to_string()).collect();
                println!("Still needed: {}", names.join(", "));
            }
        }
    }
    Ok(())
}

fn fail(e: &BookingError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
