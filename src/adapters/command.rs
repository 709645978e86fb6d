use crate::core::coordinator::{BookingCoordinator, ConfirmOutcome};
use crate::domain::model::{Category, Screen};
use crate::domain::ports::{BookingSink, PresentationPort};
use crate::utils::error::Result;

/// A user event typed at the console or read from a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select { category: Category, option_id: String },
    Confirm,
    Accept,
    Decline,
    Cancel,
    Go(Screen),
    /// Run pending deferred defaults.
    Idle,
    List(Option<Category>),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  list [category]            show options (pickup, dropoff, vehicle, payment)
  select <category> <id>     choose an option
  confirm                    book with the current selection
  accept | decline           answer an open confirmation prompt
  cancel                     discard the current booking
  go <home|booking|messages|history>
  status                     show the current selection
  help | quit";

impl Command {
    pub fn parse(line: &str) -> std::result::Result<Command, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("Empty command".to_string());
        };
        let args: Vec<&str> = words.collect();

        let category = |word: &str| {
            Category::from_key(word).ok_or_else(|| format!("Unknown category '{}'", word))
        };

        match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("select" | "s", [cat, id]) => Ok(Command::Select {
                category: category(*cat)?,
                option_id: id.to_string(),
            }),
            ("select" | "s", _) => Err("Usage: select <category> <id>".to_string()),
            ("confirm" | "book", []) => Ok(Command::Confirm),
            ("accept" | "yes" | "y", []) => Ok(Command::Accept),
            ("decline" | "no" | "n", []) => Ok(Command::Decline),
            ("cancel", []) => Ok(Command::Cancel),
            ("go", [screen]) => Screen::from_key(screen)
                .map(Command::Go)
                .ok_or_else(|| format!("Unknown screen '{}'", screen)),
            ("go", _) => Err("Usage: go <screen>".to_string()),
            ("idle", []) => Ok(Command::Idle),
            ("list" | "ls", []) => Ok(Command::List(None)),
            ("list" | "ls", [cat]) => Ok(Command::List(Some(category(*cat)?))),
            ("status", []) => Ok(Command::Status),
            ("help" | "?", []) => Ok(Command::Help),
            ("quit" | "exit" | "q", []) => Ok(Command::Quit),
            (other, _) => Err(format!("Unknown command '{}'", other)),
        }
    }

    /// Whether the command drives the booking flow, as opposed to only
    /// reading or leaving it.
    pub fn is_flow_event(&self) -> bool {
        !matches!(
            self,
            Command::List(_) | Command::Status | Command::Help | Command::Quit
        )
    }
}

/// Feed a flow command to the coordinator. Read-only commands are a no-op
/// here; the caller renders them.
pub fn execute<P, S>(
    coordinator: &mut BookingCoordinator<P, S>,
    command: &Command,
) -> Result<Option<ConfirmOutcome>>
where
    P: PresentationPort,
    S: BookingSink,
{
    match command {
        Command::Select {
            category,
            option_id,
        } => coordinator.select_option(*category, option_id).map(|_| None),
        Command::Confirm => coordinator.request_confirm().map(Some),
        Command::Accept => coordinator
            .on_confirm_accepted()
            .map(|receipt| Some(ConfirmOutcome::Booked(receipt))),
        Command::Decline => coordinator
            .on_confirm_declined()
            .map(|_| Some(ConfirmOutcome::Declined)),
        Command::Cancel => coordinator.cancel().map(|_| None),
        Command::Go(screen) => coordinator.navigate_to(*screen).map(|_| None),
        Command::Idle => {
            coordinator.apply_deferred();
            Ok(None)
        }
        Command::List(_) | Command::Status | Command::Help | Command::Quit => Ok(None),
    }
}
