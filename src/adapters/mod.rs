// Adapters layer: concrete implementations of the domain ports, plus the
// command language both binaries speak.

pub mod command;
pub mod console;
pub mod recording;

pub use command::Command;
pub use console::{ConsolePresenter, LogSink};
pub use recording::{MemorySink, PresentationEvent, RecordingPresenter};
