//! API layer - command-line and terminal entry points.

pub mod cli;
pub mod terminal;

pub use cli::Cli;
pub use terminal::TerminalSession;
