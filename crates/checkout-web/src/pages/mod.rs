//! Page Components

mod terminal;

pub use terminal::TerminalPage;
