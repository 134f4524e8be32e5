// Terminal console - the face of OndaTV
// Single-key commands over an async event stream; the station narrates
// itself through plain stdout lines instead of a full TUI

mod app;

pub use app::App;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::Write;

/// Raw mode on creation, restored on drop - even when the run loop bails
/// out with an error.
pub struct ConsoleGuard;

impl ConsoleGuard {
    pub fn new() -> Result<Self> {
        // Ensure clean terminal state first
        let _ = disable_raw_mode();
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for ConsoleGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Print helper for raw mode - explicit carriage return keeps lines
/// aligned while key echo is off.
pub fn emit(line: &str) {
    print!("{}\r\n", line);
    let _ = std::io::stdout().flush();
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    TogglePlayPause,
    ToggleLive,
    NextItem,
    ShowGrid,
    ShowUpcoming,
    ShowLibrary,
    CycleLibraryFilter,
    ShowSponsors,
    ShowIngest,
    ShowAccount,
    Login,
    Logout,
    ToggleFavorite,
    ToggleTheme,
    EnableNotifications,
    Help,
}

pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(' ') => Some(Command::TogglePlayPause),
        KeyCode::Char('l') => Some(Command::ToggleLive),
        KeyCode::Char('n') => Some(Command::NextItem),
        KeyCode::Char('g') => Some(Command::ShowGrid),
        KeyCode::Char('u') => Some(Command::ShowUpcoming),
        KeyCode::Char('v') => Some(Command::ShowLibrary),
        KeyCode::Char('c') => Some(Command::CycleLibraryFilter),
        KeyCode::Char('s') => Some(Command::ShowSponsors),
        KeyCode::Char('r') => Some(Command::ShowIngest),
        KeyCode::Char('a') => Some(Command::ShowAccount),
        KeyCode::Char('i') => Some(Command::Login),
        KeyCode::Char('o') => Some(Command::Logout),
        KeyCode::Char('f') => Some(Command::ToggleFavorite),
        KeyCode::Char('t') => Some(Command::ToggleTheme),
        KeyCode::Char('b') => Some(Command::EnableNotifications),
        KeyCode::Char('h') | KeyCode::Char('?') => Some(Command::Help),
        _ => None,
    }
}
