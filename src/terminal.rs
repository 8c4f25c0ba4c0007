use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::terminal;
use crossterm::ExecutableCommand;

/// Holds the terminal in raw, no-echo mode with the cursor hidden. The
/// previous mode comes back on [`RawModeGuard::release`], or when the guard
/// drops on any other exit path.
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self { active: true };
        io::stdout().execute(Hide)?;
        Ok(guard)
    }

    /// Restores the terminal and reports whether that worked.
    pub fn release(mut self) -> io::Result<()> {
        self.active = false;
        restore()
    }
}

fn restore() -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = restore() {
                tracing::error!(error = %e, "unable to restore terminal mode");
            }
        }
    }
}
