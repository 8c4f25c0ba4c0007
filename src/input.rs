use std::collections::VecDeque;
use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread;

use crate::components::Direction;

const ESC: u8 = 0x1b;
const READ_BUF: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Quit,
}

/// Turns one raw terminal read into a command. Unknown keys decode to `None`.
pub fn decode(bytes: &[u8]) -> Option<Command> {
    match bytes {
        [ESC] => Some(Command::Quit),
        [ESC, b'[', key, ..] => match key {
            b'A' => Some(Command::Move(Direction::Up)),
            b'B' => Some(Command::Move(Direction::Down)),
            b'C' => Some(Command::Move(Direction::Right)),
            b'D' => Some(Command::Move(Direction::Left)),
            _ => None,
        },
        _ => None,
    }
}

/// Where the game loop pulls player commands from, one per tick at most.
/// Must never block.
pub trait InputSource {
    fn try_next(&mut self) -> Option<Command>;
}

impl InputSource for Receiver<Command> {
    fn try_next(&mut self) -> Option<Command> {
        match self.try_recv() {
            Ok(command) => Some(command),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Command::Quit),
        }
    }
}

/// A fixed list of per-tick inputs; `None` entries are idle ticks.
impl InputSource for VecDeque<Option<Command>> {
    fn try_next(&mut self) -> Option<Command> {
        self.pop_front().flatten()
    }
}

/// Starts the reader thread and hands back the single-slot channel it feeds.
/// The thread is never joined; it ends when the reader fails or the
/// receiving side goes away.
pub fn spawn_reader<R>(reader: R) -> io::Result<Receiver<Command>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(1);
    thread::Builder::new()
        .name("input".into())
        .spawn(move || read_loop(reader, tx))?;
    Ok(rx)
}

fn read_loop<R: Read>(mut reader: R, tx: SyncSender<Command>) {
    let mut buffer = [0u8; READ_BUF];
    loop {
        let command = match reader.read(&mut buffer) {
            Ok(0) => {
                tracing::warn!("input stream closed, quitting");
                Command::Quit
            }
            Ok(n) => match decode(&buffer[..n]) {
                Some(command) => command,
                None => {
                    tracing::trace!(bytes = ?&buffer[..n], "ignored input");
                    continue;
                }
            },
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "error reading input, quitting");
                Command::Quit
            }
        };
        if tx.send(command).is_err() || command == Command::Quit {
            return;
        }
    }
}
