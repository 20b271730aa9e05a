// src/spawner/console.rs

//! Where the worker's console lives.
//!
//! Giving the worker (and thus every command it runs) a dedicated, visible
//! console window is a platform capability, kept out of the channel
//! protocol. On Windows the worker is created with `CREATE_NEW_CONSOLE`
//! and writes to that window through `CONOUT$`; elsewhere it shares the
//! host terminal.

use std::fmt::Debug;
use std::fs::File;
use std::io::{self, Write};
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;

use crate::exec::OutputTarget;

/// How the worker's stderr handle is wired when it is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStderr {
    /// Shares the host's stderr.
    Inherit,
    /// Detached; the worker writes to its own console instead.
    Null,
}

impl From<WorkerStderr> for Stdio {
    fn from(stderr: WorkerStderr) -> Self {
        match stderr {
            WorkerStderr::Inherit => Stdio::inherit(),
            WorkerStderr::Null => Stdio::null(),
        }
    }
}

pub trait ConsoleHost: Send + Sync + Debug {
    /// Adjust the worker's command line before it is spawned.
    fn prepare(&self, command: &mut Command);

    fn worker_stderr(&self) -> WorkerStderr {
        WorkerStderr::Inherit
    }
}

/// Worker shares the host's console.
#[derive(Debug, Clone, Copy, Default)]
pub struct InheritConsole;

impl ConsoleHost for InheritConsole {
    fn prepare(&self, _command: &mut Command) {}
}

/// Worker gets its own console window where the platform supports it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewConsoleWindow;

#[cfg(windows)]
const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;

impl ConsoleHost for NewConsoleWindow {
    #[cfg(windows)]
    fn prepare(&self, command: &mut Command) {
        command.creation_flags(CREATE_NEW_CONSOLE);
    }

    #[cfg(not(windows))]
    fn prepare(&self, _command: &mut Command) {
        tracing::debug!("separate console windows are only available on Windows; worker shares this terminal");
    }

    // An inherited stderr handle would keep pointing at the host terminal
    // and leave the new window empty.
    #[cfg(windows)]
    fn worker_stderr(&self) -> WorkerStderr {
        WorkerStderr::Null
    }
}

/// The worker's side of the console: where its status lines and its
/// children's output are written.
#[derive(Debug)]
pub enum WorkerConsole {
    Stderr,
    Window(File),
}

impl WorkerConsole {
    /// Open the console this worker was started with.
    ///
    /// Falls back to stderr when there is no console device to open.
    pub fn attach() -> Self {
        #[cfg(windows)]
        {
            match std::fs::OpenOptions::new()
                .read(true)
                .write(true)
                .open("CONOUT$")
            {
                Ok(file) => return WorkerConsole::Window(file),
                Err(e) => tracing::debug!(error = %e, "no console device; worker writes to stderr"),
            }
        }

        WorkerConsole::Stderr
    }

    pub fn output_target(&self) -> io::Result<OutputTarget> {
        match self {
            WorkerConsole::Stderr => Ok(OutputTarget::Stderr),
            WorkerConsole::Window(file) => Ok(OutputTarget::File(Arc::new(file.try_clone()?))),
        }
    }

    pub fn log(&self) -> io::Result<Box<dyn Write>> {
        match self {
            WorkerConsole::Stderr => Ok(Box::new(io::stderr())),
            WorkerConsole::Window(file) => Ok(Box::new(file.try_clone()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Seek};

    use super::*;

    #[test]
    fn shared_console_keeps_worker_stderr() {
        assert_eq!(InheritConsole.worker_stderr(), WorkerStderr::Inherit);
    }

    #[cfg(windows)]
    #[test]
    fn new_window_detaches_worker_stderr() {
        assert_eq!(NewConsoleWindow.worker_stderr(), WorkerStderr::Null);
    }

    #[cfg(not(windows))]
    #[test]
    fn without_windows_the_worker_stays_on_the_terminal() {
        assert_eq!(NewConsoleWindow.worker_stderr(), WorkerStderr::Inherit);
        assert!(matches!(WorkerConsole::attach(), WorkerConsole::Stderr));
    }

    #[test]
    fn window_console_routes_log_and_children_to_the_same_file() {
        let mut file = tempfile::tempfile().unwrap();
        let console = WorkerConsole::Window(file.try_clone().unwrap());

        assert!(matches!(
            console.output_target().unwrap(),
            OutputTarget::File(_)
        ));
        writeln!(console.log().unwrap(), ":: Idle").unwrap();

        file.rewind().unwrap();
        let mut written = String::new();
        file.read_to_string(&mut written).unwrap();
        assert_eq!(written, ":: Idle\n");
    }
}
