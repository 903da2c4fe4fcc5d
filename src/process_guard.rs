//! Process lifecycle management for child processes
//!
//! A release build can run for minutes. If the installer is interrupted
//! (Ctrl-C, SIGTERM) while cargo is compiling, the child must not be left
//! orphaned with the terminal.
//!
//! - Children are spawned in their own process group
//! - All child PIDs are tracked in a global registry
//! - On termination, SIGTERM is sent to each child's group; stragglers
//!   get SIGKILL after a grace period

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::collections::HashSet;
use std::process::Command;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

/// Global registry of child process IDs
static CHILD_REGISTRY: OnceLock<Arc<Mutex<ChildRegistry>>> = OnceLock::new();

/// Grace period between SIGTERM and SIGKILL during cleanup
const TERMINATION_GRACE: Duration = Duration::from_secs(5);

/// Extension trait placing a spawned command in its own process group.
///
/// Group isolation lets cleanup signal the whole child tree (cargo spawns
/// rustc processes of its own) without touching the installer itself.
pub trait CommandProcessGroup {
    fn in_new_process_group(&mut self) -> &mut Command;
}

impl CommandProcessGroup for Command {
    #[cfg(unix)]
    fn in_new_process_group(&mut self) -> &mut Command {
        use std::os::unix::process::CommandExt;
        self.process_group(0)
    }

    #[cfg(not(unix))]
    fn in_new_process_group(&mut self) -> &mut Command {
        self
    }
}

/// Registry tracking all spawned child processes
#[derive(Debug, Default)]
pub struct ChildRegistry {
    /// Set of child PIDs currently running
    pids: HashSet<u32>,
    /// Whether cleanup has already been initiated
    cleanup_initiated: bool,
}

impl ChildRegistry {
    /// Get or create the global child registry
    pub fn global() -> Arc<Mutex<ChildRegistry>> {
        CHILD_REGISTRY
            .get_or_init(|| Arc::new(Mutex::new(ChildRegistry::default())))
            .clone()
    }

    /// Register a new child process
    pub fn register(&mut self, pid: u32) {
        self.pids.insert(pid);
        log::debug!("Registered child process PID {}", pid);
    }

    /// Unregister a child process (called when it exits normally)
    pub fn unregister(&mut self, pid: u32) {
        self.pids.remove(&pid);
        log::debug!("Unregistered child process PID {}", pid);
    }

    /// Get count of tracked children
    pub fn count(&self) -> usize {
        self.pids.len()
    }

    /// Terminate all tracked children: SIGTERM to each group, then SIGKILL
    /// for anything still alive after `grace_period`.
    pub fn terminate_all(&mut self, grace_period: Duration) {
        if self.cleanup_initiated {
            return;
        }
        self.cleanup_initiated = true;

        if self.pids.is_empty() {
            return;
        }

        log::info!("Terminating {} child process(es)...", self.pids.len());

        let pids: Vec<u32> = self.pids.iter().copied().collect();
        for &pid in &pids {
            if let Err(e) = signal_group(pid, Signal::SIGTERM) {
                log::warn!("Failed to send SIGTERM to process group {}: {}", pid, e);
            }
        }

        let start = Instant::now();
        while start.elapsed() < grace_period {
            if !pids.iter().any(|&pid| is_process_alive(pid)) {
                self.pids.clear();
                log::info!("All child processes terminated gracefully");
                return;
            }
            std::thread::sleep(Duration::from_millis(100));
        }

        for &pid in &pids {
            if is_process_alive(pid) {
                log::warn!("Process group {} did not terminate, sending SIGKILL", pid);
                let _ = signal_group(pid, Signal::SIGKILL);
            }
        }

        self.pids.clear();
    }
}

/// Send a signal to an entire process group (negative PID addresses the group)
fn signal_group(pid: u32, sig: Signal) -> Result<(), nix::Error> {
    signal::kill(Pid::from_raw(-(pid as i32)), sig)
}

/// Check whether a process still exists (signal 0 probes without delivering)
fn is_process_alive(pid: u32) -> bool {
    signal::kill(Pid::from_raw(pid as i32), None).is_ok()
}

/// Install termination handlers that clean up tracked children.
///
/// Must be called once at startup, before any child is spawned. The
/// handler exits with 130 (128 + SIGINT) after cleanup, matching shell
/// conventions for interrupted commands.
pub fn init_signal_handlers() -> Result<(), ctrlc::Error> {
    let registry = ChildRegistry::global();
    ctrlc::set_handler(move || {
        log::info!("Termination signal received, cleaning up children");
        if let Ok(mut guard) = registry.lock() {
            guard.terminate_all(TERMINATION_GRACE);
        }
        std::process::exit(130);
    })
}
