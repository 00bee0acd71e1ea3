//! External syntax checking of the embedded PHP.
//!
//! The engine treats the checker as an opaque query. The command-backed
//! implementation runs `php -l <file>` (configurable) and maps the exit code,
//! killing the child when it outlives the configured timeout.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::SyntaxCheckConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Result of one syntax check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxOutcome {
    Valid,
    Invalid { message: String },
    /// The checker could not be started or waited on.
    Unavailable { reason: String },
    TimedOut { after: Duration },
}

impl SyntaxOutcome {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Capability for checking the syntax of a document's embedded code.
pub trait SyntaxChecker: Send + Sync {
    fn check(&self, path: &Path) -> SyntaxOutcome;
}

/// Runs an external command and maps exit status 0 to [`SyntaxOutcome::Valid`].
#[derive(Debug, Clone)]
pub struct CommandSyntaxChecker {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandSyntaxChecker {
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    #[must_use]
    pub fn from_config(config: &SyntaxCheckConfig) -> Self {
        Self::new(
            config.command.clone(),
            config.args.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn spawn(&self, path: &Path) -> std::io::Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
    }

    fn wait(&self, child: &mut Child) -> SyntaxOutcome {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) if status.success() => return SyntaxOutcome::Valid,
                Ok(Some(_)) => {
                    return SyntaxOutcome::Invalid {
                        message: read_first_line(child),
                    };
                }
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return SyntaxOutcome::TimedOut {
                        after: self.timeout,
                    };
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(err) => {
                    return SyntaxOutcome::Unavailable {
                        reason: format!("failed while waiting for `{}`: {err}", self.program),
                    };
                }
            }
        }
    }
}

impl SyntaxChecker for CommandSyntaxChecker {
    fn check(&self, path: &Path) -> SyntaxOutcome {
        let mut child = match self.spawn(path) {
            Ok(child) => child,
            Err(err) => {
                tracing::warn!(program = %self.program, error = %err, "syntax checker unavailable");
                return SyntaxOutcome::Unavailable {
                    reason: format!("failed to start `{}`: {err}", self.program),
                };
            }
        };
        let outcome = self.wait(&mut child);
        tracing::debug!(path = %path.display(), ?outcome, "syntax check finished");
        outcome
    }
}

/// First non-empty line the checker printed, used as the failure message.
fn read_first_line(child: &mut Child) -> String {
    let mut output = String::new();
    if let Some(stdout) = child.stdout.as_mut() {
        let _ = stdout.take(4096).read_to_string(&mut output);
    }
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
