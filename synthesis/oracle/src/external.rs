// Copyright (C) 2019-2025 Provable Inc.
// This file is part of the Espalier library.

// The Espalier library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Espalier library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Espalier library. If not, see <https://www.gnu.org/licenses/>.

use crate::{Decision, Oracle};

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// How often a running oracle process is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// An oracle in the form of a shell command accepting a file as input.
///
/// Each probe writes the candidate to a fresh temporary file and runs
/// `<command> <file>`. Exit code 0 means accept, any other exit code means
/// reject. If the command has not finished within the timeout it is killed
/// and the probe counts as an accept: the bias is deliberately toward fewer
/// rejections, i.e. a larger inferred language. Failing to spawn the
/// command, or to write the scratch file, counts as a reject.
#[derive(Debug, Clone)]
pub struct ExternalOracle {
    command: String,
    timeout: Duration,
    suffix: Option<String>,
}

impl ExternalOracle {
    /// The default time an oracle command is given before the probe is
    /// conservatively accepted.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

    /// Creates an oracle that runs `command <file>` with the default
    /// timeout.
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into(), timeout: Self::DEFAULT_TIMEOUT, suffix: None }
    }

    /// Overrides the probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Gives the scratch file a suffix, for commands that sniff file
    /// extensions.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    fn write_candidate(&self, candidate: &str) -> std::io::Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        if let Some(suffix) = &self.suffix {
            builder.suffix(suffix);
        }
        let mut file = builder.tempfile()?;
        file.write_all(candidate.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

impl Oracle for ExternalOracle {
    fn decide(&mut self, candidate: &str) -> Decision {
        // The scratch file lives exactly as long as this call: it is
        // removed on drop on every exit path below.
        let file = match self.write_candidate(candidate) {
            Ok(file) => file,
            Err(error) => {
                tracing::warn!(%error, "failed to write oracle scratch file");
                return Decision::Reject;
            }
        };

        let mut child = match Command::new(&self.command)
            .arg(file.path())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(error) => {
                tracing::warn!(command = %self.command, %error, "failed to spawn oracle command");
                return Decision::Reject;
            }
        };

        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    return if status.success() { Decision::Accept } else { Decision::Reject };
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        tracing::debug!(candidate, "oracle timed out; counting as accept");
                        return Decision::Accept;
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(_) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Decision::Reject;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // `sh <file>` executes the candidate as a script, which makes the
    // subprocess contract easy to exercise portably.

    #[test]
    fn exit_status_maps_to_decision() {
        assert_eq!(ExternalOracle::new("sh").decide("exit 0"), Decision::Accept);
        assert_eq!(ExternalOracle::new("sh").decide("exit 1"), Decision::Reject);
    }

    #[test]
    fn unspawnable_command_rejects() {
        let mut oracle = ExternalOracle::new("espalier-definitely-not-a-command");
        assert_eq!(oracle.decide("anything"), Decision::Reject);
    }

    #[test]
    fn timeout_counts_as_accept() {
        let mut oracle = ExternalOracle::new("sh").with_timeout(Duration::from_millis(50));
        assert_eq!(oracle.decide("sleep 5"), Decision::Accept);
    }
}
