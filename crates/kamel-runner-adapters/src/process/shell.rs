//! Run an assembled command through a POSIX shell.
//!
//! The command text may span several lines, so it is handed to the shell
//! verbatim as `<shell> -c <command>`. Both output pipes are drained on
//! their own threads into one channel, so neither can fill up and stall
//! the child while the other is being read.

use std::{
    io::{BufRead, BufReader, Read},
    path::{Path, PathBuf},
    process::{Command, Stdio},
    sync::mpsc,
    thread,
};

use tracing::{info, instrument};

use kamel_runner_core::{
    application::{
        ApplicationError,
        ports::{LaunchOutcome, ProcessLauncher},
    },
    domain::AssembledCommand,
    error::RunnerResult,
};

pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Which pipe a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl OutputStream {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

enum Event {
    Line(OutputStream, String),
    Failed(OutputStream, String),
}

/// Launches commands with `<shell> -c`.
#[derive(Debug, Clone)]
pub struct ShellLauncher {
    shell: PathBuf,
}

impl ShellLauncher {
    pub fn new() -> Self {
        Self {
            shell: PathBuf::from(DEFAULT_SHELL),
        }
    }

    pub fn with_shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn shell(&self) -> &Path {
        &self.shell
    }

    /// Run `command` in `working_dir`, passing every output line to `sink`
    /// as it arrives. Blocks until the child exits and both pipes are closed.
    pub fn launch_with(
        &self,
        command: &str,
        working_dir: &Path,
        sink: &mut dyn FnMut(OutputStream, &str),
    ) -> RunnerResult<LaunchOutcome> {
        let program = self.shell.display().to_string();

        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ApplicationError::LaunchFailed {
                program: program.clone(),
                reason: e.to_string(),
            })?;

        let (tx, rx) = mpsc::channel();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_reader(stdout, OutputStream::Stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_reader(stderr, OutputStream::Stderr, tx.clone()));
        }
        drop(tx);

        let mut outcome = LaunchOutcome::default();
        let mut failure = None;
        for event in rx {
            match event {
                Event::Line(stream, line) => {
                    match stream {
                        OutputStream::Stdout => outcome.stdout_lines += 1,
                        OutputStream::Stderr => outcome.stderr_lines += 1,
                    }
                    sink(stream, &line);
                }
                Event::Failed(stream, reason) => {
                    failure.get_or_insert(format!("{}: {reason}", stream.as_str()));
                }
            }
        }

        for reader in readers {
            if reader.join().is_err() {
                failure.get_or_insert_with(|| "output reader panicked".to_string());
            }
        }

        let status = child.wait().map_err(|e| ApplicationError::LaunchFailed {
            program,
            reason: e.to_string(),
        })?;

        if let Some(reason) = failure {
            return Err(ApplicationError::StreamFailed { reason }.into());
        }

        outcome.exit_code = status.code();
        Ok(outcome)
    }
}

impl Default for ShellLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLauncher for ShellLauncher {
    #[instrument(skip_all, fields(shell = %self.shell.display(), cwd = %working_dir.display()))]
    fn launch(
        &self,
        command: &AssembledCommand,
        working_dir: &Path,
    ) -> RunnerResult<LaunchOutcome> {
        self.launch_with(command.as_str(), working_dir, &mut |stream, line| {
            info!(stream = stream.as_str(), "{line}");
        })
    }
}

fn spawn_reader<R>(
    pipe: R,
    stream: OutputStream,
    tx: mpsc::Sender<Event>,
) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\n', '\r']).to_string();
                    if tx.send(Event::Line(stream, line)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.send(Event::Failed(stream, e.to_string()));
                    break;
                }
            }
        }
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn collect(command: &str, dir: &Path) -> (LaunchOutcome, Vec<(OutputStream, String)>) {
        let mut lines = Vec::new();
        let outcome = ShellLauncher::new()
            .launch_with(command, dir, &mut |stream, line| {
                lines.push((stream, line.to_string()))
            })
            .unwrap();
        (outcome, lines)
    }

    #[test]
    fn streams_stdout_lines() {
        let temp = TempDir::new().unwrap();
        let (outcome, lines) = collect("echo one; echo two", temp.path());
        assert!(outcome.success());
        assert_eq!(outcome.stdout_lines, 2);
        assert_eq!(
            lines,
            vec![
                (OutputStream::Stdout, "one".to_string()),
                (OutputStream::Stdout, "two".to_string()),
            ]
        );
    }

    #[test]
    fn stderr_is_tagged() {
        let temp = TempDir::new().unwrap();
        let (outcome, lines) = collect("echo oops >&2", temp.path());
        assert_eq!(outcome.stderr_lines, 1);
        assert_eq!(lines, vec![(OutputStream::Stderr, "oops".to_string())]);
    }

    #[test]
    fn non_zero_exit_is_reported_not_raised() {
        let temp = TempDir::new().unwrap();
        let (outcome, _) = collect("exit 3", temp.path());
        assert!(!outcome.success());
        assert_eq!(outcome.exit_code, Some(3));
    }

    #[test]
    fn signal_termination_has_no_exit_code() {
        let temp = TempDir::new().unwrap();
        let (outcome, _) = collect("kill -9 $$", temp.path());
        assert_eq!(outcome.exit_code, None);
    }

    #[test]
    fn runs_in_working_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();
        let (_, lines) = collect("ls", temp.path());
        assert!(lines.iter().any(|(_, l)| l == "marker.txt"));
    }

    #[test]
    fn backslash_continuations_form_one_command() {
        let temp = TempDir::new().unwrap();
        let (_, lines) = collect("echo a \\\n b \\\n c", temp.path());
        assert_eq!(lines, vec![(OutputStream::Stdout, "a b c".to_string())]);
    }

    #[test]
    fn large_interleaved_output_does_not_stall() {
        let temp = TempDir::new().unwrap();
        let (outcome, _) = collect(
            "i=0; while [ $i -lt 5000 ]; do echo out $i; echo err $i >&2; i=$((i+1)); done",
            temp.path(),
        );
        assert!(outcome.success());
        assert_eq!(outcome.stdout_lines, 5000);
        assert_eq!(outcome.stderr_lines, 5000);
    }

    #[test]
    fn missing_shell_is_launch_error() {
        let temp = TempDir::new().unwrap();
        let err = ShellLauncher::new()
            .with_shell(temp.path().join("no-such-shell"))
            .launch_with("true", temp.path(), &mut |_, _| {})
            .unwrap_err();
        assert_eq!(
            err.category(),
            kamel_runner_core::error::ErrorCategory::Launch
        );
    }

    #[test]
    fn launch_via_port() {
        let temp = TempDir::new().unwrap();
        let command = AssembledCommand::from("echo via-port".to_string());
        let outcome = ShellLauncher::new().launch(&command, temp.path()).unwrap();
        assert_eq!(outcome.stdout_lines, 1);
    }
}
