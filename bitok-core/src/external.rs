//! External commands used as text filters
//!
//! An [`ExternalProcessor`] turns an arbitrary command line into a
//! `text -> text` function: every call launches the program, feeds the whole
//! input on standard input and collects the whole standard output.

use crate::error::{PipelineError, Result};
use std::io::{self, Read, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// A command line run once per [`process`](ExternalProcessor::process) call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProcessor {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ExternalProcessor {
    /// Create a processor from a program and its arguments
    pub fn new<S: Into<String>>(program: S, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    /// Parse a whitespace-separated command line
    ///
    /// No shell is involved: quotes and redirections are passed verbatim to
    /// the program as arguments.
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| PipelineError::Config("empty command line".to_string()))?;
        Ok(Self::new(program, parts.collect()))
    }

    /// Kill the subprocess if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The program that gets launched
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Command line for diagnostics
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Pipe `text` through the command and return its standard output
    pub fn process(&self, text: &str) -> Result<String> {
        let command = self.command_line();
        log::trace!("running `{}` on {} bytes", command, text.len());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            // own process group, so a timeout reaches the whole tree
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }
        let child = cmd
            .spawn()
            .map_err(|source| PipelineError::SubprocessLaunch {
                command: command.clone(),
                source,
            })?;
        let mut guard = ChildGuard(child);

        let stdin = guard.0.stdin.take();
        let stdout = guard.0.stdout.take();
        let stderr = guard.0.stderr.take();

        let (status, output, errors) = thread::scope(|scope| -> Result<_> {
            let feeder = scope.spawn(move || feed(stdin, text));
            let out_reader = scope.spawn(move || drain(stdout));
            let err_reader = scope.spawn(move || drain(stderr));

            // The readers only finish once the child is gone, so kill it
            // before the scope joins them.
            let status = match wait_with_deadline(&mut guard.0, self.timeout) {
                Ok(status) => status,
                Err(e) => {
                    let _ = kill_tree(&mut guard.0);
                    return Err(e);
                }
            };

            let output = join(out_reader)??;
            let errors = join(err_reader)??;
            join(feeder)??;
            Ok((status, output, errors))
        })?;

        let Some(status) = status else {
            return Err(PipelineError::SubprocessTimeout {
                command,
                timeout: self.timeout.unwrap_or_default(),
            });
        };
        if !status.success() {
            return Err(PipelineError::execution(&command, status, &errors));
        }

        String::from_utf8(output).map_err(|e| PipelineError::SubprocessExecution {
            command,
            status: "invalid UTF-8 output".to_string(),
            stderr: e.to_string(),
        })
    }
}

/// Kills and reaps the child unless it has already exited
struct ChildGuard(Child);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Ok(None) = self.0.try_wait() {
            let _ = kill_tree(&mut self.0);
            let _ = self.0.wait();
        }
    }
}

/// Kill the child and every process left in its group
///
/// Only valid while the child has not been reaped.
fn kill_tree(child: &mut Child) -> io::Result<()> {
    #[cfg(unix)]
    {
        let pgid = child.id() as libc::pid_t;
        // SAFETY: kill(2) takes plain integers and touches no memory.
        if unsafe { libc::kill(-pgid, libc::SIGKILL) } == 0 {
            return Ok(());
        }
    }
    child.kill()
}

fn feed(stdin: Option<ChildStdin>, text: &str) -> io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    // A filter may exit without consuming all of its input.
    match stdin.write_all(text.as_bytes()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn drain<R: Read>(pipe: Option<R>) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buffer)?;
    }
    Ok(buffer)
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> Result<T> {
    handle
        .join()
        .map_err(|_| PipelineError::Io(io::Error::other("pipe worker panicked")))
}

/// Wait for exit; `None` means the deadline passed and the child was killed
fn wait_with_deadline(child: &mut Child, timeout: Option<Duration>) -> Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return Ok(Some(child.wait()?));
    };

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            kill_tree(child)?;
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_line_splits_arguments() {
        let processor = ExternalProcessor::from_command_line("  tr  A-Z a-z ").unwrap();
        assert_eq!(processor.program(), "tr");
        assert_eq!(processor.command_line(), "tr A-Z a-z");
    }

    #[test]
    fn test_from_command_line_rejects_empty() {
        assert!(matches!(
            ExternalProcessor::from_command_line("   "),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn test_identity_filter() {
        let cat = ExternalProcessor::from_command_line("cat").unwrap();
        let text = "First line.\nSecond line with ünïcödé.\n";
        assert_eq!(cat.process(text).unwrap(), text);
    }

    #[test]
    fn test_filter_with_arguments() {
        let upper = ExternalProcessor::from_command_line("tr a-z A-Z").unwrap();
        assert_eq!(upper.process("abc def\n").unwrap(), "ABC DEF\n");
    }

    #[test]
    fn test_large_input_does_not_deadlock() {
        let cat = ExternalProcessor::from_command_line("cat").unwrap();
        let text = "0123456789abcdef\n".repeat(64 * 1024);
        assert_eq!(cat.process(&text).unwrap().len(), text.len());
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let missing = ExternalProcessor::from_command_line("bitok-no-such-program-xyz").unwrap();
        assert!(matches!(
            missing.process("text"),
            Err(PipelineError::SubprocessLaunch { .. })
        ));
    }

    #[test]
    fn test_failing_program_is_execution_error() {
        let failing = ExternalProcessor::from_command_line("false").unwrap();
        match failing.process("text") {
            Err(PipelineError::SubprocessExecution { command, .. }) => {
                assert_eq!(command, "false")
            }
            other => panic!("expected execution error, got {other:?}"),
        }
    }

    #[test]
    fn test_program_ignoring_stdin_succeeds() {
        let echo = ExternalProcessor::from_command_line("echo hello").unwrap();
        let input = "ignored\n".repeat(100_000);
        assert_eq!(echo.process(&input).unwrap(), "hello\n");
    }

    #[test]
    fn test_timeout_kills_child() {
        let sleeper = ExternalProcessor::from_command_line("sleep 5")
            .unwrap()
            .with_timeout(Some(Duration::from_millis(100)));
        let started = Instant::now();
        assert!(matches!(
            sleeper.process(""),
            Err(PipelineError::SubprocessTimeout { .. })
        ));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_kills_wrapper_and_its_children() {
        // the shell's children keep stdout open after the shell itself dies
        let wrapper = ExternalProcessor::new(
            "sh",
            vec!["-c".to_string(), "sleep 10 | cat".to_string()],
        )
        .with_timeout(Some(Duration::from_millis(200)));
        let started = Instant::now();
        assert!(matches!(
            wrapper.process("input\n"),
            Err(PipelineError::SubprocessTimeout { .. })
        ));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_does_not_change_output() {
        let cat = ExternalProcessor::from_command_line("cat")
            .unwrap()
            .with_timeout(Some(Duration::from_secs(30)));
        assert_eq!(cat.process("same text\n").unwrap(), "same text\n");
    }
}
