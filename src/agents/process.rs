use crate::error::{Result, UpdateError};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

/// Outcome of one external process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external programs inside the working directory.
///
/// Implementations only fail when the process cannot be started; a non-zero
/// exit is reported through [`CommandResult::exit_code`].
pub trait CommandRunner {
    /// Run with stdout streamed to the log. `stdout` in the result stays empty.
    fn exec(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandResult>;

    /// Run with stdout and stderr captured.
    fn exec_output(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandResult>;
}

/// Turns a non-zero exit into an error built by `to_error`.
pub fn ensure_success(
    result: CommandResult,
    command: &str,
    to_error: fn(String) -> UpdateError,
) -> Result<CommandResult> {
    if result.success() {
        return Ok(result);
    }

    Err(to_error(format!(
        "{} exited with code {}: {}",
        command,
        result.exit_code,
        result.stderr.trim()
    )))
}

#[derive(Debug, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }

    fn spawn_error(program: &str, args: &[&str], err: std::io::Error) -> UpdateError {
        UpdateError::CommandExecution(format!(
            "Failed to execute '{} {}': {err}",
            program,
            args.join(" ")
        ))
    }
}

impl CommandRunner for SystemCommandRunner {
    fn exec(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandResult> {
        println!("[command]{} {}", program, args.join(" "));

        let mut child = Command::new(program)
            .current_dir(cwd)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Self::spawn_error(program, args, e))?;

        let stderr_reader = child.stderr.take().map(|stderr| {
            thread::spawn(move || {
                let mut buffer = Vec::new();
                if let Err(e) = BufReader::new(stderr).read_to_end(&mut buffer) {
                    eprintln!("Failed to read stderr: {e}");
                }
                String::from_utf8_lossy(&buffer).into_owned()
            })
        });

        if let Some(stdout) = child.stdout.take() {
            // Drain to EOF; stopping early closes the pipe under the child.
            let reader = BufReader::new(stdout);
            for line in reader.split(b'\n') {
                if let Ok(line) = line {
                    println!("{}", String::from_utf8_lossy(&line));
                }
            }
        }

        let status = child
            .wait()
            .map_err(|e| Self::spawn_error(program, args, e))?;

        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();
        if !stderr.is_empty() {
            eprint!("{stderr}");
        }

        Ok(CommandResult {
            exit_code: status.code().unwrap_or(-1),
            stdout: String::new(),
            stderr,
        })
    }

    fn exec_output(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandResult> {
        println!("[command]{} {}", program, args.join(" "));

        let output = Command::new(program)
            .current_dir(cwd)
            .args(args)
            .output()
            .map_err(|e| Self::spawn_error(program, args, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !stdout.is_empty() {
            print!("{stdout}");
        }

        Ok(CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
pub mod testing {
    use super::{CommandResult, CommandRunner};
    use crate::error::Result;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::path::{Path, PathBuf};

    /// One recorded invocation: the full command line and its working directory.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Invocation {
        pub command: String,
        pub cwd: PathBuf,
    }

    /// Scripted runner: matches command-line prefixes to canned results and
    /// records every call. Unscripted commands succeed with empty output.
    #[derive(Debug, Default)]
    pub struct FakeRunner {
        scripted: RefCell<VecDeque<(String, CommandResult)>>,
        calls: RefCell<Vec<Invocation>>,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// The first call whose command line starts with `prefix` returns `result`.
        pub fn script(self, prefix: &str, result: CommandResult) -> Self {
            self.scripted
                .borrow_mut()
                .push_back((prefix.to_string(), result));
            self
        }

        pub fn with_stdout(self, prefix: &str, stdout: &str) -> Self {
            self.script(
                prefix,
                CommandResult {
                    exit_code: 0,
                    stdout: stdout.to_string(),
                    stderr: String::new(),
                },
            )
        }

        pub fn failing(self, prefix: &str, exit_code: i32, stderr: &str) -> Self {
            self.script(
                prefix,
                CommandResult {
                    exit_code,
                    stdout: String::new(),
                    stderr: stderr.to_string(),
                },
            )
        }

        pub fn commands(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|c| c.command.clone()).collect()
        }

        pub fn invocations(&self) -> Vec<Invocation> {
            self.calls.borrow().clone()
        }

        fn record(&self, program: &str, args: &[&str], cwd: &Path) -> CommandResult {
            let command = std::iter::once(program)
                .chain(args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            self.calls.borrow_mut().push(Invocation {
                command: command.clone(),
                cwd: cwd.to_path_buf(),
            });

            let mut scripted = self.scripted.borrow_mut();
            match scripted.iter().position(|(p, _)| command.starts_with(p)) {
                Some(index) => scripted.remove(index).map(|(_, r)| r).unwrap_or_default(),
                None => CommandResult::default(),
            }
        }
    }

    impl CommandRunner for FakeRunner {
        fn exec(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandResult> {
            let mut result = self.record(program, args, cwd);
            result.stdout.clear();
            Ok(result)
        }

        fn exec_output(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandResult> {
            Ok(self.record(program, args, cwd))
        }
    }
}
