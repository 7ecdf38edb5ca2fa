use std::{ffi::OsString, path::Path, path::PathBuf, process::Stdio};
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    process::Command,
    task::JoinHandle,
    time::{self, Duration},
};
use tracing::{debug, warn};

use crate::error::Error;

/// Captured result of a child process that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Spawns toolchain subcommands under a wall-clock timeout
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
    program_args: Vec<String>,
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>, program_args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            program_args,
            timeout,
        }
    }

    /// Run a compiled artifact: `run [--debug] <artifact>`
    pub async fn run_artifact(&self, artifact: &Path, debug: bool) -> Result<RunOutput, Error> {
        let mut args: Vec<OsString> = vec!["run".into()];
        if debug {
            args.push("--debug".into());
        }
        args.push(artifact.into());
        self.execute(&args).await
    }

    /// Run the program with `args` after the configured prefix arguments.
    ///
    /// Fails with [`Error::Timeout`] if the child has not exited and closed its
    /// output pipes when the budget expires. The child is killed and reaped
    /// before returning.
    pub async fn execute(&self, args: &[OsString]) -> Result<RunOutput, Error> {
        let cmd_path = self.resolve_program()?;
        debug!(
            "Executing {} {:?} {:?}",
            cmd_path.display(),
            self.program_args,
            args
        );

        let mut child = Command::new(&cmd_path)
            .args(&self.program_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::System(format!("Failed to spawn {}: {}", self.program, e)))?;

        // Drain both pipes while waiting so a chatty child cannot block on a full pipe.
        let stdout_task = spawn_reader(child.stdout.take());
        let stderr_task = spawn_reader(child.stderr.take());

        let stdout_abort = stdout_task.abort_handle();
        let stderr_abort = stderr_task.abort_handle();

        // Descendants may hold the pipes open after the child exits, so the
        // drain shares the deadline with the wait.
        let completed = time::timeout(self.timeout, async {
            let status = child.wait().await?;
            let stdout = join_reader(stdout_task).await?;
            let stderr = join_reader(stderr_task).await?;
            Ok::<_, Error>((status, stdout, stderr))
        })
        .await;

        let (status, stdout, stderr) = match completed {
            Ok(finished) => finished?,
            Err(_) => {
                // Fails harmlessly when the child itself already exited.
                if let Err(e) = child.kill().await {
                    debug!("Kill after timeout: {}", e);
                }
                stdout_abort.abort();
                stderr_abort.abort();
                warn!("Process exceeded {}s budget", self.timeout.as_secs());
                return Err(Error::Timeout(self.timeout.as_secs()));
            }
        };

        debug!("Process exited with {}", status);

        Ok(RunOutput {
            exit_code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).to_string(),
            stderr: String::from_utf8_lossy(&stderr).to_string(),
        })
    }

    fn resolve_program(&self) -> Result<PathBuf, Error> {
        if self.program.contains(std::path::MAIN_SEPARATOR) {
            return Ok(PathBuf::from(&self.program));
        }
        which::which(&self.program)
            .map_err(|_| Error::System(format!("Command not found: {}", self.program)))
    }
}

fn spawn_reader<R>(pipe: Option<R>) -> JoinHandle<std::io::Result<Vec<u8>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf).await?;
        }
        Ok(buf)
    })
}

async fn join_reader(task: JoinHandle<std::io::Result<Vec<u8>>>) -> Result<Vec<u8>, Error> {
    task.await
        .map_err(|e| Error::System(format!("Output reader failed: {}", e)))?
        .map_err(Error::Io)
}
