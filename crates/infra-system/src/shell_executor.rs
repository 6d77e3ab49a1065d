// Shell executor implementation
// reason: tokio::process for async child management, nix for process-group kill
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::{debug, trace, warn};

use localexec_core::application::CancelSignal;
use localexec_core::domain::{ExecutionRequest, ExecutionResult};
use localexec_core::port::{CommandExecutor, ExecutableResolver, ExecutionError, TimeProvider};

/// Shell interpreter invocation: `<program> <args...> <command>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ShellConfig {
    pub fn new(program: impl Into<PathBuf>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl Default for ShellConfig {
    #[cfg(unix)]
    fn default() -> Self {
        Self::new("/bin/sh", &["-c"])
    }

    #[cfg(windows)]
    fn default() -> Self {
        Self::new("cmd", &["/C"])
    }
}

/// Everything collected from a child that ran to completion
struct CapturedOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

enum WaitOutcome {
    Finished(io::Result<CapturedOutput>),
    Cancelled,
}

/// Runs one command per call through the system shell
///
/// Holds no per-call state, so a single instance can serve concurrent calls.
pub struct ShellExecutor {
    resolver: Arc<dyn ExecutableResolver>,
    time_provider: Arc<dyn TimeProvider>,
    shell: ShellConfig,
}

impl ShellExecutor {
    /// Create a new shell executor
    ///
    /// # Arguments
    /// * `resolver` - Pre-flight lookup for the command's first token
    /// * `time_provider` - Time provider for duration tracking
    ///
    /// # Example
    /// ```ignore
    /// let executor = ShellExecutor::new(
    ///     Arc::new(SearchPathResolver::from_env()),
    ///     Arc::new(SystemTimeProvider),
    /// );
    /// ```
    pub fn new(resolver: Arc<dyn ExecutableResolver>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            resolver,
            time_provider,
            shell: ShellConfig::default(),
        }
    }

    pub fn with_shell(mut self, shell: ShellConfig) -> Self {
        self.shell = shell;
        self
    }

    /// Validate the request and resolve its first token; nothing is spawned here
    fn preflight(&self, request: &ExecutionRequest) -> Result<PathBuf, ExecutionError> {
        request.validate()?;
        let program = request.program_name()?;

        self.resolver
            .resolve(program)
            .ok_or_else(|| ExecutionError::ExecutableNotFound {
                command: request.command.clone(),
            })
    }

    fn build_command(&self, request: &ExecutionRequest) -> Command {
        let mut cmd = Command::new(&self.shell.program);
        cmd.args(&self.shell.args)
            .arg(&request.command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &request.working_dir {
            cmd.current_dir(dir);
        }

        // Own process group so cancellation reaches everything the shell started
        #[cfg(unix)]
        cmd.process_group(0);

        cmd
    }

    /// Spawn the shell, drain both pipes and wait, racing the cancel signal
    async fn spawn_and_wait(
        &self,
        request: &ExecutionRequest,
        mut cancel: CancelSignal,
    ) -> Result<CapturedOutput, ExecutionError> {
        let mut child = self
            .build_command(request)
            .spawn()
            .map_err(|e| failed(request, e.to_string(), String::new()))?;

        let pid = child.id();
        let mut group = ProcessGroupGuard::new(pid);
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let outcome = {
            let collect = async {
                let (out, err, status) = tokio::join!(drain(stdout), drain(stderr), child.wait());
                Ok::<_, io::Error>(CapturedOutput {
                    status: status?,
                    stdout: out?,
                    stderr: err?,
                })
            };

            tokio::select! {
                biased;
                _ = cancel.cancelled() => WaitOutcome::Cancelled,
                res = collect => WaitOutcome::Finished(res),
            }
        };

        match outcome {
            WaitOutcome::Finished(Ok(captured)) => {
                // Leader already reaped, the pgid may be reused from here on
                group.disarm();
                Ok(captured)
            }
            WaitOutcome::Finished(Err(e)) => {
                terminate(&mut child, &mut group).await;
                Err(failed(request, e.to_string(), String::new()))
            }
            WaitOutcome::Cancelled => {
                warn!(command = %request.command, pid = ?pid, "Execution cancelled, killing process");
                terminate(&mut child, &mut group).await;
                Err(ExecutionError::Cancelled {
                    command: request.command.clone(),
                })
            }
        }
    }
}

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(
        &self,
        request: &ExecutionRequest,
        cancel: CancelSignal,
    ) -> Result<ExecutionResult, ExecutionError> {
        let program = self.preflight(request)?;
        debug!(program = %program.display(), "Resolved executable");

        if cancel.is_cancelled() {
            return Err(ExecutionError::Cancelled {
                command: request.command.clone(),
            });
        }

        trace!(
            command = %request.command,
            working_dir = ?request.working_dir,
            "Executing command"
        );

        let start_time = self.time_provider.now_millis();
        let captured = self.spawn_and_wait(request, cancel).await;
        let duration_ms = self.time_provider.now_millis() - start_time;

        let captured = match captured {
            Ok(captured) => captured,
            Err(e) => {
                trace!(
                    command = %request.command,
                    duration_ms = %duration_ms,
                    error = %e,
                    "Executed command"
                );
                return Err(e);
            }
        };

        let stdout = String::from_utf8_lossy(&captured.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&captured.stderr).into_owned();

        trace!(
            command = %request.command,
            output = %stdout,
            error = %stderr,
            exit_code = ?captured.status.code(),
            duration_ms = %duration_ms,
            "Executed command"
        );

        if !captured.status.success() {
            return Err(failed(request, describe_exit(captured.status), stderr));
        }

        Ok(ExecutionResult::new(stdout, stderr))
    }
}

fn failed(request: &ExecutionRequest, error: String, stderr: String) -> ExecutionError {
    ExecutionError::ExecutionFailed {
        command: request.command.clone(),
        error,
        stderr,
    }
}

async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

/// `exit status N` / `signal: killed`
fn describe_exit(status: ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit status {}", code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return match signal_name(signal) {
                Some(name) => format!("signal: {}", name),
                None => format!("signal: {}", signal),
            };
        }
    }

    status.to_string()
}

#[cfg(unix)]
fn signal_name(signal: i32) -> Option<&'static str> {
    use nix::sys::signal::Signal;

    let name = match Signal::try_from(signal).ok()? {
        Signal::SIGHUP => "hangup",
        Signal::SIGINT => "interrupt",
        Signal::SIGQUIT => "quit",
        Signal::SIGILL => "illegal instruction",
        Signal::SIGTRAP => "trace/breakpoint trap",
        Signal::SIGABRT => "aborted",
        Signal::SIGBUS => "bus error",
        Signal::SIGFPE => "floating point exception",
        Signal::SIGKILL => "killed",
        Signal::SIGUSR1 => "user defined signal 1",
        Signal::SIGSEGV => "segmentation fault",
        Signal::SIGUSR2 => "user defined signal 2",
        Signal::SIGPIPE => "broken pipe",
        Signal::SIGALRM => "alarm clock",
        Signal::SIGTERM => "terminated",
        _ => return None,
    };
    Some(name)
}

/// Kills the child's process group when dropped while armed
///
/// `kill_on_drop` only reaches the shell itself; this covers whatever the
/// shell started when the `execute` future is dropped mid-run.
struct ProcessGroupGuard {
    pgid: Option<u32>,
}

impl ProcessGroupGuard {
    fn new(pgid: Option<u32>) -> Self {
        Self { pgid }
    }

    fn kill(&mut self) {
        if let Some(pgid) = self.pgid.take() {
            kill_process_group(pgid);
        }
    }

    fn disarm(&mut self) {
        self.pgid = None;
    }
}

impl Drop for ProcessGroupGuard {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(unix)]
fn kill_process_group(pgid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    // ESRCH here just means the whole group is already gone
    if let Err(e) = killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL) {
        debug!(pgid = %pgid, error = %e, "killpg failed");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pgid: u32) {}

/// Kill the child and its process group, then reap the child
async fn terminate(child: &mut Child, group: &mut ProcessGroupGuard) {
    group.kill();

    if let Err(e) = child.start_kill() {
        debug!(error = %e, "Child already exited");
    }
    if let Err(e) = child.wait().await {
        warn!(error = %e, "Failed to reap child process");
    }
}
