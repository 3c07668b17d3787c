use super::translator::translate;
use super::types::WorkerPayload;
use crate::{Error, Result, config::WorkerConfig};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Computes the similarity of two sentences.
///
/// Every call is independent: implementations must not share in-flight state
/// between calls and must give up once their deadline has passed.
#[async_trait]
pub trait SimilarityWorker: Send + Sync {
    async fn compute(&self, payload: WorkerPayload) -> Result<f64>;
}

/// Runs the configured scoring command once per call.
///
/// The payload goes to the child's stdin as a single JSON object, stdout is
/// read as the result and stderr is kept for diagnostics only. The child runs
/// in its own process group; once the child exits, or the call fails or
/// outlives its deadline, the whole group is killed and the child reaped
/// before the call returns.
pub struct ProcessWorker {
    config: WorkerConfig,
}

struct ProcessOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    write_error: Option<std::io::Error>,
}

impl ProcessWorker {
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.command);
        cmd.args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        cmd.process_group(0);

        for (key, value) in &self.config.env {
            cmd.env(key, value);
        }

        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }

        cmd
    }

    /// Runs one worker process and returns its raw stdout.
    pub async fn invoke(&self, payload: &WorkerPayload) -> Result<Vec<u8>> {
        let deadline = Instant::now() + self.timeout();
        self.invoke_until(payload, deadline).await
    }

    /// Like [`invoke`](Self::invoke), bounded by an absolute deadline.
    pub(crate) async fn invoke_until(
        &self,
        payload: &WorkerPayload,
        deadline: Instant,
    ) -> Result<Vec<u8>> {
        let started = Instant::now();
        let input = serde_json::to_vec(payload)?;

        let mut child = self.command().spawn().map_err(|e| {
            Error::worker(format!(
                "Failed to spawn worker process {}: {}",
                self.config.command, e
            ))
        })?;
        let pid = child.id();

        debug!(?pid, "Spawned worker process: {}", self.config.command);

        let pipes = (
            child.stdin.take(),
            child.stdout.take(),
            child.stderr.take(),
        );
        let (Some(stdin), Some(stdout), Some(stderr)) = pipes else {
            terminate(&mut child, pid).await;
            return Err(Error::worker("Failed to get stdio pipes for worker process"));
        };

        let exchange = exchange(
            &mut child,
            pid,
            stdin,
            stdout,
            stderr,
            input,
            self.config.max_output_bytes,
        );
        let outcome = tokio::time::timeout_at(deadline, exchange).await;

        let output = match outcome {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!(?pid, "Worker exchange failed, killing worker: {}", e);
                terminate(&mut child, pid).await;
                return Err(e);
            }
            Err(_) => {
                let timeout = self.timeout();
                warn!(?pid, "Worker process exceeded {:?}, killing it", timeout);
                terminate(&mut child, pid).await;
                return Err(Error::WorkerTimeout { timeout });
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!(
            ?pid,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Worker process finished with {}",
            output.status
        );
        if !stderr.is_empty() {
            debug!(?pid, "Worker stderr: {}", stderr);
        }

        if !output.status.success() {
            return Err(Error::WorkerExit {
                status: output.status.to_string(),
                stderr,
            });
        }

        match output.write_error {
            // A worker may exit successfully without reading its input.
            Some(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!(?pid, "Worker closed stdin early: {}", e);
            }
            Some(e) => {
                return Err(Error::worker(format!(
                    "Failed to write to worker stdin: {}",
                    e
                )));
            }
            None => {}
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl SimilarityWorker for ProcessWorker {
    async fn compute(&self, payload: WorkerPayload) -> Result<f64> {
        let stdout = self.invoke(&payload).await?;
        translate(&stdout)
    }
}

/// Feeds stdin, drains both output pipes and waits for the child, all at once.
///
/// Helpers the child leaves behind may still hold the pipes open, so the
/// group is killed as soon as the child itself has exited.
async fn exchange(
    child: &mut Child,
    pid: Option<u32>,
    mut stdin: ChildStdin,
    stdout: ChildStdout,
    stderr: ChildStderr,
    input: Vec<u8>,
    max_output_bytes: usize,
) -> Result<ProcessOutput> {
    let write = async move {
        let result = async {
            stdin.write_all(&input).await?;
            stdin.flush().await
        }
        .await;
        // Dropping stdin closes the pipe so the worker sees EOF.
        drop(stdin);
        Ok::<_, Error>(result.err())
    };

    let wait = async {
        let status = child
            .wait()
            .await
            .map_err(|e| Error::worker(format!("Failed to wait for worker process: {}", e)))?;
        kill_process_group(pid);
        Ok::<_, Error>(status)
    };

    let (write_error, stdout, stderr, status) = tokio::try_join!(
        write,
        read_capped(stdout, max_output_bytes, "stdout"),
        read_capped(stderr, max_output_bytes, "stderr"),
        wait,
    )?;

    Ok(ProcessOutput {
        status,
        stdout,
        stderr,
        write_error,
    })
}

/// Reads a stream to EOF, failing once it grows past `limit` bytes.
async fn read_capped<R: AsyncRead + Unpin>(
    reader: R,
    limit: usize,
    stream: &str,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .await
        .map_err(|e| Error::worker(format!("Failed to read worker {}: {}", stream, e)))?;

    if buf.len() > limit {
        return Err(Error::WorkerOutput(format!(
            "worker {} exceeded {} bytes",
            stream, limit
        )));
    }

    Ok(buf)
}

/// Kills the worker's process group and reaps the worker itself.
async fn terminate(child: &mut Child, pid: Option<u32>) {
    kill_process_group(pid);

    if let Ok(None) = child.try_wait() {
        if let Err(e) = child.kill().await {
            warn!(?pid, "Failed to kill worker process: {}", e);
        }
    }
}

#[cfg(unix)]
fn kill_process_group(pid: Option<u32>) {
    let Some(pid) = pid else {
        return;
    };

    // The worker was spawned as the leader of its own group, so its pid is the pgid.
    let result = unsafe { libc::killpg(pid as libc::pid_t, libc::SIGKILL) };
    if result != 0 {
        let err = std::io::Error::last_os_error();
        // ESRCH: nothing left in the group.
        if err.raw_os_error() != Some(libc::ESRCH) {
            warn!(pid, "Failed to kill worker process group: {}", err);
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: Option<u32>) {}
