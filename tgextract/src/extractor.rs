//! Extraction process manager
//!
//! Spawns one external extraction process per request with the argument
//! profile of the requested [`ExtractionMode`], and hands ownership of the
//! live process to a [`RelayStream`](crate::relay::RelayStream) for piping.
//! Processes are never pooled or shared across requests.

use crate::error::{Error, Result};
use crate::mode::{watch_url, ExtractionMode};
use crate::relay::RelayStream;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, warn};

/// One extraction request: an opaque media identifier plus the output mode
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub media_id: String,
    pub mode: ExtractionMode,
}

impl ExtractionRequest {
    pub fn new(media_id: impl Into<String>, mode: ExtractionMode) -> Self {
        Self {
            media_id: media_id.into(),
            mode,
        }
    }
}

/// Spawns extraction processes for media identifiers
///
/// Holds only the tool path, read once at startup; cloning is cheap and
/// safe because the extractor itself carries no per-request state.
#[derive(Debug, Clone)]
pub struct Extractor {
    tool: String,
}

impl Extractor {
    /// Create an extractor using the given tool (name on PATH or absolute path)
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    /// Get the configured tool
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Spawn one extraction process for the request.
    ///
    /// The media identifier is validated for non-emptiness only and then
    /// passed verbatim as a single argument token inside the watch URL;
    /// the extraction tool, not this service, decides whether it names a
    /// real media item. Must be called from within a tokio runtime (the
    /// diagnostic stream is drained by a spawned task).
    pub fn spawn(&self, request: &ExtractionRequest) -> Result<Extraction> {
        if request.media_id.is_empty() {
            return Err(Error::EmptyMediaId);
        }

        let url = watch_url(&request.media_id);
        let args = request.mode.args(&url);
        debug!("Spawning {} {}", self.tool, args.join(" "));

        let mut child = Command::new(&self.tool)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A dropped relay must not leave an orphaned process behind
            .kill_on_drop(true)
            .spawn()
            .map_err(Error::Spawn)?;

        let stdout = child.stdout.take().ok_or(Error::NoStdout)?;

        // Drain diagnostics into operator logs; they never reach the
        // response body.
        if let Some(stderr) = child.stderr.take() {
            let tool = self.tool.clone();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(target: "tgextract::tool", "{}: {}", tool, line);
                }
            });
        } else {
            warn!("Extraction process has no stderr pipe; diagnostics lost");
        }

        Ok(Extraction {
            child,
            stdout,
            mode: request.mode,
        })
    }
}

/// A live, exclusively-owned extraction process
///
/// Created per request, destroyed when the process exits or the owning
/// stream is dropped. Never shared between responses.
#[derive(Debug)]
pub struct Extraction {
    pub(crate) child: Child,
    pub(crate) stdout: ChildStdout,
    mode: ExtractionMode,
}

impl Extraction {
    /// OS pid of the running process, if it has not been reaped yet
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// Mode the process was spawned with
    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    /// Convert into the flow-controlled byte stream over the process's
    /// stdout. The stream owns the process; dropping it terminates the
    /// process, exhausting it reaps the exit status.
    pub fn into_stream(self) -> RelayStream {
        RelayStream::new(self.child, self.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_media_id_spawns_nothing() {
        let extractor = Extractor::new("/definitely/not/a/real/tool");
        let request = ExtractionRequest::new("", ExtractionMode::PassthroughAudio);
        assert!(matches!(
            extractor.spawn(&request),
            Err(Error::EmptyMediaId)
        ));
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_failure() {
        let extractor = Extractor::new("/definitely/not/a/real/tool");
        let request = ExtractionRequest::new("abc123", ExtractionMode::PassthroughAudio);
        assert!(matches!(extractor.spawn(&request), Err(Error::Spawn(_))));
    }

    #[tokio::test]
    async fn test_spawn_reports_pid_and_mode() {
        // `echo` accepts any arguments and exits immediately
        let extractor = Extractor::new("echo");
        let request = ExtractionRequest::new("abc123", ExtractionMode::TranscodeAudio);
        let extraction = extractor.spawn(&request).unwrap();
        assert!(extraction.pid().is_some());
        assert_eq!(extraction.mode(), ExtractionMode::TranscodeAudio);
    }
}
