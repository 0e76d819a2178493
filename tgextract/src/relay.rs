//! Streaming relay: flow-controlled forwarding of process output
//!
//! [`RelayStream`] adapts an extraction process's stdout into a
//! `futures::Stream` of byte chunks suitable for `axum::body::Body::from_stream`.
//! Reads are demand-driven: the process is only read when the HTTP consumer
//! polls, so a slow client stalls the pipe and the kernel buffer applies
//! backpressure to the process. Memory held by the relay never exceeds one
//! chunk.
//!
//! Lifecycle:
//! - dropping the stream (client disconnect) kills the process via
//!   `kill_on_drop`;
//! - stdout EOF hands the process to a background task that reaps the exit
//!   status and logs it. A non-zero exit at that point can no longer be
//!   reported in-band; the truncated body is the terminal state.

use bytes::Bytes;
use futures::Stream;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::process::{Child, ChildStdout};
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

/// Read granularity of the relay; also its maximum buffered byte count
pub const RELAY_CHUNK_SIZE: usize = 8192;

/// Byte stream over one extraction process's stdout, owning the process
#[derive(Debug)]
pub struct RelayStream {
    child: Option<Child>,
    inner: ReaderStream<ChildStdout>,
}

impl RelayStream {
    pub(crate) fn new(child: Child, stdout: ChildStdout) -> Self {
        Self {
            child: Some(child),
            inner: ReaderStream::with_capacity(stdout, RELAY_CHUNK_SIZE),
        }
    }

    /// OS pid of the owned process, if it is still attached
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(|c| c.id())
    }

    /// Detach the process and reap it off-task, logging the exit status.
    fn reap(&mut self) {
        if let Some(mut child) = self.child.take() {
            tokio::spawn(async move {
                match child.wait().await {
                    Ok(status) if status.success() => {
                        debug!("Extraction process finished cleanly");
                    }
                    Ok(status) => {
                        // Headers were sent long ago; the truncated body is
                        // the only client-visible signal.
                        warn!("Extraction process exited with {}", status);
                    }
                    Err(e) => warn!("Failed to reap extraction process: {}", e),
                }
            });
        }
    }
}

impl Stream for RelayStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(chunk)) => Poll::Ready(Some(chunk)),
            Poll::Ready(None) => {
                this.reap();
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
