//! Idle-deadline wrapper for persistent connections.
//!
//! # Responsibilities
//! - Arm a deadline whenever the wrapped stream goes quiet
//! - Fail the pending read/write with `TimedOut` once idle long enough
//! - Reset the deadline on every byte of activity
//!
//! hyper's HTTP/1 connection builder covers the header-read phase but has no
//! knob for how long an idle keep-alive connection may sit between requests,
//! so that timeout is enforced at the I/O layer instead.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::time::{Instant, Sleep};

/// Wraps a stream and closes it after a period of inactivity.
///
/// With `timeout = None` the wrapper is a transparent passthrough.
#[derive(Debug)]
pub struct IdleTimeout<S> {
    inner: S,
    timeout: Option<Duration>,
    deadline: Option<Pin<Box<Sleep>>>,
}

impl<S> IdleTimeout<S> {
    /// Wrap `inner`, closing it once it has been idle for `timeout`.
    pub fn new(inner: S, timeout: Option<Duration>) -> Self {
        let deadline = timeout.map(|t| Box::pin(tokio::time::sleep(t)));
        Self {
            inner,
            timeout,
            deadline,
        }
    }

    /// Push the deadline out after observed activity.
    fn touch(&mut self) {
        if let (Some(timeout), Some(deadline)) = (self.timeout, self.deadline.as_mut()) {
            deadline.as_mut().reset(Instant::now() + timeout);
        }
    }

    /// Check the deadline while the inner stream is pending.
    fn poll_deadline(&mut self, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        if let Some(deadline) = self.deadline.as_mut() {
            if deadline.as_mut().poll(cx).is_ready() {
                return Poll::Ready(Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "connection idle timeout expired",
                )));
            }
        }
        Poll::Pending
    }
}

impl<S: AsyncRead + Unpin> AsyncRead for IdleTimeout<S> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        match Pin::new(&mut this.inner).poll_read(cx, buf) {
            Poll::Ready(result) => {
                this.touch();
                Poll::Ready(result)
            }
            Poll::Pending => this.poll_deadline(cx),
        }
    }
}

impl<S: AsyncWrite + Unpin> AsyncWrite for IdleTimeout<S> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        match Pin::new(&mut this.inner).poll_write(cx, buf) {
            Poll::Ready(result) => {
                this.touch();
                Poll::Ready(result)
            }
            Poll::Pending => match this.poll_deadline(cx) {
                Poll::Ready(Err(e)) => Poll::Ready(Err(e)),
                _ => Poll::Pending,
            },
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn idle_read_times_out() {
        let (local, _remote) = tokio::io::duplex(64);
        let mut idle = IdleTimeout::new(local, Some(Duration::from_millis(100)));

        let start = std::time::Instant::now();
        let mut buf = [0u8; 16];
        let err = idle.read(&mut buf).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn activity_resets_deadline() {
        let (local, mut remote) = tokio::io::duplex(64);
        let mut idle = IdleTimeout::new(local, Some(Duration::from_millis(200)));

        // Feed activity at 120ms intervals: each read lands inside a freshly
        // armed deadline even though total elapsed time exceeds the timeout.
        let mut buf = [0u8; 16];
        for msg in [b"ping", b"pong", b"ping"] {
            tokio::time::sleep(Duration::from_millis(120)).await;
            remote.write_all(msg).await.unwrap();
            let n = idle.read(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], msg);
        }
    }

    #[tokio::test]
    async fn no_timeout_is_passthrough() {
        let (local, mut remote) = tokio::io::duplex(64);
        let mut idle = IdleTimeout::new(local, None);

        remote.write_all(b"hello").await.unwrap();
        let mut buf = [0u8; 16];
        let n = idle.read(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"hello");

        idle.write_all(b"world").await.unwrap();
        let mut out = [0u8; 16];
        let n = remote.read(&mut out).await.unwrap();
        assert_eq!(&out[..n], b"world");
    }
}
