use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::Error;

/// Run one attempt against a deadline and a cancellation token.
///
/// Whichever settles first wins. When the deadline or the token wins, the
/// attempt future is dropped before this returns, which aborts the
/// underlying HTTP exchange instead of leaving it running in the background.
pub async fn race<T, F>(deadline: Duration, cancel: &CancellationToken, attempt: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            trace!("attempt cancelled");
            Err(Error::Cancelled)
        }
        result = attempt => result,
        () = tokio::time::sleep(deadline) => {
            trace!(deadline_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX), "attempt timed out");
            Err(Error::Timeout { timeout: deadline })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slow_attempt_times_out() {
        let cancel = CancellationToken::new();
        let result: Result<(), Error> = race(Duration::from_millis(100), &cancel, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        match result {
            Err(Error::Timeout { timeout }) => assert_eq!(timeout, Duration::from_millis(100)),
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fast_attempt_wins() {
        let cancel = CancellationToken::new();
        let result = race(Duration::from_secs(15), &cancel, async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok::<_, Error>(7)
        })
        .await;
        assert!(matches!(result, Ok(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn attempt_errors_pass_through() {
        let cancel = CancellationToken::new();
        let result: Result<(), Error> = race(Duration::from_secs(1), &cancel, async {
            Err(Error::Http {
                status: 500,
                body: String::new(),
            })
        })
        .await;
        assert!(matches!(result, Err(Error::Http { status: 500, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_beats_everything() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = race(Duration::from_secs(1), &cancel, async { Ok::<_, Error>(()) }).await;
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    /// Sets its flag when dropped, standing in for an in-flight request.
    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_attempt_is_dropped() {
        let dropped = Arc::new(AtomicBool::new(false));
        let guard = DropFlag(Arc::clone(&dropped));
        let cancel = CancellationToken::new();

        let result: Result<(), Error> = race(Duration::from_millis(50), &cancel, async move {
            let _guard = guard;
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(Error::Timeout { .. })));
        assert!(dropped.load(Ordering::SeqCst), "attempt must not outlive the race");
    }
}
