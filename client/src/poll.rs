//! Bounded finalization polling.
//!
//! The probe is an explicit completion predicate supplied by the caller
//! (e.g. "record exists and its reveal flag is set"), not a guess about
//! how many sightings mean done. Fixed interval, hard wall-clock bound.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::error::Error;

/// Repeats `probe` until it yields a value, an error, or `timeout` elapses.
///
/// The probe always runs at least once. Timing out maps to
/// [`Error::FinalizationTimeout`], which is recoverable by polling again.
pub(crate) async fn poll_until<T, F, Fut>(
    interval: Duration,
    timeout: Duration,
    mut probe: F,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, Error>>,
{
    let started = Instant::now();
    loop {
        if let Some(value) = probe().await? {
            return Ok(value);
        }
        if started.elapsed() >= timeout {
            return Err(Error::FinalizationTimeout {
                waited_ms: started.elapsed().as_millis() as u64,
            });
        }
        sleep(interval).await;
    }
}
