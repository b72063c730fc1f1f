//! Single-writer load queue.
//!
//! Every organization-load runs as one unit of work on a dedicated
//! worker task; one unit completes before the next begins. This is the
//! entire mutual-exclusion mechanism for loader-driven mutation — the
//! same model `tokio_rusqlite` applies per connection, lifted to whole
//! loads.

use std::{future::Future, pin::Pin};

use tokio::sync::{mpsc, oneshot};

use crate::{Error, Result};

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pub struct LoadQueue {
  tx: mpsc::Sender<Job>,
}

impl LoadQueue {
  /// Spawn the worker task. The queue lives as long as any clone of the
  /// sender does; dropping the last [`LoadQueue`] shuts the worker down
  /// after the jobs already queued have finished.
  pub fn new() -> Self {
    let (tx, mut rx) = mpsc::channel::<Job>(32);
    tokio::spawn(async move {
      while let Some(job) = rx.recv().await {
        job.await;
      }
    });
    Self { tx }
  }

  /// Submit one unit of work and await its result. Units run strictly in
  /// submission order, one at a time.
  pub async fn run<F, T>(&self, work: F) -> Result<T>
  where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
  {
    let (done_tx, done_rx) = oneshot::channel();
    let job: Job = Box::pin(async move {
      let _ = done_tx.send(work.await);
    });

    self.tx.send(job).await.map_err(|_| Error::QueueClosed)?;
    done_rx.await.map_err(|_| Error::QueueClosed)
  }
}

impl Default for LoadQueue {
  fn default() -> Self { Self::new() }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::{sync::Arc, time::Duration};

  use tokio::sync::Mutex;

  use super::*;

  #[tokio::test]
  async fn returns_the_work_result() {
    let queue = LoadQueue::new();
    let answer = queue.run(async { 6 * 7 }).await.unwrap();
    assert_eq!(answer, 42);
  }

  #[tokio::test]
  async fn units_run_in_submission_order() {
    let queue = Arc::new(LoadQueue::new());
    let log: Arc<Mutex<Vec<&'static str>>> = Arc::default();

    // The first unit sleeps; if units overlapped, "fast" would finish
    // first.
    let slow = {
      let queue = queue.clone();
      let log = log.clone();
      tokio::spawn(async move {
        queue
          .run(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            log.lock().await.push("slow");
          })
          .await
          .unwrap();
      })
    };
    // Give the first submission a head start so ordering is fixed.
    tokio::time::sleep(Duration::from_millis(10)).await;
    let fast = {
      let queue = queue.clone();
      let log = log.clone();
      tokio::spawn(async move {
        queue
          .run(async move {
            log.lock().await.push("fast");
          })
          .await
          .unwrap();
      })
    };

    slow.await.unwrap();
    fast.await.unwrap();
    assert_eq!(*log.lock().await, vec!["slow", "fast"]);
  }
}
