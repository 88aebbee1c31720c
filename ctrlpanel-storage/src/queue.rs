//! Ordered outbound write queue.
//!
//! One worker task drains a FIFO channel, so writes leave in the order they
//! were enqueued. Each write runs on the blocking pool under a timeout; a
//! write that overruns is abandoned and logged, never retried. Abandoned
//! writes keep running in the background, so every write carries a sequence
//! number and the backend is only touched when that number is newer than
//! the last one applied for the same key.

use crate::backend::KeyValueBackend;
use crate::error::{StorageError, StorageResult};
use crate::gateway::GatewayConfig;
use crate::relock;
use ctrlpanel_model::CollectionKey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

enum WriteOp {
    Put {
        key: CollectionKey,
        value: String,
        seq: u64,
    },
    Flush(oneshot::Sender<()>),
}

/// Handle for enqueuing writes. Dropping every handle stops the worker once
/// the queue drains.
pub struct WriteQueue {
    tx: mpsc::Sender<WriteOp>,
    next_seq: Mutex<u64>,
}

impl WriteQueue {
    pub(crate) fn spawn_on(
        runtime: &Handle,
        backend: Arc<dyn KeyValueBackend>,
        config: &GatewayConfig,
    ) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        runtime.spawn(run_writer(rx, backend, config.write_timeout()));
        Self {
            tx,
            next_seq: Mutex::new(0),
        }
    }

    /// Enqueues a write without waiting for it.
    ///
    /// Fails only when the queue is full or the worker is gone.
    pub fn enqueue(&self, key: CollectionKey, value: String) -> StorageResult<()> {
        // Held across the send so channel order matches sequence order.
        let mut next_seq = relock(self.next_seq.lock());
        *next_seq += 1;
        let seq = *next_seq;
        self.tx
            .try_send(WriteOp::Put { key, value, seq })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => StorageError::QueueFull(key),
                mpsc::error::TrySendError::Closed(_) => StorageError::QueueClosed,
            })
    }

    /// Resolves once every write enqueued before this call has completed or
    /// been abandoned.
    pub async fn flush(&self) -> StorageResult<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(WriteOp::Flush(done_tx))
            .await
            .map_err(|_| StorageError::QueueClosed)?;
        done_rx.await.map_err(|_| StorageError::QueueClosed)
    }
}

async fn run_writer(
    mut rx: mpsc::Receiver<WriteOp>,
    backend: Arc<dyn KeyValueBackend>,
    write_timeout: Duration,
) {
    let applied: Arc<Mutex<HashMap<CollectionKey, u64>>> = Arc::default();

    while let Some(op) = rx.recv().await {
        match op {
            WriteOp::Put { key, value, seq } => {
                let backend = Arc::clone(&backend);
                let applied = Arc::clone(&applied);
                let task = tokio::task::spawn_blocking(move || {
                    apply_write(backend.as_ref(), &applied, key, &value, seq)
                });

                match tokio::time::timeout(write_timeout, task).await {
                    Ok(Ok(Ok(true))) => debug!(%key, seq, "write applied"),
                    Ok(Ok(Ok(false))) => debug!(%key, seq, "stale write skipped"),
                    Ok(Ok(Err(e))) => warn!(%key, seq, error = %e, "write failed"),
                    Ok(Err(e)) => warn!(%key, seq, error = %e, "write task panicked"),
                    Err(_) => warn!(
                        %key,
                        seq,
                        error = %StorageError::Timeout(key),
                        "write abandoned"
                    ),
                }
            }
            WriteOp::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("write queue closed");
}

fn apply_write(
    backend: &dyn KeyValueBackend,
    applied: &Mutex<HashMap<CollectionKey, u64>>,
    key: CollectionKey,
    value: &str,
    seq: u64,
) -> StorageResult<bool> {
    let mut applied = relock(applied.lock());
    if applied.get(&key).is_some_and(|&last| last >= seq) {
        return Ok(false);
    }
    backend.put(key.as_str(), value)?;
    applied.insert(key, seq);
    Ok(true)
}
