use anyhow::Result;
use floodgate::RateLimiter;
use std::time::SystemTime;
use tokio::sync::{mpsc, oneshot};

/// Message types for the limiter actor
pub enum LimiterMessage {
    Check {
        key: String,
        now: SystemTime,
        reply: oneshot::Sender<bool>,
    },
    Stats {
        reply: oneshot::Sender<LimiterStats>,
    },
}

/// Point-in-time view of the registry, for the metrics endpoint
#[derive(Debug, Clone, Copy)]
pub struct LimiterStats {
    /// Keys currently holding a bucket
    pub active_keys: usize,
    /// Buckets evicted since startup
    pub evictions: u64,
}

/// Handle to communicate with the limiter actor
#[derive(Clone)]
pub struct LimiterHandle {
    tx: mpsc::Sender<LimiterMessage>,
}

impl LimiterHandle {
    /// Admit or reject one request for `key`.
    pub async fn check(&self, key: &str, now: SystemTime) -> Result<bool> {
        let (reply, rx) = oneshot::channel();

        self.tx
            .send(LimiterMessage::Check {
                key: key.to_string(),
                now,
                reply,
            })
            .await
            .map_err(|_| anyhow::anyhow!("rate limiter actor has shut down"))?;

        rx.await
            .map_err(|_| anyhow::anyhow!("rate limiter actor dropped the reply channel"))
    }

    /// Fetch the registry's current statistics.
    pub async fn stats(&self) -> Result<LimiterStats> {
        let (reply, rx) = oneshot::channel();

        self.tx
            .send(LimiterMessage::Stats { reply })
            .await
            .map_err(|_| anyhow::anyhow!("rate limiter actor has shut down"))?;

        rx.await
            .map_err(|_| anyhow::anyhow!("rate limiter actor dropped the reply channel"))
    }
}

/// Spawn the actor that owns `limiter`, returning a cloneable handle.
///
/// The registry lives on a single task; every admission check flows through
/// its mailbox, which serializes lookup, insert-if-absent, and bucket
/// mutation without any lock.
pub fn spawn(limiter: RateLimiter, buffer_size: usize) -> LimiterHandle {
    let (tx, rx) = mpsc::channel(buffer_size);

    tokio::spawn(run_actor(rx, limiter));

    LimiterHandle { tx }
}

async fn run_actor(mut rx: mpsc::Receiver<LimiterMessage>, mut limiter: RateLimiter) {
    while let Some(msg) = rx.recv().await {
        match msg {
            LimiterMessage::Check { key, now, reply } => {
                let admitted = limiter.check(&key, now);
                // Ignore send errors - the requester may have timed out
                let _ = reply.send(admitted);
            }
            LimiterMessage::Stats { reply } => {
                let _ = reply.send(LimiterStats {
                    active_keys: limiter.len(),
                    evictions: limiter.swept_total(),
                });
            }
        }
    }

    tracing::info!("rate limiter actor shutting down");
}
