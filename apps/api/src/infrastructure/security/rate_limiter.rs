use std::collections::HashMap;
use std::time::{Duration, Instant};

use redis::Client;
use tokio::sync::Mutex;
use uuid::Uuid;

enum Backend {
    Disabled,
    Redis(Client),
    /// Single-process windows for development runs and tests.
    Local(Mutex<HashMap<String, Instant>>),
}

/// One comment per post, per IP, per window. Without Redis every request passes.
pub struct CommentThrottle {
    backend: Backend,
    window_seconds: u64,
}

impl CommentThrottle {
    pub fn new(client: Option<Client>, window_seconds: u64) -> Self {
        Self {
            backend: client.map_or(Backend::Disabled, Backend::Redis),
            window_seconds,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None, 0)
    }

    pub fn in_memory(window_seconds: u64) -> Self {
        Self {
            backend: Backend::Local(Mutex::new(HashMap::new())),
            window_seconds,
        }
    }

    pub async fn allow(&self, post_id: Uuid, ip: &str) -> bool {
        if self.window_seconds == 0 {
            return true;
        }
        let key = format!("comment_rate:{}:{}", post_id, ip);

        match &self.backend {
            Backend::Disabled => true,
            Backend::Local(windows) => {
                let window = Duration::from_secs(self.window_seconds);
                let now = Instant::now();
                let mut windows = windows.lock().await;
                windows.retain(|_, started| now.duration_since(*started) < window);
                if windows.contains_key(&key) {
                    false
                } else {
                    windows.insert(key, now);
                    true
                }
            }
            Backend::Redis(client) => {
                let mut conn = match client.get_multiplexed_async_connection().await {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!(error = %e, "Redis unavailable, skipping comment throttle");
                        return true;
                    }
                };

                // SET NX only answers OK for the first writer inside the window.
                let set: Result<Option<String>, _> = redis::cmd("SET")
                    .arg(&key)
                    .arg(1)
                    .arg("NX")
                    .arg("EX")
                    .arg(self.window_seconds)
                    .query_async(&mut conn)
                    .await;

                match set {
                    Ok(reply) => reply.is_some(),
                    Err(e) => {
                        tracing::warn!(error = %e, "Comment throttle check failed");
                        true
                    }
                }
            }
        }
    }
}
