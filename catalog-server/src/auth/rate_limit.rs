//! 管理接口限流
//!
//! 固定窗口计数器，按客户端标识分桶 (`DashMap`)。
//! 过期窗口在访问时重置；桶数量超过阈值时清扫过期项，每个窗口周期最多一次。

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// 超过此数量的桶时触发清扫
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window rate limiter
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    buckets: DashMap<String, Window>,
    origin: Instant,
    /// 上次清扫时间，相对 `origin` 的毫秒数
    last_sweep_ms: AtomicU64,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit: limit.max(1),
            window,
            buckets: DashMap::new(),
            origin: Instant::now(),
            last_sweep_ms: AtomicU64::new(0),
        }
    }

    /// Count one request for `client`
    ///
    /// Returns `Err(retry_after_secs)` once the window quota is used up.
    pub fn check(&self, client: &str) -> Result<(), u64> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> Result<(), u64> {
        if self.buckets.len() > SWEEP_THRESHOLD && self.claim_sweep(now) {
            self.sweep(now);
        }

        let mut entry = self.buckets.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.limit {
            let elapsed = now.duration_since(entry.started);
            let remaining = self.window.saturating_sub(elapsed);
            // 向上取整，至少 1 秒
            let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            return Err(secs.max(1));
        }

        entry.count += 1;
        Ok(())
    }

    /// 距上次清扫不足一个窗口周期时返回 false；并发调用只有一个能拿到
    fn claim_sweep(&self, now: Instant) -> bool {
        let now_ms = now.saturating_duration_since(self.origin).as_millis() as u64;
        let window_ms = self.window.as_millis() as u64;
        let last = self.last_sweep_ms.load(Ordering::Relaxed);
        if now_ms.saturating_sub(last) < window_ms {
            return false;
        }
        self.last_sweep_ms
            .compare_exchange(last, now_ms, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
    }

    /// Drop all expired windows
    pub fn sweep(&self, now: Instant) {
        let window = self.window;
        self.buckets
            .retain(|_, w| now.duration_since(w.started) < window);
    }

    /// Number of tracked clients
    pub fn tracked(&self) -> usize {
        self.buckets.len()
    }
}
