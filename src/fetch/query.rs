//! Feed query - one background task per data source
//!
//! The task owns the fetch loop: initial fetch, retries with backoff,
//! scheduled refetch and trigger handling. Consumers only ever read
//! snapshots from a watch channel and send triggers; they never mutate the
//! snapshot themselves.
//!
//! Disposal aborts the task (cancelling any in-flight fetch or retry sleep)
//! and raises a flag that the task checks before every publish, so a result
//! that resolves after disposal is dropped on the floor.

use super::policy::FetchPolicy;
use super::snapshot::{FetchSnapshot, FetchState};
use chrono::Utc;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, sleep_until, Instant};

/// External events that may cause a refetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    /// Manual refresh; served from cache while the result is fresh
    Refresh,
    /// Network came back; refetch now regardless of staleness
    Reconnect,
    /// Host regained foreground focus; never refetches
    FocusGained,
}

/// Why a fetch cycle started (for logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchReason {
    Initial,
    Interval,
    Refresh,
    Reconnect,
}

/// Handle to a running feed query
pub struct FeedQuery<T> {
    name: String,
    snapshots: watch::Receiver<FetchSnapshot<T>>,
    triggers: mpsc::UnboundedSender<FetchTrigger>,
    task: Option<JoinHandle<()>>,
    disposed: Arc<AtomicBool>,
}

impl<T> FeedQuery<T>
where
    T: Send + Sync + 'static,
{
    /// Start the fetch loop for `fetch` under `policy`
    ///
    /// Must be called inside a tokio runtime. The first fetch starts
    /// immediately; the snapshot is Loading until it settles.
    pub fn spawn<F, Fut>(name: impl Into<String>, policy: FetchPolicy, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Vec<T>>> + Send + 'static,
    {
        let name = name.into();
        let (tx, snapshots) = watch::channel(FetchSnapshot::loading());
        let (triggers, trigger_rx) = mpsc::unbounded_channel();
        let disposed = Arc::new(AtomicBool::new(false));

        let worker = Worker {
            name: name.clone(),
            policy,
            fetch,
            tx,
            disposed: disposed.clone(),
            last_success: None,
        };
        let task = tokio::spawn(worker.run(trigger_rx));

        Self {
            name,
            snapshots,
            triggers,
            task: Some(task),
            disposed,
        }
    }
}

impl<T> FeedQuery<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latest snapshot (cheap: items are shared)
    pub fn snapshot(&self) -> FetchSnapshot<T> {
        self.snapshots.borrow().clone()
    }

    /// Receiver for awaiting snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<FetchSnapshot<T>> {
        self.snapshots.clone()
    }

    pub fn trigger(&self, trigger: FetchTrigger) {
        if self.is_disposed() {
            return;
        }
        // A finished task just means there is nobody left to refetch
        let _ = self.triggers.send(trigger);
    }

    pub fn refresh(&self) {
        self.trigger(FetchTrigger::Refresh);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Cancel the fetch loop, its retry timers and any in-flight request
    pub fn dispose(&mut self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        tracing::debug!(feed = %self.name, "feed query disposed");
    }
}

impl<T> Drop for FeedQuery<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Worker
// ─────────────────────────────────────────────────────────────────────────────

struct Worker<T, F> {
    name: String,
    policy: FetchPolicy,
    fetch: F,
    tx: watch::Sender<FetchSnapshot<T>>,
    disposed: Arc<AtomicBool>,
    last_success: Option<Instant>,
}

impl<T, F, Fut> Worker<T, F>
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Vec<T>>> + Send + 'static,
{
    async fn run(mut self, mut triggers: mpsc::UnboundedReceiver<FetchTrigger>) {
        let mut reason = FetchReason::Initial;

        loop {
            self.fetch_cycle(reason).await;

            // Triggers that arrived mid-fetch collapse into at most one follow-up
            if let Some(follow_up) = self.drain_pending(&mut triggers) {
                reason = follow_up;
                continue;
            }

            let next_scheduled = self.schedule_next();
            reason = loop {
                let scheduled = async move {
                    match next_scheduled {
                        Some(at) => sleep_until(at).await,
                        None => std::future::pending::<()>().await,
                    }
                };

                let picked = tokio::select! {
                    _ = scheduled => Some(FetchReason::Interval),
                    trigger = triggers.recv() => match trigger {
                        Some(trigger) => self.reason_for(trigger),
                        // Every handle is gone
                        None => return,
                    },
                };
                if let Some(picked) = picked {
                    break picked;
                }
            };
        }
    }

    /// Fold queued triggers into one reason; Reconnect wins over Refresh
    fn drain_pending(
        &self,
        triggers: &mut mpsc::UnboundedReceiver<FetchTrigger>,
    ) -> Option<FetchReason> {
        let mut follow_up = None;
        while let Ok(trigger) = triggers.try_recv() {
            match self.reason_for(trigger) {
                Some(FetchReason::Reconnect) => follow_up = Some(FetchReason::Reconnect),
                Some(reason) if follow_up.is_none() => follow_up = Some(reason),
                _ => {}
            }
        }
        follow_up
    }

    fn schedule_next(&self) -> Option<Instant> {
        self.policy
            .refetch_interval
            .map(|interval| Instant::now() + interval)
    }

    /// Decide whether a trigger starts a fetch
    fn reason_for(&self, trigger: FetchTrigger) -> Option<FetchReason> {
        match trigger {
            FetchTrigger::Refresh => {
                let fresh = self
                    .last_success
                    .is_some_and(|at| !self.policy.is_stale(at.elapsed()));
                if fresh {
                    tracing::debug!(feed = %self.name, "refresh skipped, cached result is fresh");
                    None
                } else {
                    Some(FetchReason::Refresh)
                }
            }
            FetchTrigger::Reconnect if self.policy.refetch_on_reconnect => {
                Some(FetchReason::Reconnect)
            }
            FetchTrigger::Reconnect => {
                tracing::trace!(feed = %self.name, "reconnect refetch disabled");
                None
            }
            FetchTrigger::FocusGained => {
                tracing::trace!(feed = %self.name, "focus refetch disabled");
                None
            }
        }
    }

    /// One fetch with retries; settles the snapshot to Ready or Error
    async fn fetch_cycle(&mut self, reason: FetchReason) {
        tracing::debug!(feed = %self.name, ?reason, "fetch started");
        self.publish(|snapshot| {
            snapshot.is_fetching = true;
            // Ready data stays visible during a background refetch
            if !matches!(snapshot.state, FetchState::Ready(_)) {
                snapshot.state = FetchState::Loading;
            }
        });

        let mut attempt = 0u32;
        loop {
            match (self.fetch)().await {
                Ok(items) => {
                    tracing::info!(feed = %self.name, items = items.len(), "fetch succeeded");
                    self.last_success = Some(Instant::now());
                    self.publish(|snapshot| *snapshot = FetchSnapshot::ready(items, Utc::now()));
                    return;
                }
                Err(e) if attempt < self.policy.max_retries => {
                    let delay = self.policy.retry_delay(attempt);
                    attempt += 1;
                    tracing::warn!(
                        feed = %self.name,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "fetch failed, retrying: {:#}",
                        e
                    );
                    sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!(
                        feed = %self.name,
                        attempts = attempt + 1,
                        "fetch failed, giving up: {:#}",
                        e
                    );
                    // The cached items are gone, so nothing counts as fresh
                    self.last_success = None;
                    self.publish(|snapshot| *snapshot = FetchSnapshot::error(Utc::now()));
                    return;
                }
            }
        }
    }

    fn publish(&self, modify: impl FnOnce(&mut FetchSnapshot<T>)) {
        if self.disposed.load(Ordering::Acquire) {
            return;
        }
        self.tx.send_modify(modify);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records when each attempt started
    #[derive(Clone, Default)]
    struct Attempts(Arc<Mutex<Vec<Instant>>>);

    impl Attempts {
        fn record(&self) -> usize {
            let mut times = self.0.lock().unwrap();
            times.push(Instant::now());
            times.len()
        }

        fn count(&self) -> usize {
            self.0.lock().unwrap().len()
        }

        fn offsets_ms(&self) -> Vec<u64> {
            let times = self.0.lock().unwrap();
            let first = times[0];
            times
                .iter()
                .map(|t| t.duration_since(first).as_millis() as u64)
                .collect()
        }
    }

    fn quiet_policy() -> FetchPolicy {
        FetchPolicy::default().with_refetch_interval(None)
    }

    async fn wait_until(query: &FeedQuery<u32>, done: impl Fn(&FetchSnapshot<u32>) -> bool) {
        let mut rx = query.subscribe();
        rx.wait_for(|s| done(s)).await.expect("feed task ended");
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_fetch_becomes_ready() {
        let query = FeedQuery::spawn("test", quiet_policy(), || async { Ok(vec![1u32, 2, 3]) });
        assert!(query.snapshot().is_loading());

        wait_until(&query, |s| s.is_ready()).await;
        let snapshot = query.snapshot();
        assert_eq!(snapshot.items(), Some(&[1u32, 2, 3][..]));
        assert!(snapshot.fetched_at.is_some());
        assert!(!snapshot.is_fetching);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_then_terminal_error() {
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let query = FeedQuery::spawn("test", quiet_policy().with_retries(3), move || {
            recorder.record();
            async { Err::<Vec<u32>, _>(anyhow!("backend down")) }
        });

        wait_until(&query, |s| s.is_error()).await;
        assert_eq!(attempts.offsets_ms(), vec![0, 1000, 3000, 7000]);
        assert!(query.snapshot().items().is_none());

        // No further automatic retry once the error is surfaced
        sleep(Duration::from_secs(600)).await;
        assert_eq!(attempts.count(), 4);
        assert!(query.snapshot().is_error());
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_within_retry_budget() {
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let query = FeedQuery::spawn("test", quiet_policy().with_retries(2), move || {
            let n = recorder.record();
            async move {
                if n < 3 {
                    Err(anyhow!("flaky"))
                } else {
                    Ok(vec![7u32])
                }
            }
        });

        wait_until(&query, |s| s.is_ready()).await;
        assert_eq!(attempts.count(), 3);
        assert_eq!(query.snapshot().items(), Some(&[7u32][..]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_failure_discards_previous_items() {
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let query = FeedQuery::spawn("test", quiet_policy().with_retries(1), move || {
            let n = recorder.record();
            async move {
                if n == 1 {
                    Ok(vec![1u32, 2])
                } else {
                    Err(anyhow!("gone"))
                }
            }
        });
        wait_until(&query, |s| s.is_ready()).await;

        query.refresh();
        wait_until(&query, |s| s.is_error()).await;
        let snapshot = query.snapshot();
        assert!(snapshot.items().is_none());
        assert!(!snapshot.has_items());
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_refetch_keeps_ready_items_visible() {
        let (release_tx, release_rx) = tokio::sync::watch::channel(false);
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let query = FeedQuery::spawn("test", quiet_policy(), move || {
            let n = recorder.record();
            let mut release = release_rx.clone();
            async move {
                if n > 1 {
                    release.wait_for(|go| *go).await.ok();
                }
                Ok(vec![n as u32])
            }
        });
        wait_until(&query, |s| s.is_ready()).await;

        query.refresh();
        wait_until(&query, |s| s.is_fetching).await;
        let during = query.snapshot();
        assert!(during.is_ready());
        assert_eq!(during.items(), Some(&[1u32][..]));

        release_tx.send_replace(true);
        wait_until(&query, |s| !s.is_fetching).await;
        assert_eq!(query.snapshot().items(), Some(&[2u32][..]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_respects_staleness() {
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let policy = quiet_policy().with_stale_time(Duration::from_secs(25));
        let query = FeedQuery::spawn("test", policy, move || {
            recorder.record();
            async { Ok(vec![1u32]) }
        });
        wait_until(&query, |s| s.is_ready()).await;

        query.refresh();
        sleep(Duration::from_secs(1)).await;
        assert_eq!(attempts.count(), 1, "fresh result must be served from cache");

        sleep(Duration::from_secs(30)).await;
        query.refresh();
        sleep(Duration::from_millis(10)).await;
        assert_eq!(attempts.count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_bypasses_staleness() {
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let policy = quiet_policy().with_stale_time(Duration::from_secs(3600));
        let query = FeedQuery::spawn("test", policy, move || {
            recorder.record();
            async { Ok(vec![1u32]) }
        });
        wait_until(&query, |s| s.is_ready()).await;

        query.trigger(FetchTrigger::Reconnect);
        sleep(Duration::from_millis(10)).await;
        assert_eq!(attempts.count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_never_refetches() {
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let query = FeedQuery::spawn("test", quiet_policy(), move || {
            recorder.record();
            async { Ok(vec![1u32]) }
        });
        wait_until(&query, |s| s.is_ready()).await;

        for _ in 0..5 {
            query.trigger(FetchTrigger::FocusGained);
        }
        sleep(Duration::from_secs(60)).await;
        assert_eq!(attempts.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_refetch_ignores_staleness() {
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let policy = FetchPolicy::default()
            .with_refetch_interval(Some(Duration::from_secs(30)))
            .with_stale_time(Duration::from_secs(3600));
        let query = FeedQuery::spawn("test", policy, move || {
            recorder.record();
            async { Ok(vec![1u32]) }
        });
        wait_until(&query, |s| s.is_ready()).await;

        sleep(Duration::from_secs(95)).await;
        assert_eq!(attempts.offsets_ms(), vec![0, 30_000, 60_000, 90_000]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_during_inflight_fetch_never_publishes() {
        let query_fetch = || async {
            sleep(Duration::from_secs(1)).await;
            Ok(vec![1u32])
        };
        let mut query = FeedQuery::spawn("test", quiet_policy(), query_fetch);

        // Let the fetch start, then only watch for what happens afterwards
        sleep(Duration::from_millis(100)).await;
        let mut rx = query.subscribe();
        rx.borrow_and_update();

        sleep(Duration::from_millis(400)).await;
        query.dispose();
        sleep(Duration::from_secs(5)).await;

        assert!(query.is_disposed());
        assert!(query.snapshot().is_loading());
        assert!(!rx.has_changed().unwrap_or(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_cancels_retry_timers() {
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let mut query = FeedQuery::spawn("test", quiet_policy().with_retries(5), move || {
            recorder.record();
            async { Err::<Vec<u32>, _>(anyhow!("down")) }
        });

        // First attempt fails, worker is now sleeping 1s before retrying
        sleep(Duration::from_millis(500)).await;
        assert_eq!(attempts.count(), 1);
        query.dispose();

        sleep(Duration::from_secs(120)).await;
        assert_eq!(attempts.count(), 1);
        assert!(query.snapshot().is_loading());

        // Triggers after disposal go nowhere
        query.trigger(FetchTrigger::Reconnect);
        sleep(Duration::from_secs(1)).await;
        assert_eq!(attempts.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_after_terminal_error_fetches_again() {
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let policy = quiet_policy()
            .with_stale_time(Duration::from_secs(25))
            .with_retries(0);
        let query = FeedQuery::spawn("test", policy, move || {
            let n = recorder.record();
            async move {
                if n == 2 {
                    Err(anyhow!("outage"))
                } else {
                    Ok(vec![n as u32])
                }
            }
        });
        wait_until(&query, |s| s.is_ready()).await;

        query.trigger(FetchTrigger::Reconnect);
        wait_until(&query, |s| s.is_error()).await;
        assert_eq!(attempts.count(), 2);

        // Well inside the stale window of the first success
        sleep(Duration::from_secs(2)).await;
        query.refresh();
        wait_until(&query, |s| s.is_ready()).await;
        assert_eq!(attempts.count(), 3);
        assert_eq!(query.snapshot().items(), Some(&[3u32][..]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnects_during_inflight_fetch_collapse_to_one() {
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let query = FeedQuery::spawn("test", quiet_policy(), move || {
            recorder.record();
            async {
                sleep(Duration::from_secs(5)).await;
                Ok(vec![1u32])
            }
        });

        sleep(Duration::from_secs(1)).await;
        for _ in 0..5 {
            query.trigger(FetchTrigger::Reconnect);
        }
        sleep(Duration::from_secs(60)).await;

        assert_eq!(attempts.offsets_ms(), vec![0, 5000]);
        assert!(query.snapshot().is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refreshes_during_inflight_fetch_respect_staleness() {
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let policy = quiet_policy().with_stale_time(Duration::from_secs(3600));
        let query = FeedQuery::spawn("test", policy, move || {
            recorder.record();
            async {
                sleep(Duration::from_secs(5)).await;
                Ok(vec![1u32])
            }
        });

        sleep(Duration::from_secs(1)).await;
        for _ in 0..3 {
            query.refresh();
        }
        query.trigger(FetchTrigger::FocusGained);
        sleep(Duration::from_secs(60)).await;

        // The fetch that was in flight already produced a fresh result
        assert_eq!(attempts.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_ignored_when_disabled() {
        let attempts = Attempts::default();
        let recorder = attempts.clone();
        let policy = FetchPolicy {
            refetch_on_reconnect: false,
            ..quiet_policy()
        };
        let query = FeedQuery::spawn("test", policy, move || {
            recorder.record();
            async { Ok(vec![1u32]) }
        });
        wait_until(&query, |s| s.is_ready()).await;

        query.trigger(FetchTrigger::Reconnect);
        sleep(Duration::from_secs(60)).await;
        assert_eq!(attempts.count(), 1);
    }
}
