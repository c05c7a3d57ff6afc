//! Throttled one-shot dispatch.
//!
//! One entry point, no result, no cancellation: if a run is due, the
//! timestamp is persisted on the calling thread first (suppressing any
//! second trigger inside the window, even while the pass is in flight),
//! then both passes run on the blocking pool. Completion is observed only
//! through the sink.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use alohalytics_protocol::EventSink;
use tokio::sync::Mutex;

use crate::collector;
use crate::source::PropertySource;
use crate::throttle::{PrefStore, ThrottleGate};

/// Schedules throttled device-info collection runs.
pub struct Scheduler<S: PrefStore> {
    gate: Mutex<ThrottleGate<S>>,
    source: Arc<dyn PropertySource>,
    sink: Arc<dyn EventSink>,
}

impl<S: PrefStore> Scheduler<S> {
    pub fn new(store: S, source: Arc<dyn PropertySource>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            gate: Mutex::new(ThrottleGate::new(store)),
            source,
            sink,
        }
    }

    /// Triggers a collection run if the throttle window has elapsed.
    ///
    /// Never blocks on collection and cannot fail. On the first-ever
    /// trigger the timestamp is seeded and no run happens; the next run is
    /// due a full window later. Must be called from within a tokio
    /// runtime.
    pub async fn collect_if_due(&self, now_ms: i64) {
        let mut gate = self.gate.lock().await;
        if !gate.should_collect(now_ms) {
            gate.seed_if_unset(now_ms);
            tracing::info!("device-info collection not due, skipping");
            return;
        }

        // Persist before handing off so a rapid second trigger is
        // suppressed even though the pass has not finished.
        gate.mark_collected(now_ms);
        drop(gate);

        tracing::info!("device-info collection due, dispatching");
        let source = Arc::clone(&self.source);
        let sink = Arc::clone(&self.sink);
        // Identifier retrieval may perform blocking I/O, so the whole run
        // goes to the blocking pool. Fire and forget: no handle kept.
        tokio::task::spawn_blocking(move || {
            collector::collect_all(source.as_ref(), sink.as_ref());
        });
    }

    /// Convenience wrapper using the system clock.
    pub async fn collect_if_due_now(&self) {
        self.collect_if_due(now_millis()).await;
    }
}

/// Current wall-clock time in milliseconds since the epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
