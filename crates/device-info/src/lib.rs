//! One-shot, throttled device/environment metadata collector.
//!
//! Device metadata rarely changes, so collecting it on every app start
//! wastes battery and traffic. This crate runs at most one collection per
//! 30-day window: the scheduler checks a persisted timestamp, marks it
//! synchronously when due, and runs two best-effort passes (identifiers,
//! device details) on the blocking pool, each emitting one event through
//! the [`EventSink`] boundary. No failure in either pass ever reaches the
//! caller.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use alohalytics_device_info::{HostPropertySource, JsonPrefStore, Scheduler};
//! # use std::collections::HashMap;
//! # struct MySink;
//! # impl alohalytics_protocol::EventSink for MySink {
//! #     fn log_event(&self, _name: &str, _payload: HashMap<String, String>) {}
//! # }
//!
//! # async fn run() {
//! let scheduler = Scheduler::new(
//!     JsonPrefStore::open(JsonPrefStore::default_path()),
//!     Arc::new(HostPropertySource::new()),
//!     Arc::new(MySink),
//! );
//! scheduler.collect_if_due_now().await;
//! # }
//! ```

mod accumulator;
mod collector;
mod diagnostics;
mod scheduler;
mod source;
mod throttle;

#[cfg(target_os = "linux")]
#[path = "host_linux.rs"]
mod host;

#[cfg(not(target_os = "linux"))]
#[path = "host_other.rs"]
mod host;

pub use accumulator::Accumulator;
pub use collector::{HARDWARE_ID_SENTINEL, collect_all, collect_device_details, collect_ids};
pub use diagnostics::{debug_mode, set_debug_mode};
pub use host::HostPropertySource;
pub use scheduler::{Scheduler, now_millis};
pub use source::{
    BuildInfo, CapabilityLevel, DisplayMetrics, LocaleConfig, MNC_ZERO, PropertySource,
    PropertyUnavailable, SettingNamespace, TelephonyIds,
};
pub use throttle::{
    JsonPrefStore, MemoryPrefStore, PREF_LAST_COLLECTED, PrefStore, StoreError, THROTTLE_WINDOW_MS,
    ThrottleGate,
};

pub use alohalytics_protocol::{EVENT_DEVICE_INFO, EVENT_IDS, Event, EventSink};
