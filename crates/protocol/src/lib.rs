//! Shared event types for the Alohalytics device-info collector.
//!
//! The collector's only output boundary is [`EventSink::log_event`]; the
//! transport behind it (batching, disk queue, upload) lives in the analytics
//! layer and is out of scope here.

mod event;

pub use event::{EVENT_DEVICE_INFO, EVENT_IDS, Event, EventSink};
