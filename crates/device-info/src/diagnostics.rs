//! Process-wide diagnostic flag.
//!
//! Property-read failures are routine (missing permissions, absent
//! hardware) and stay silent in production. Enabling debug mode surfaces
//! them through `tracing` without changing collection behavior.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::source::PropertyUnavailable;

static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

/// Toggles verbose logging of property-read failures.
pub fn set_debug_mode(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::Relaxed);
}

pub fn debug_mode() -> bool {
    DEBUG_MODE.load(Ordering::Relaxed)
}

/// Logs one absorbed read failure when debug mode is on.
pub(crate) fn report_unavailable(property: &str, err: &PropertyUnavailable) {
    if debug_mode() {
        tracing::warn!(property, %err, "property read failed, omitting");
    }
}
