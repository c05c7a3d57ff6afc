//! The two collection passes.
//!
//! Each pass wraps every property read in isolated failure handling: one
//! unreadable property never aborts the pass, and a pass that loses every
//! read still emits its event with an empty payload. `log_event` is
//! therefore called exactly twice per run.

use alohalytics_protocol::{EVENT_DEVICE_INFO, EVENT_IDS, EventSink};

use crate::accumulator::Accumulator;
use crate::diagnostics;
use crate::source::{CapabilityLevel, MNC_ZERO, PropertySource, SettingNamespace};

/// Known-bad placeholder hardware identifier shared by a class of broken
/// firmware builds. Must be treated as absent, never reported.
pub const HARDWARE_ID_SENTINEL: &str = "9774d56d682e549c";

/// Runs both passes sequentially against `source`, emitting one event per
/// pass through `sink`.
pub fn collect_all(source: &dyn PropertySource, sink: &dyn EventSink) {
    collect_ids(source, sink);
    collect_device_details(source, sink);
}

/// Identifier pass: advertising, hardware, and telephony identifiers.
pub fn collect_ids(source: &dyn PropertySource, sink: &dyn EventSink) {
    let mut ids = Accumulator::new();

    match source.advertising_id() {
        Ok(id) => ids.put("google_advertising_id", Some(id)),
        Err(err) => diagnostics::report_unavailable("google_advertising_id", &err),
    }

    match source.hardware_id() {
        // Sentinel values are dropped silently, not diagnosed.
        Ok(id) if id == HARDWARE_ID_SENTINEL => {}
        Ok(id) => ids.put("android_id", Some(id)),
        Err(err) => diagnostics::report_unavailable("android_id", &err),
    }

    match source.telephony_ids() {
        Ok(tel) => {
            ids.put("device_id", tel.device_id);
            ids.put("sim_serial_number", tel.sim_serial_number);
        }
        Err(err) => diagnostics::report_unavailable("telephony_ids", &err),
    }

    tracing::debug!(keys = ids.len(), "emitting identifier event");
    sink.log_event(EVENT_IDS, ids.into_pairs());
}

/// Device-detail pass: display, locale, system settings, build descriptors.
pub fn collect_device_details(source: &dyn PropertySource, sink: &dyn EventSink) {
    let mut kvs = Accumulator::new();
    let level = source.capability_level();

    match source.display_metrics() {
        Ok(m) => {
            kvs.put("display_density", Some(m.density.to_string()));
            kvs.put("display_density_dpi", Some(m.density_dpi.to_string()));
            kvs.put("display_scaled_density", Some(m.scaled_density.to_string()));
            kvs.put("display_width_pixels", Some(m.width_pixels.to_string()));
            kvs.put("display_height_pixels", Some(m.height_pixels.to_string()));
            kvs.put("display_xdpi", Some(m.xdpi.to_string()));
            kvs.put("display_ydpi", Some(m.ydpi.to_string()));
        }
        Err(err) => diagnostics::report_unavailable("display_metrics", &err),
    }

    match source.locale_config() {
        Ok(cfg) => {
            if level >= CapabilityLevel::GlobalSettings {
                kvs.put("dpi", Some(cfg.density_dpi.to_string()));
            }
            kvs.put("font_scale", Some(cfg.font_scale.to_string()));
            kvs.put("locale_country", Some(cfg.country));
            kvs.put("locale_language", Some(cfg.language));
            kvs.put("locale_variant", Some(cfg.variant));
            kvs.put("mcc", Some(cfg.mcc.to_string()));
            let mnc = if cfg.mnc == MNC_ZERO { 0 } else { cfg.mnc };
            kvs.put("mnc", Some(mnc.to_string()));
            if level >= CapabilityLevel::ScreenDp {
                kvs.put("screen_width_dp", Some(cfg.screen_width_dp.to_string()));
                kvs.put("screen_height_dp", Some(cfg.screen_height_dp.to_string()));
            }
        }
        Err(err) => diagnostics::report_unavailable("locale_config", &err),
    }

    for (ns, key) in settings_plan(level) {
        match source.system_setting(ns, key) {
            Ok(value) => kvs.put(key, Some(value)),
            Err(err) => diagnostics::report_unavailable(key, &err),
        }
    }

    match source.build_info() {
        Ok(build) => {
            kvs.put("build_version_sdk", Some(build.sdk_version.to_string()));
            kvs.put("build_brand", build.brand);
            if level >= CapabilityLevel::MultiAbi {
                for (i, abi) in build.abis.iter().enumerate() {
                    kvs.put(&format!("build_cpu_abi{}", i + 1), Some(abi.clone()));
                }
            } else {
                let mut abis = build.abis.into_iter();
                kvs.put("build_cpu_abi1", abis.next());
                kvs.put("build_cpu_abi2", abis.next());
            }
            kvs.put("build_device", build.device);
            kvs.put("build_display", build.display);
            kvs.put("build_fingerprint", build.fingerprint);
            kvs.put("build_hardware", build.hardware);
            kvs.put("build_host", build.host);
            kvs.put("build_id", build.id);
            kvs.put("build_manufacturer", build.manufacturer);
            kvs.put("build_model", build.model);
            kvs.put("build_product", build.product);
            kvs.put("build_serial", build.serial);
            kvs.put("build_tags", build.tags);
            kvs.put("build_time", build.time.map(|t| t.to_string()));
            kvs.put("build_type", build.build_type);
            kvs.put("build_user", build.user);
        }
        Err(err) => diagnostics::report_unavailable("build_info", &err),
    }

    tracing::debug!(keys = kvs.len(), "emitting device-detail event");
    sink.log_event(EVENT_DEVICE_INFO, kvs.into_pairs());
}

/// The settings to read, resolved once from the capability level.
///
/// Connectivity toggles moved to the global namespace at
/// `GlobalSettings`; before that they are split across the legacy system
/// and secure namespaces. The developer-mode flag lived in the secure
/// namespace for exactly one generation before moving to global.
fn settings_plan(level: CapabilityLevel) -> Vec<(SettingNamespace, &'static str)> {
    use SettingNamespace::{Global, Secure, System};

    let mut plan: Vec<(SettingNamespace, &'static str)> = Vec::new();

    if level >= CapabilityLevel::GlobalSettings {
        plan.extend([
            (Global, "airplane_mode_on"),
            (Global, "always_finish_activities"),
            (Global, "auto_time"),
            (Global, "auto_time_zone"),
            (Global, "bluetooth_on"),
            (Global, "data_roaming"),
            (Global, "http_proxy"),
        ]);
    } else {
        plan.extend([
            (System, "airplane_mode_on"),
            (System, "always_finish_activities"),
            (System, "auto_time"),
            (System, "auto_time_zone"),
            (Secure, "bluetooth_on"),
            (Secure, "data_roaming"),
            (Secure, "http_proxy"),
        ]);
    }

    plan.extend([
        (Secure, "accessibility_enabled"),
        (Secure, "install_non_market_apps"),
    ]);

    if level == CapabilityLevel::DevSettings {
        plan.push((Secure, "development_settings_enabled"));
    } else if level > CapabilityLevel::DevSettings {
        plan.push((Global, "development_settings_enabled"));
    }

    plan.extend([
        (System, "date_format"),
        (System, "screen_off_timeout"),
        (System, "time_12_24"),
        (Secure, "mock_location"),
    ]);

    if level >= CapabilityLevel::LocationMode {
        plan.push((Secure, "location_mode"));
    }

    plan
}
