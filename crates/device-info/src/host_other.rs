//! Fallback property source for platforms without a dedicated backend.
//!
//! Only compile-time build metadata is available; every other capability
//! reports [`PropertyUnavailable`].

use crate::source::{
    BuildInfo, CapabilityLevel, DisplayMetrics, LocaleConfig, PropertySource,
    PropertyUnavailable, SettingNamespace, TelephonyIds,
};

#[derive(Debug, Default)]
pub struct HostPropertySource;

impl HostPropertySource {
    pub fn new() -> Self {
        Self
    }
}

fn unsupported(what: &str) -> PropertyUnavailable {
    PropertyUnavailable::HardwareAbsent(what.to_string())
}

impl PropertySource for HostPropertySource {
    fn capability_level(&self) -> CapabilityLevel {
        CapabilityLevel::MultiAbi
    }

    fn advertising_id(&self) -> Result<String, PropertyUnavailable> {
        Err(unsupported("advertising id"))
    }

    fn hardware_id(&self) -> Result<String, PropertyUnavailable> {
        Err(unsupported("hardware id"))
    }

    fn telephony_ids(&self) -> Result<TelephonyIds, PropertyUnavailable> {
        Err(unsupported("telephony"))
    }

    fn display_metrics(&self) -> Result<DisplayMetrics, PropertyUnavailable> {
        Err(unsupported("display metrics"))
    }

    fn locale_config(&self) -> Result<LocaleConfig, PropertyUnavailable> {
        Err(unsupported("locale"))
    }

    fn system_setting(
        &self,
        _ns: SettingNamespace,
        _key: &str,
    ) -> Result<String, PropertyUnavailable> {
        Err(unsupported("system settings"))
    }

    fn build_info(&self) -> Result<BuildInfo, PropertyUnavailable> {
        Ok(BuildInfo {
            abis: vec![std::env::consts::ARCH.to_string()],
            hardware: Some(std::env::consts::ARCH.to_string()),
            host: hostname::get().ok().and_then(|h| h.into_string().ok()),
            build_type: Some(std::env::consts::OS.to_string()),
            ..Default::default()
        })
    }
}
