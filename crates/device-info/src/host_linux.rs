//! Best-effort property source for desktop Linux.
//!
//! Reads whatever stable identity and build metadata the host exposes
//! (`/etc/machine-id`, DMI sysfs, `/etc/os-release`, locale environment).
//! Mobile-only capabilities (advertising id, telephony, the settings
//! provider, display metrics) fail with [`PropertyUnavailable`] and are
//! omitted from the payload.

use std::path::Path;

use crate::source::{
    BuildInfo, CapabilityLevel, DisplayMetrics, LocaleConfig, PropertySource,
    PropertyUnavailable, SettingNamespace, TelephonyIds,
};

const MACHINE_ID_PATH: &str = "/etc/machine-id";
const OS_RELEASE_PATH: &str = "/etc/os-release";
const DMI_DIR: &str = "/sys/devices/virtual/dmi/id";

/// Property source backed by the local Linux host.
#[derive(Debug, Default)]
pub struct HostPropertySource;

impl HostPropertySource {
    pub fn new() -> Self {
        Self
    }
}

impl PropertySource for HostPropertySource {
    fn capability_level(&self) -> CapabilityLevel {
        CapabilityLevel::MultiAbi
    }

    fn advertising_id(&self) -> Result<String, PropertyUnavailable> {
        Err(PropertyUnavailable::ServiceFailure(
            "no advertising service on this host".into(),
        ))
    }

    fn hardware_id(&self) -> Result<String, PropertyUnavailable> {
        read_trimmed(Path::new(MACHINE_ID_PATH))
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PropertyUnavailable::HardwareAbsent("machine-id".into()))
    }

    fn telephony_ids(&self) -> Result<TelephonyIds, PropertyUnavailable> {
        Err(PropertyUnavailable::HardwareAbsent("no modem".into()))
    }

    fn display_metrics(&self) -> Result<DisplayMetrics, PropertyUnavailable> {
        Err(PropertyUnavailable::HardwareAbsent(
            "no display metrics provider".into(),
        ))
    }

    fn locale_config(&self) -> Result<LocaleConfig, PropertyUnavailable> {
        let raw = locale_env().ok_or_else(|| {
            PropertyUnavailable::ServiceFailure("no locale environment".into())
        })?;
        let (language, country, variant) = parse_locale(&raw);
        Ok(LocaleConfig {
            font_scale: 1.0,
            country,
            language,
            variant,
            mcc: 0,
            mnc: 0,
            density_dpi: 0,
            screen_width_dp: 0,
            screen_height_dp: 0,
        })
    }

    fn system_setting(
        &self,
        _ns: SettingNamespace,
        _key: &str,
    ) -> Result<String, PropertyUnavailable> {
        Err(PropertyUnavailable::ServiceFailure(
            "no settings provider on this host".into(),
        ))
    }

    fn build_info(&self) -> Result<BuildInfo, PropertyUnavailable> {
        let os_release = read_os_release(Path::new(OS_RELEASE_PATH));
        Ok(BuildInfo {
            sdk_version: 0,
            brand: os_release_field(&os_release, "ID"),
            abis: vec![std::env::consts::ARCH.to_string()],
            device: read_trimmed(&Path::new(DMI_DIR).join("board_name")),
            display: os_release_field(&os_release, "PRETTY_NAME"),
            fingerprint: read_trimmed(Path::new("/proc/version")),
            hardware: Some(std::env::consts::ARCH.to_string()),
            host: hostname::get().ok().and_then(|h| h.into_string().ok()),
            id: os_release_field(&os_release, "VERSION_ID"),
            manufacturer: read_trimmed(&Path::new(DMI_DIR).join("sys_vendor")),
            model: read_trimmed(&Path::new(DMI_DIR).join("product_name")),
            product: os_release_field(&os_release, "NAME"),
            serial: None,
            tags: None,
            time: None,
            build_type: Some(std::env::consts::OS.to_string()),
            user: std::env::var("USER").ok(),
        })
    }
}

/// Reads a file and trims whitespace.
fn read_trimmed(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
}

fn locale_env() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
}

/// Splits `language[_COUNTRY][@variant][.codeset]` into its parts.
fn parse_locale(raw: &str) -> (String, String, String) {
    let raw = raw.split('.').next().unwrap_or(raw);
    let (base, variant) = match raw.split_once('@') {
        Some((base, variant)) => (base, variant),
        None => (raw, ""),
    };
    let (language, country) = match base.split_once('_') {
        Some((lang, country)) => (lang, country),
        None => (base, ""),
    };
    (language.to_string(), country.to_string(), variant.to_string())
}

/// Parses `/etc/os-release` key=value lines, stripping quotes.
fn read_os_release(path: &Path) -> Vec<(String, String)> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once('=')?;
            Some((key.to_string(), value.trim_matches('"').to_string()))
        })
        .collect()
}

fn os_release_field(fields: &[(String, String)], key: &str) -> Option<String> {
    fields
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_locale_full_form() {
        let (lang, country, variant) = parse_locale("sr_RS@latin.UTF-8");
        assert_eq!(lang, "sr");
        assert_eq!(country, "RS");
        assert_eq!(variant, "latin");
    }

    #[test]
    fn parse_locale_language_only() {
        let (lang, country, variant) = parse_locale("de");
        assert_eq!(lang, "de");
        assert_eq!(country, "");
        assert_eq!(variant, "");
    }

    #[test]
    fn parse_locale_with_codeset() {
        let (lang, country, variant) = parse_locale("en_US.UTF-8");
        assert_eq!(lang, "en");
        assert_eq!(country, "US");
        assert_eq!(variant, "");
    }

    #[test]
    fn os_release_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("os-release");
        std::fs::write(
            &path,
            "NAME=\"Ubuntu\"\nVERSION_ID=\"24.04\"\n# comment\nID=ubuntu\n",
        )
        .unwrap();

        let fields = read_os_release(&path);
        assert_eq!(os_release_field(&fields, "NAME").as_deref(), Some("Ubuntu"));
        assert_eq!(os_release_field(&fields, "ID").as_deref(), Some("ubuntu"));
        assert_eq!(
            os_release_field(&fields, "VERSION_ID").as_deref(),
            Some("24.04")
        );
        assert_eq!(os_release_field(&fields, "MISSING"), None);
    }

    #[test]
    fn build_info_always_available() {
        let build = HostPropertySource::new().build_info().unwrap();
        assert_eq!(build.abis.len(), 1);
        assert_eq!(build.hardware.as_deref(), Some(std::env::consts::ARCH));
    }

    #[test]
    fn mobile_capabilities_fail() {
        let source = HostPropertySource::new();
        assert!(source.advertising_id().is_err());
        assert!(source.telephony_ids().is_err());
        assert!(
            source
                .system_setting(SettingNamespace::Global, "airplane_mode_on")
                .is_err()
        );
    }
}
