//! The property catalog boundary.
//!
//! [`PropertySource`] abstracts the host environment behind fallible
//! getters, one per capability group. Every getter may fail with
//! [`PropertyUnavailable`]; callers absorb the failure and omit the
//! property, so no error from this module ever crosses the scheduler
//! boundary.

/// Why a property could not be read.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PropertyUnavailable {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("hardware absent: {0}")]
    HardwareAbsent(String),

    #[error("unsupported at capability level {0:?}")]
    UnsupportedLevel(CapabilityLevel),

    #[error("service failure: {0}")]
    ServiceFailure(String),
}

/// Platform generation, ordered oldest to newest.
///
/// Each variant marks the generation at which a gated feature first became
/// readable. Gates compare with `>=` (or `==` for the one-generation
/// window of `DevSettings`), so a pass resolves its variant selection once
/// from this level instead of scattering version checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CapabilityLevel {
    /// Baseline: legacy settings namespaces, two fixed ABI slots.
    Legacy,
    /// Screen width/height in dp become readable.
    ScreenDp,
    /// Developer-mode flag readable, still in the secure namespace.
    DevSettings,
    /// Global settings namespace exists; integer density dpi readable.
    GlobalSettings,
    /// Unified location mode setting.
    LocationMode,
    /// Arbitrary-length supported-ABI list.
    MultiAbi,
}

/// Namespace a system setting lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingNamespace {
    Global,
    System,
    Secure,
}

/// Permission-gated telephony identifiers, read as a unit.
#[derive(Debug, Clone, Default)]
pub struct TelephonyIds {
    pub device_id: Option<String>,
    pub sim_serial_number: Option<String>,
}

/// Raw display metrics.
#[derive(Debug, Clone)]
pub struct DisplayMetrics {
    pub density: f32,
    pub density_dpi: i32,
    pub scaled_density: f32,
    pub width_pixels: i32,
    pub height_pixels: i32,
    pub xdpi: f32,
    pub ydpi: f32,
}

/// Locale and UI configuration.
///
/// `mnc` may carry the wildcard sentinel [`MNC_ZERO`]; the collector maps
/// it to zero when reporting.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    pub font_scale: f32,
    pub country: String,
    pub language: String,
    pub variant: String,
    pub mcc: i32,
    pub mnc: i32,
    pub density_dpi: i32,
    pub screen_width_dp: i32,
    pub screen_height_dp: i32,
}

/// Wildcard carrier code reported by the platform when the MNC is zero.
pub const MNC_ZERO: i32 = 65535;

/// Static build/firmware descriptors.
///
/// Individual fields are optional: a vendor build may leave any of them
/// unset, and unset fields are omitted from the payload.
#[derive(Debug, Clone, Default)]
pub struct BuildInfo {
    pub sdk_version: i32,
    pub brand: Option<String>,
    /// Supported ABIs, most preferred first. At capability levels below
    /// `MultiAbi` only the first two entries are reported.
    pub abis: Vec<String>,
    pub device: Option<String>,
    pub display: Option<String>,
    pub fingerprint: Option<String>,
    pub hardware: Option<String>,
    pub host: Option<String>,
    pub id: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub product: Option<String>,
    pub serial: Option<String>,
    pub tags: Option<String>,
    /// Build timestamp in milliseconds since the epoch.
    pub time: Option<i64>,
    pub build_type: Option<String>,
    pub user: Option<String>,
}

/// Fallible access to the host environment's property catalog.
///
/// Implementations enumerate whatever the platform actually exposes and
/// fail with [`PropertyUnavailable`] for the rest; the collector treats
/// every failure as "omit and continue".
pub trait PropertySource: Send + Sync {
    /// The platform generation, resolved once per collection pass.
    fn capability_level(&self) -> CapabilityLevel;

    /// Resettable advertising identifier. May perform blocking I/O.
    fn advertising_id(&self) -> Result<String, PropertyUnavailable>;

    /// Stable hardware/installation identifier, unfiltered. Callers must
    /// drop the known-bad sentinel value before reporting.
    fn hardware_id(&self) -> Result<String, PropertyUnavailable>;

    /// Telephony identifiers; fails as a unit without the phone-state
    /// permission.
    fn telephony_ids(&self) -> Result<TelephonyIds, PropertyUnavailable>;

    fn display_metrics(&self) -> Result<DisplayMetrics, PropertyUnavailable>;

    fn locale_config(&self) -> Result<LocaleConfig, PropertyUnavailable>;

    /// Reads one named system setting from the given namespace.
    fn system_setting(
        &self,
        ns: SettingNamespace,
        key: &str,
    ) -> Result<String, PropertyUnavailable>;

    fn build_info(&self) -> Result<BuildInfo, PropertyUnavailable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_levels_are_ordered() {
        assert!(CapabilityLevel::Legacy < CapabilityLevel::ScreenDp);
        assert!(CapabilityLevel::DevSettings < CapabilityLevel::GlobalSettings);
        assert!(CapabilityLevel::GlobalSettings < CapabilityLevel::LocationMode);
        assert!(CapabilityLevel::LocationMode < CapabilityLevel::MultiAbi);
    }

    #[test]
    fn unavailable_messages_name_the_cause() {
        let err = PropertyUnavailable::PermissionDenied("READ_PHONE_STATE".into());
        assert_eq!(err.to_string(), "permission denied: READ_PHONE_STATE");

        let err = PropertyUnavailable::UnsupportedLevel(CapabilityLevel::Legacy);
        assert!(err.to_string().contains("Legacy"));
    }
}
