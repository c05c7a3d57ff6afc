//! Null-safe payload builder.

use std::collections::HashMap;

/// Builder for one event's flat string payload.
///
/// A `None` value drops the pair instead of inserting a placeholder, so
/// the finished map never needs null handling downstream. Typed values
/// are converted by the caller with `to_string()`, which yields the
/// canonical forms (`true`/`false`, standard decimal floats).
#[derive(Debug, Default)]
pub struct Accumulator {
    pairs: HashMap<String, String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key = value` when a value is present; no-op otherwise.
    /// An explicitly passed empty string is stored as-is, never
    /// substituted for a missing value.
    pub fn put(&mut self, key: &str, value: Option<String>) {
        if let Some(value) = value {
            self.pairs.insert(key.to_string(), value);
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Consumes the accumulator, yielding the finished payload.
    pub fn into_pairs(self) -> HashMap<String, String> {
        self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_value_is_dropped() {
        let mut acc = Accumulator::new();
        acc.put("android_id", None);
        assert!(acc.is_empty());
    }

    #[test]
    fn present_value_is_stored() {
        let mut acc = Accumulator::new();
        acc.put("build_brand", Some("google".to_string()));
        assert_eq!(acc.into_pairs().get("build_brand").map(String::as_str), Some("google"));
    }

    #[test]
    fn explicit_empty_string_is_kept() {
        let mut acc = Accumulator::new();
        acc.put("locale_variant", Some(String::new()));
        assert_eq!(acc.into_pairs().get("locale_variant").map(String::as_str), Some(""));
    }

    #[test]
    fn typed_values_convert_canonically() {
        let mut acc = Accumulator::new();
        acc.put("font_scale", Some(3.14f32.to_string()));
        acc.put("auto_time", Some(true.to_string()));
        acc.put("display_density_dpi", Some(420i32.to_string()));

        let pairs = acc.into_pairs();
        assert_eq!(pairs["font_scale"], "3.14");
        assert_eq!(pairs["auto_time"], "true");
        assert_eq!(pairs["display_density_dpi"], "420");
    }

    #[test]
    fn later_put_overwrites() {
        let mut acc = Accumulator::new();
        acc.put("mcc", Some("310".to_string()));
        acc.put("mcc", Some("311".to_string()));
        let pairs = acc.into_pairs();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs["mcc"], "311");
    }
}
