//! Feature flag handling for the Washbook application.
//!
//! Optional integrations are switched on twice: at compile time with a cargo
//! feature (`gcal` on the backend crate) and at runtime with a `use_*` flag
//! plus a present configuration section. This module covers the runtime half.

use washbook_config::AppConfig;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
///
/// # Returns
///
/// `true` if the flag is set and the section is present, `false` otherwise
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if Google Calendar mirroring is enabled at runtime.
pub fn is_gcal_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_gcal, config.gcal.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use washbook_config::GcalConfig;

    #[test]
    fn test_gcal_needs_flag_and_section() {
        let mut config = AppConfig::default();
        assert!(!is_gcal_enabled(&config));

        config.use_gcal = true;
        assert!(!is_gcal_enabled(&config));

        config.gcal = Some(GcalConfig::default());
        assert!(is_gcal_enabled(&config));

        config.use_gcal = false;
        assert!(!is_gcal_enabled(&config));
    }
}
