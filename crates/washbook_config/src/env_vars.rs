//! Environment variable handling for the Washbook application.
//!
//! Configuration keys map to environment variables as
//! `<PREFIX>__<SECTION>__<KEY>`, e.g. `server.port` -> `WASHBOOK__SERVER__PORT`.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "WASHBOOK";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Plain environment variables honoured for common deployment conventions,
/// as `(config path, variable)` pairs.
pub const LEGACY_ENV_VARS: &[(&str, &str)] = &[("database.url", "DATABASE_URL")];

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// # Arguments
///
/// * `path` - The configuration path (e.g., "server.host")
///
/// # Returns
///
/// The environment variable name (e.g., "WASHBOOK__SERVER__HOST")
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Get an environment variable for a configuration path
pub fn get_config_env_var(path: &str) -> Option<String> {
    let env_var = config_path_to_env_var(path);
    env::var(&env_var).ok()
}

/// Returns the value of a legacy variable for `path`, unless the prefixed
/// variable is set, which always wins.
pub fn legacy_override(path: &str) -> Option<String> {
    if get_config_env_var(path).is_some() {
        return None;
    }
    LEGACY_ENV_VARS
        .iter()
        .find(|(config_path, _)| *config_path == path)
        .and_then(|(_, var)| env::var(var).ok())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_to_env_var() {
        assert_eq!(
            config_path_to_env_var("server.host"),
            "WASHBOOK__SERVER__HOST"
        );
        assert_eq!(
            config_path_to_env_var("booking.whatsapp_number"),
            "WASHBOOK__BOOKING__WHATSAPP_NUMBER"
        );
    }

    #[test]
    fn test_unknown_path_has_no_legacy_override() {
        assert_eq!(legacy_override("server.host"), None);
    }
}
