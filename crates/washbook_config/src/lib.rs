//! Configuration for the Washbook booking service.
//!
//! Values are layered, later sources winning:
//!
//! 1. built-in defaults (see [`models`])
//! 2. `config/default.{toml,yaml,json}`
//! 3. `config/<RUN_ENV>.{toml,yaml,json}` (`RUN_ENV` defaults to `debug`)
//! 4. `WASHBOOK__SECTION__KEY` environment variables, plus `DATABASE_URL`
//!
//! A `.env` file is loaded into the process environment once before any of this.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

use env_vars::{get_config_prefix, legacy_override, CONFIG_SEPARATOR, LEGACY_ENV_VARS};

/// Loads the configuration from `$CONFIG_DIR` (default `./config`) and the environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    load_config_from(&config_dir, &run_env)
}

/// Loads the configuration from the given directory for the given run environment.
///
/// Both files are optional; a missing directory yields the built-in defaults
/// (still overridable from the environment).
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);
    let prefix = get_config_prefix();

    debug!(
        "Loading config from {} and {} (env prefix {})",
        default_path.display(),
        env_path.display(),
        prefix
    );

    let mut builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(Environment::with_prefix(&prefix).separator(CONFIG_SEPARATOR));

    for (path, _) in LEGACY_ENV_VARS {
        if let Some(value) = legacy_override(path) {
            builder = builder.set_override(*path, value)?;
        }
    }

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `$DOTENV_OVERRIDE` if set, otherwise the first command line
/// argument when it starts with `.env`, otherwise `.env`. A missing file is not
/// an error. Returns the path that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
