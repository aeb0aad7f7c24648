use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
pub mod models;
pub use models::*;

/// Loads the unified application configuration.
///
/// Sources, later ones winning: `config/default.*`, `config/{RUN_ENV}.*`,
/// then environment variables prefixed with `APP` (e.g. `APP_SERVER__PORT`).
/// Secrets are never read from files; the Zoom client credential comes from
/// plain env vars at the call site.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    tracing::debug!("Loading configuration for RUN_ENV '{}'", run_env);

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"));

    let config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// Uses a `OnceCell` so repeated calls (config reloads, tests) do not re-read
/// the file. `DOTENV_OVERRIDE` selects an alternative file, otherwise `.env`.
pub fn ensure_dotenv_loaded() {
    let dotenv_path =
        std::env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });
}
