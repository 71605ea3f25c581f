//! Widget configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.banter/` by default) and
//! deserializes it into [`WidgetConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use banter_types::config::{PacingConfig, WidgetConfig};
use banter_types::error::ConfigError;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `BANTER_DATA_DIR` environment variable
/// 2. `~/.banter`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BANTER_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".banter");
    }

    PathBuf::from(".banter")
}

/// Load widget configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`WidgetConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Pacing whose typing indicator is not shorter than the message interval
///   is replaced by the default pacing, with a warning.
pub async fn load_widget_config(data_dir: &Path) -> WidgetConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return WidgetConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return WidgetConfig::default();
        }
    };

    let mut config = match toml::from_str::<WidgetConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            return WidgetConfig::default();
        }
    };

    if let Err(err) = config.pacing.validate() {
        tracing::warn!("{err}, using default pacing");
        config.pacing = PacingConfig::default();
    }

    config
}

/// Resolve the backend base URL.
///
/// Priority:
/// 1. `--url` / `BANTER_BACKEND_URL`
/// 2. `backend_url` from `config.toml`
///
/// The URL must be absolute http(s); a trailing slash is dropped so endpoint
/// paths can be appended directly.
pub fn resolve_backend_url(
    cli_override: Option<&str>,
    config: &WidgetConfig,
) -> Result<String, ConfigError> {
    let raw = cli_override.unwrap_or(&config.backend_url).trim();

    let parsed =
        reqwest::Url::parse(raw).map_err(|e| ConfigError::InvalidBackendUrl(format!("{raw}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBackendUrl(format!(
            "{raw}: unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}
