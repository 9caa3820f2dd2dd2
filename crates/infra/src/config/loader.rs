//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. An explicitly given file always wins
//! 2. Otherwise, environment variables when `AGENDA_API_BASE_URL` is set
//! 3. Otherwise, the first config file found by [`discover_config_path`]
//! 4. Otherwise, built-in defaults
//!
//! Supports JSON and TOML files. The result is validated before use.
//!
//! ## Environment Variables
//! - `AGENDA_API_BASE_URL`: REST backend base URL (required for env loading)
//! - `AGENDA_HTTP_TIMEOUT_SECS`: Request timeout in seconds
//! - `AGENDA_USER_AGENT`: User-Agent header sent to the backend
//! - `AGENDA_SEARCH_DEBOUNCE_MS`: Client search quiet period in milliseconds
//! - `AGENDA_DELETE_ALL_PHRASE`: Phrase confirming bulk deletion
//! - `AGENDA_TIMEZONE`: IANA zone for reading and printing times
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./agenda.json` or `./agenda.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use agenda_domain::{AgendaConfig, AgendaError, Result};
use url::Url;

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `AgendaError::Config` if:
/// - The explicit file is missing or invalid
/// - Environment values cannot be parsed
/// - The resulting configuration fails validation
pub fn load(path: Option<PathBuf>) -> Result<AgendaConfig> {
    let config = if let Some(path) = path {
        load_from_file(Some(path))?
    } else if std::env::var_os("AGENDA_API_BASE_URL").is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        config
    } else if discover_config_path().is_some() {
        load_from_file(None)?
    } else {
        tracing::debug!("No configuration found, using defaults");
        AgendaConfig::default()
    };

    validate(&config)?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// `AGENDA_API_BASE_URL` is required; every other value falls back to its
/// default.
///
/// # Errors
/// Returns `AgendaError::Config` if the base URL is missing or a value
/// cannot be parsed.
pub fn load_from_env() -> Result<AgendaConfig> {
    let mut config = AgendaConfig::default();

    config.backend.base_url = env_var("AGENDA_API_BASE_URL")?;
    if let Some(timeout) = env_parse::<u64>("AGENDA_HTTP_TIMEOUT_SECS", "HTTP timeout")? {
        config.backend.timeout_secs = timeout;
    }
    config.backend.user_agent = env_opt("AGENDA_USER_AGENT");

    if let Some(debounce) = env_parse::<u64>("AGENDA_SEARCH_DEBOUNCE_MS", "search debounce")? {
        config.sync.search_debounce_ms = debounce;
    }
    if let Some(phrase) = env_opt("AGENDA_DELETE_ALL_PHRASE") {
        config.sync.delete_all_phrase = phrase;
    }
    if let Some(timezone) = env_opt("AGENDA_TIMEZONE") {
        config.display.timezone = timezone;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches several locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `AgendaError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<AgendaConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AgendaError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => discover_config_path().ok_or_else(|| {
            AgendaError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AgendaError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `AgendaError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<AgendaConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AgendaError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AgendaError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AgendaError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Check values that would only fail later, at first use.
///
/// # Errors
/// Returns `AgendaError::Config` describing the first invalid value.
pub fn validate(config: &AgendaConfig) -> Result<()> {
    let url = Url::parse(&config.backend.base_url).map_err(|e| {
        AgendaError::Config(format!("Invalid API base URL '{}': {}", config.backend.base_url, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AgendaError::Config(format!(
            "API base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if config.backend.timeout_secs == 0 {
        return Err(AgendaError::Config("HTTP timeout must be at least one second".into()));
    }
    if config.sync.delete_all_phrase.trim().is_empty() {
        return Err(AgendaError::Config("Delete-all confirmation phrase cannot be empty".into()));
    }
    config.display.tz()?;
    Ok(())
}

/// Search several locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn discover_config_path() -> Option<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| {
            ["agenda.json", "agenda.toml", "config.json", "config.toml"].map(|name| dir.join(name))
        })
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `AgendaError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        AgendaError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable, ignoring blank values.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| AgendaError::Config(format!("Invalid {} '{}': {}", what, raw, e)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: [&str; 6] = [
        "AGENDA_API_BASE_URL",
        "AGENDA_HTTP_TIMEOUT_SECS",
        "AGENDA_USER_AGENT",
        "AGENDA_SEARCH_DEBOUNCE_MS",
        "AGENDA_DELETE_ALL_PHRASE",
        "AGENDA_TIMEZONE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("AGENDA_API_BASE_URL", "https://agenda.example.com/api");
        std::env::set_var("AGENDA_HTTP_TIMEOUT_SECS", "10");
        std::env::set_var("AGENDA_USER_AGENT", "agenda-test");
        std::env::set_var("AGENDA_SEARCH_DEBOUNCE_MS", "150");
        std::env::set_var("AGENDA_DELETE_ALL_PHRASE", "APAGAR");
        std::env::set_var("AGENDA_TIMEZONE", "Europe/Lisbon");

        let config = load_from_env().unwrap();
        assert_eq!(config.backend.base_url, "https://agenda.example.com/api");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.backend.user_agent.as_deref(), Some("agenda-test"));
        assert_eq!(config.sync.search_debounce_ms, 150);
        assert_eq!(config.sync.delete_all_phrase, "APAGAR");
        assert_eq!(config.display.timezone, "Europe/Lisbon");

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, AgendaError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("AGENDA_API_BASE_URL", "http://localhost:5000/api");
        std::env::set_var("AGENDA_HTTP_TIMEOUT_SECS", "soon");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, AgendaError::Config(ref msg) if msg.contains("HTTP timeout")));

        clear_env();
    }

    #[test]
    fn test_load_prefers_env_over_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("AGENDA_API_BASE_URL", "http://10.0.0.5:5000/api");
        let config = load(None).unwrap();
        assert_eq!(config.backend.base_url, "http://10.0.0.5:5000/api");

        clear_env();
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[backend]
base_url = "http://agenda.local/api"
timeout_secs = 5

[display]
timezone = "America/Manaus"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).unwrap();
        assert_eq!(config.backend.base_url, "http://agenda.local/api");
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.display.timezone, "America/Manaus");
        assert_eq!(config.sync.search_debounce_ms, 300);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/agenda.json")));
        assert!(matches!(result, Err(AgendaError::Config(_))));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("base_url: x", &PathBuf::from("agenda.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AgendaConfig::default();
        assert!(validate(&config).is_ok());

        config.backend.base_url = "ftp://files.example.com".into();
        assert!(validate(&config).is_err());

        let mut config = AgendaConfig::default();
        config.backend.timeout_secs = 0;
        assert!(validate(&config).is_err());

        let mut config = AgendaConfig::default();
        config.display.timezone = "Nowhere/Special".into();
        assert!(validate(&config).is_err());

        let mut config = AgendaConfig::default();
        config.sync.delete_all_phrase = "  ".into();
        assert!(validate(&config).is_err());
    }
}
