//! Configuration resolution
//!
//! Precedence, highest first: `TROPEIRO_*` environment variables, then a
//! config file (explicit via `TROPEIRO_CONFIG_PATH`, otherwise probed from
//! the conventional locations), then the hardcoded defaults. The resolved
//! configuration is validated before anyone connects with it, so a broken
//! base URL fails at startup instead of on the first request.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use tropeiro_domain::constants::{
    ENV_BASE_URL, ENV_CACHE_MAX_ENTRIES, ENV_CACHE_TTL_SECS, ENV_CONFIG_PATH,
    ENV_REQUEST_ATTEMPTS, ENV_REQUEST_TIMEOUT_SECS,
};
use tropeiro_domain::{Config, ErpError, Result};
use url::Url;

use crate::errors::InfraError;

/// File names probed when no explicit config path is given.
const CONFIG_FILE_NAMES: &[&str] = &["tropeiro.toml", "tropeiro.json", "config/tropeiro.toml"];

/// Load the application configuration.
///
/// Starts from defaults, overlays a config file when one is found, then
/// overlays the environment. The result is validated.
pub fn load() -> Result<Config> {
    let mut config = match explicit_config_path()? {
        Some(path) => load_from_file(&path)?,
        None => match probe_config_paths() {
            Some(path) => load_from_file(&path)?,
            None => Config::default(),
        },
    };

    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Load and parse a single config file. No env overlay, no validation.
pub fn load_from_file(path: &Path) -> Result<Config> {
    debug!(path = %path.display(), "loading config file");
    let contents = fs::read_to_string(path).map_err(|err| {
        ErpError::Config(format!("Cannot read config file {}: {err}", path.display()))
    })?;
    parse_config(&contents, path)
}

/// Look for a config file in the conventional locations: the working
/// directory, its parent, and the executable's directory.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        for name in CONFIG_FILE_NAMES {
            candidates.push(cwd.join(name));
        }
        if let Some(parent) = cwd.parent() {
            for name in CONFIG_FILE_NAMES {
                candidates.push(parent.join(name));
            }
        }
    }
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            for name in CONFIG_FILE_NAMES {
                candidates.push(dir.join(name));
            }
        }
    }

    candidates.into_iter().find(|path| path.is_file())
}

fn explicit_config_path() -> Result<Option<PathBuf>> {
    let Some(raw) = env_string(ENV_CONFIG_PATH) else {
        return Ok(None);
    };
    let path = PathBuf::from(&raw);
    if !path.is_file() {
        // An explicit path that does not resolve is an operator mistake,
        // not a cue to fall back silently.
        return Err(ErpError::Config(format!(
            "Config file named by {ENV_CONFIG_PATH} not found: {raw}"
        )));
    }
    Ok(Some(path))
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|err| ErpError::Config(format!("Invalid TOML in {}: {err}", path.display()))),
        "json" => serde_json::from_str(contents)
            .map_err(|err| ErpError::Config(format!("Invalid JSON in {}: {err}", path.display()))),
        other => Err(ErpError::Config(format!(
            "Unsupported config format '{other}' for {}",
            path.display()
        ))),
    }
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(value) = env_string(ENV_BASE_URL) {
        config.api.base_url = value;
    }
    if let Some(value) = env_u64(ENV_REQUEST_TIMEOUT_SECS)? {
        config.api.timeout_secs = value;
    }
    if let Some(value) = env_u32(ENV_REQUEST_ATTEMPTS)? {
        config.api.request_attempts = value;
    }
    if let Some(value) = env_u64(ENV_CACHE_TTL_SECS)? {
        config.cache.ttl_secs = value;
    }
    if let Some(value) = env_u64(ENV_CACHE_MAX_ENTRIES)? {
        config.cache.max_entries = value;
    }
    Ok(())
}

fn validate(config: &Config) -> Result<()> {
    let url = Url::parse(config.api.base_url.trim()).map_err(|err| {
        let infra: InfraError = err.into();
        ErpError::from(infra)
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ErpError::Config(format!(
            "Base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if config.api.timeout_secs == 0 {
        return Err(ErpError::Config("Request timeout must be at least 1 second".into()));
    }
    if config.api.request_attempts == 0 {
        return Err(ErpError::Config("Request attempts must be at least 1".into()));
    }
    Ok(())
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match env_string(key) {
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|err| ErpError::Config(format!("Invalid value for {key}: {err}"))),
        None => Ok(None),
    }
}

fn env_u32(key: &str) -> Result<Option<u32>> {
    match env_string(key) {
        Some(raw) => raw
            .parse::<u32>()
            .map(Some)
            .map_err(|err| ErpError::Config(format!("Invalid value for {key}: {err}"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration resolution.
    //!
    //! Every test takes the shared env lock: these scenarios mutate
    //! process-wide environment variables and must not interleave.
    use std::io::Write;

    use tempfile::Builder;
    use tropeiro_domain::constants::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};

    use super::*;
    use crate::test_env::ENV_LOCK;

    const ALL_VARS: &[&str] = &[
        ENV_BASE_URL,
        ENV_REQUEST_TIMEOUT_SECS,
        ENV_REQUEST_ATTEMPTS,
        ENV_CACHE_TTL_SECS,
        ENV_CACHE_MAX_ENTRIES,
        ENV_CONFIG_PATH,
    ];

    fn clear_env() {
        for key in ALL_VARS {
            env::remove_var(key);
        }
    }

    /// Validates the defaults scenario: no file, no environment.
    ///
    /// Assertions:
    /// - Confirms the production base URL applies.
    /// - Confirms the default timeout applies.
    #[test]
    fn defaults_apply_without_file_or_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = load().unwrap();

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://localhost:9000\"\ntimeout_secs = 10\n\n[cache]\nttl_secs = 60\n"
        )
        .unwrap();
        env::set_var(ENV_CONFIG_PATH, file.path());

        let config = load().unwrap();

        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.cache.ttl_secs, 60);

        env::remove_var(ENV_CONFIG_PATH);
    }

    #[test]
    fn json_file_overrides_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"api": {{"base_url": "http://localhost:9100"}}}}"#).unwrap();
        env::set_var(ENV_CONFIG_PATH, file.path());

        let config = load().unwrap();

        assert_eq!(config.api.base_url, "http://localhost:9100");
        assert_eq!(config.api.timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);

        env::remove_var(ENV_CONFIG_PATH);
    }

    /// Validates the precedence scenario: an env value beats the file.
    #[test]
    fn env_overrides_beat_the_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://localhost:9000\"\n").unwrap();
        env::set_var(ENV_CONFIG_PATH, file.path());
        env::set_var(ENV_BASE_URL, "http://localhost:9200");
        env::set_var(ENV_REQUEST_ATTEMPTS, "5");

        let config = load().unwrap();

        assert_eq!(config.api.base_url, "http://localhost:9200");
        assert_eq!(config.api.request_attempts, 5);

        clear_env();
    }

    #[test]
    fn garbage_numeric_override_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var(ENV_REQUEST_TIMEOUT_SECS, "depressa");

        let err = load().unwrap_err();
        assert!(matches!(err, ErpError::Config(_)));

        clear_env();
    }

    #[test]
    fn base_url_scheme_is_validated() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var(ENV_BASE_URL, "ftp://erp.example.com");

        let err = load().unwrap_err();
        assert!(matches!(err, ErpError::Config(_)));

        clear_env();
    }

    #[test]
    fn zero_attempts_are_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\nrequest_attempts = 0\n").unwrap();
        env::set_var(ENV_CONFIG_PATH, file.path());

        let err = load().unwrap_err();
        assert!(matches!(err, ErpError::Config(_)));

        clear_env();
    }

    /// An explicit config path that does not exist must fail loudly, not
    /// fall back to defaults.
    #[test]
    fn explicit_missing_path_fails() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var(ENV_CONFIG_PATH, "/nonexistent/tropeiro.toml");

        let err = load().unwrap_err();
        assert!(matches!(err, ErpError::Config(_)));

        clear_env();
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "api: {{}}").unwrap();
        env::set_var(ENV_CONFIG_PATH, file.path());

        let err = load().unwrap_err();
        assert!(matches!(err, ErpError::Config(_)));

        clear_env();
    }
}
