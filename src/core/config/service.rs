use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::validation::validate_config;
use super::{AppConfig, ConfigError};

const CONFIG_PATH_ENV: &str = "PROSPECT_REPLY_CONFIG";

/// Resolves and loads the service configuration.
///
/// Values are layered: built-in defaults, then the optional YAML file, then
/// process environment variables.
#[derive(Debug, Clone)]
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    pub fn new() -> Self {
        let config_path = env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.yml"));
        Self { config_path }
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        self.load_with(|key| env::var(key).ok())
    }

    /// Loads configuration using `lookup` in place of the process environment.
    pub fn load_with<F>(&self, lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = load_yaml_file(&self.config_path)?;
        apply_env_overrides(&mut config, lookup)?;
        validate_config(&config)?;
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    ConfigService::new().load_config()
}

fn load_yaml_file(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(host) = get("HOST") {
        config.server.host = host;
    }
    if let Some(port) = get("PORT") {
        config.server.port = parse_override("PORT", &port)?;
    }
    if let Some(path) = get("CORPUS_PATH") {
        config.corpus.path = PathBuf::from(path);
    }
    if let Some(key) = get("OPENAI_API_KEY") {
        config.openai.api_key = key;
    }
    if let Some(url) = get("OPENAI_BASE_URL") {
        config.openai.base_url = url;
    }
    if let Some(model) = get("OPENAI_CHAT_MODEL") {
        config.openai.chat_model = model;
    }
    if let Some(model) = get("OPENAI_EMBEDDING_MODEL") {
        config.openai.embedding_model = model;
    }
    if let Some(top_k) = get("RETRIEVAL_TOP_K") {
        config.retrieval.top_k = parse_override("RETRIEVAL_TOP_K", &top_k)?;
    }
    if let Some(dir) = get("LOG_DIR") {
        config.logging.dir = Some(PathBuf::from(dir));
    }

    Ok(())
}

fn parse_override<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidOverride {
            key,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_file_falls_back_to_defaults_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::with_path(dir.path().join("absent.yml"));

        let config = service
            .load_with(lookup_from(&[("OPENAI_API_KEY", "sk-test")]))
            .unwrap();

        assert_eq!(config.openai.api_key, "sk-test");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn env_overrides_win_over_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  port: 9000\nopenai:\n  api_key: from-file\nretrieval:\n  top_k: 5"
        )
        .unwrap();
        let service = ConfigService::with_path(file.path());

        let config = service
            .load_with(lookup_from(&[("PORT", "9100"), ("CORPUS_PATH", "data.csv")]))
            .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.openai.api_key, "from-file");
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.corpus.path, PathBuf::from("data.csv"));
    }

    #[test]
    fn unparsable_numeric_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::with_path(dir.path().join("absent.yml"));

        let err = service
            .load_with(lookup_from(&[("OPENAI_API_KEY", "k"), ("PORT", "eighty")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidOverride { key: "PORT", .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server: [unterminated").unwrap();
        let service = ConfigService::with_path(file.path());

        let err = service
            .load_with(lookup_from(&[("OPENAI_API_KEY", "k")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_api_key_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::with_path(dir.path().join("absent.yml"));

        let err = service.load_with(lookup_from(&[])).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { field: "openai.api_key", .. }));
    }
}
