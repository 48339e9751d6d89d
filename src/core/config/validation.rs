use super::{AppConfig, ConfigError};

pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    require_non_empty("openai.api_key", &config.openai.api_key)?;
    require_non_empty("openai.base_url", &config.openai.base_url)?;
    require_non_empty("openai.chat_model", &config.openai.chat_model)?;
    require_non_empty("openai.embedding_model", &config.openai.embedding_model)?;
    require_non_empty("server.host", &config.server.host)?;

    if config.openai.embedding_batch_size == 0 {
        return Err(invalid("openai.embedding_batch_size", "must be at least 1"));
    }
    if config.openai.request_timeout_secs == Some(0) {
        return Err(invalid("openai.request_timeout_secs", "must be at least 1"));
    }
    if config.retrieval.top_k == 0 {
        return Err(invalid("retrieval.top_k", "must be at least 1"));
    }

    let temperature = config.generation.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        return Err(invalid(
            "generation.temperature",
            &format!("must be within 0.0..=2.0, got {}", temperature),
        ));
    }

    Ok(())
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.openai.api_key = "sk-test".to_string();
        config
    }

    #[test]
    fn default_config_with_key_is_valid() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let mut config = valid_config();
        config.retrieval.top_k = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "retrieval.top_k", .. }));
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let mut config = valid_config();
        config.generation.temperature = 2.5;
        assert!(validate_config(&config).is_err());

        config.generation.temperature = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let mut config = valid_config();
        config.openai.embedding_batch_size = 0;
        assert!(validate_config(&config).is_err());
    }
}
