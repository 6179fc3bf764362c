use std::env;

use crate::error::ChatError;

/// Client configuration resolved from the environment.
///
/// `CONFAB_API_KEY` is required; hostname and model fall back to
/// defaults. Feeds `ChatBuilder::from_config` for callers that
/// configure via the environment.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_hostname: String,
    pub api_key: String,
    pub model: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ChatError> {
        let api_hostname = env::var("CONFAB_API_HOSTNAME")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let api_key = env::var("CONFAB_API_KEY").map_err(|_| ChatError::Config("CONFAB_API_KEY"))?;
        let model = env::var("CONFAB_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string());

        Ok(Self {
            api_hostname,
            api_key,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        unsafe {
            env::set_var("CONFAB_API_KEY", "test-key");
            env::remove_var("CONFAB_API_HOSTNAME");
            env::remove_var("CONFAB_MODEL");
        }

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_hostname, "https://api.openai.com");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, "gpt-4.1-mini");
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        unsafe {
            env::set_var("CONFAB_API_HOSTNAME", "http://localhost:8080");
            env::set_var("CONFAB_API_KEY", "other-key");
            env::set_var("CONFAB_MODEL", "deepseek-chat");
        }

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_hostname, "http://localhost:8080");
        assert_eq!(config.model, "deepseek-chat");

        unsafe {
            env::remove_var("CONFAB_API_HOSTNAME");
            env::remove_var("CONFAB_MODEL");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_missing_key() {
        unsafe {
            env::remove_var("CONFAB_API_KEY");
        }

        let result = ClientConfig::from_env();
        assert!(matches!(result, Err(ChatError::Config("CONFAB_API_KEY"))));
    }
}
