//! Tests for configuration management functionality
//!
//! These tests verify that the configuration providers in the SDK work correctly.

#[cfg(test)]
mod tests {
    use std::env;
    use std::time::Duration;

    use crate::config::{
        ConfigProvider, ConfigProviderExt, EnvConfigProvider, GatewayConfig, MemoryConfigProvider,
        ServiceConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT,
    };

    #[test]
    fn test_memory_config_provider() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("api_url", "http://farm.local:9000");
        provider.set("analytics_enabled", "no");

        assert_eq!(provider.get_string("api_url").unwrap(), "http://farm.local:9000");
        assert!(!provider.get_bool("analytics_enabled").unwrap());

        assert_eq!(provider.get_string_or("missing", "default"), "default");
        assert!(provider.get_bool_or("missing", true));

        assert!(provider.get_string("missing").is_err());
        assert!(provider.get_bool("api_url").is_err());
    }

    #[test]
    fn test_env_config_provider() {
        env::set_var("FGTEST_GATEWAY_API_URL", "https://api.farm.guru/");
        env::set_var("FGTEST_GATEWAY_API_TIMEOUT", "750ms");

        let provider = EnvConfigProvider::new()
            .with_prefix("FGTEST")
            .with_namespace("GATEWAY");

        assert_eq!(provider.get_duration("api_timeout").unwrap(), Duration::from_millis(750));

        let config = GatewayConfig::from_provider(&provider).unwrap();
        assert_eq!(config.base_url, "https://api.farm.guru");
        assert_eq!(config.timeout, Duration::from_millis(750));

        env::remove_var("FGTEST_GATEWAY_API_URL");
        env::remove_var("FGTEST_GATEWAY_API_TIMEOUT");
    }

    #[test]
    fn test_gateway_defaults() {
        let config = GatewayConfig::from_provider(&MemoryConfigProvider::new()).unwrap();

        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.user_agent.starts_with("Farm-Guru-SDK/"));
    }

    #[test]
    fn test_gateway_validation() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("api_url", "ftp://farm.local");
        assert!(GatewayConfig::from_provider(&provider).is_err());

        let mut provider = MemoryConfigProvider::new();
        provider.set("api_url", "not a url");
        assert!(GatewayConfig::from_provider(&provider).is_err());

        let zero = GatewayConfig {
            timeout: Duration::ZERO,
            ..GatewayConfig::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_unparseable_timeout_uses_default() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("api_timeout", "soon");

        let config = GatewayConfig::from_provider(&provider).unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
