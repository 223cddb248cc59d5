//! Configuration loading and validation integration tests

#[cfg(test)]
mod tests {
    use release_ratelimit::config::models::GatewayConfig;
    use release_ratelimit::config::{Config, Validate};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // ==================== Loading ====================

    #[tokio::test]
    async fn test_full_config_file() {
        let file = write_config(
            r#"
server:
  host: "127.0.0.1"
  port: 8443
  workers: 2
rate_limit:
  enabled: true
  requests_per_minute: 30
  burst: 5
  authenticated_requests_per_minute: 300
  authenticated_burst: 50
  cleanup_interval_secs: 15
"#,
        );

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server().address(), "127.0.0.1:8443");
        assert_eq!(config.server().workers, Some(2));

        let anonymous = config.rate_limit().anonymous_tier();
        assert_eq!(anonymous.requests_per_minute, 30);
        assert_eq!(anonymous.burst, 5);
        assert_eq!(anonymous.cleanup_interval, Duration::from_secs(15));

        let authenticated = config.rate_limit().authenticated_tier();
        assert_eq!(authenticated.requests_per_minute, 300);
        assert_eq!(authenticated.burst, 50);
    }

    #[tokio::test]
    async fn test_empty_rate_limit_section_uses_defaults() {
        let file = write_config("server:\n  port: 9000\n");

        let config = Config::from_file(file.path()).await.unwrap();
        let rate_limit = config.rate_limit();
        assert!(rate_limit.enabled);
        assert_eq!(rate_limit.requests_per_minute, 60);
        assert_eq!(rate_limit.burst, 10);
        assert_eq!(rate_limit.authenticated_tier().requests_per_minute, 120);
        assert_eq!(rate_limit.authenticated_tier().burst, 20);
    }

    #[tokio::test]
    async fn test_zero_burst_rejected_at_load() {
        let file = write_config("rate_limit:\n  burst: 0\n");

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Rate limit config error"));
    }

    #[tokio::test]
    async fn test_malformed_yaml_rejected() {
        let file = write_config("rate_limit: [not, a, map\n");
        assert!(Config::from_file(file.path()).await.is_err());
    }

    // ==================== Validation ====================

    #[test]
    fn test_zero_authenticated_rpm_invalid() {
        let mut config = GatewayConfig::default();
        config.rate_limit.authenticated_requests_per_minute = Some(0);

        let err = config.validate().unwrap_err();
        assert!(err.contains("authenticated tier"));
    }

    #[test]
    fn test_zero_cleanup_interval_invalid() {
        let mut config = GatewayConfig::default();
        config.rate_limit.cleanup_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let mut config = GatewayConfig::default();
        config
            .apply_overrides(|name| match name {
                "RATE_LIMIT_RPM" => Some("90".to_string()),
                "RATE_LIMIT_AUTH_BURST" => Some("40".to_string()),
                "GATEWAY_PORT" => Some("8181".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.server.port, 8181);
        assert_eq!(config.rate_limit.requests_per_minute, 90);
        assert_eq!(config.rate_limit.authenticated_tier().burst, 40);
        // Unset authenticated rate follows the overridden anonymous rate
        assert_eq!(config.rate_limit.authenticated_tier().requests_per_minute, 180);
    }

    #[test]
    fn test_unparsable_override_is_an_error() {
        let mut config = GatewayConfig::default();
        let err = config
            .apply_overrides(|name| (name == "RATE_LIMIT_BURST").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("RATE_LIMIT_BURST"));
    }
}
