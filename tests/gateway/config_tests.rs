// tests/gateway/config_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::mock_transport::MockTransport;
    use crate::fixtures::test_clock::TestClock;
    use docgate::{
        ConfigError, DEFAULT_ENDPOINT, DispatchMode, Gateway, GatewayConfig, LimiterConfig,
        RateLimiter, TimeUnit,
    };
    use std::sync::Arc;
    use std::time::Duration;

    // Config validation tests
    #[test]
    fn config_rejects_zero_permits() {
        let config = LimiterConfig::new(0, Duration::from_secs(1));
        let result = config.validate();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidPermits { permits: 0 }
        ));
    }

    #[test]
    fn config_rejects_negative_permits() {
        let config = LimiterConfig::new(-1, Duration::from_secs(1));
        let result = config.validate();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidPermits { permits: -1 }
        ));
    }

    #[test]
    fn config_rejects_zero_window() {
        let config = LimiterConfig::new(5, Duration::ZERO);
        let result = config.validate();
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidWindow));
    }

    #[test]
    fn config_rejects_window_beyond_clock_range() {
        let config = LimiterConfig::new(1, Duration::from_secs(u64::MAX));
        let result = config.validate();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::WindowTooLarge { .. }
        ));
    }

    #[test]
    fn config_accepts_valid_parameters() {
        assert!(LimiterConfig::new(10, Duration::from_secs(1)).validate().is_ok());
        assert!(LimiterConfig::per(1, TimeUnit::Days).validate().is_ok());
    }

    // Test config builder pattern
    #[test]
    fn config_builder_pattern_works() {
        let config = LimiterConfig::new(0, Duration::ZERO)
            .permits(3)
            .window(Duration::from_secs(2));
        assert!(config.validate().is_ok());

        let limiter = RateLimiter::with_config(config, TestClock::new(0.0)).unwrap();
        assert_eq!(limiter.permits(), 3);
        assert_eq!(limiter.window(), Duration::from_secs(2));
        assert!((limiter.rate_per_second() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn time_units_convert_to_durations() {
        assert_eq!(TimeUnit::Nanoseconds.duration(), Duration::from_nanos(1));
        assert_eq!(TimeUnit::Microseconds.duration(), Duration::from_micros(1));
        assert_eq!(TimeUnit::Milliseconds.duration(), Duration::from_millis(1));
        assert_eq!(TimeUnit::Seconds.duration(), Duration::from_secs(1));
        assert_eq!(TimeUnit::Minutes.duration(), Duration::from_secs(60));
        assert_eq!(TimeUnit::Hours.duration(), Duration::from_secs(3_600));
        assert_eq!(TimeUnit::Days.duration(), Duration::from_secs(86_400));
    }

    #[test]
    fn gateway_config_defaults() {
        let config = GatewayConfig::per(10, TimeUnit::Minutes);
        let endpoint = config.validate().unwrap();
        assert_eq!(endpoint.as_str(), DEFAULT_ENDPOINT);
        assert!(config.limiter_config().validate().is_ok());
    }

    #[test]
    fn gateway_config_rejects_bad_endpoint() {
        let config = GatewayConfig::per(10, TimeUnit::Minutes).endpoint("not a url");
        match config.validate().unwrap_err() {
            ConfigError::InvalidEndpoint { endpoint, .. } => assert_eq!(endpoint, "not a url"),
            other => panic!("Expected InvalidEndpoint, got: {:?}", other),
        }
    }

    // Constructor tests
    #[test]
    fn gateway_new_rejects_invalid_permits() {
        for permits in [0, -1] {
            let result = Gateway::new(permits, TimeUnit::Seconds);
            assert!(matches!(
                result.err(),
                Some(ConfigError::InvalidPermits { .. })
            ));
        }
    }

    #[test]
    fn gateway_rejects_zero_window() {
        let config = GatewayConfig::new(1, Duration::ZERO);
        let transport = Arc::new(MockTransport::new());
        let result = Gateway::with_clock(config, transport, TestClock::new(0.0));
        assert!(matches!(result.err(), Some(ConfigError::InvalidWindow)));
    }

    #[test]
    fn gateway_new_builds_with_defaults() {
        let gateway = Gateway::new(10, TimeUnit::Minutes).unwrap();
        assert_eq!(gateway.endpoint().as_str(), DEFAULT_ENDPOINT);
        assert_eq!(gateway.dispatch_mode(), DispatchMode::Serialized);
        assert_eq!(gateway.limiter().permits(), 10);
        assert_eq!(gateway.limiter().interval(), Duration::from_secs(6));
    }

    #[test]
    fn gateway_debug_shows_configuration() {
        let gateway = Gateway::new(10, TimeUnit::Minutes).unwrap();
        let debug = format!("{:?}", gateway);
        assert!(debug.starts_with("Gateway"));
        assert!(debug.contains(DEFAULT_ENDPOINT));
        assert!(debug.contains("Serialized"));
    }

    #[test]
    fn gateway_with_config_honours_overrides() {
        let config = GatewayConfig::new(2, Duration::from_secs(1))
            .endpoint("http://localhost:8080/documents")
            .timeout(Duration::from_secs(5))
            .dispatch(DispatchMode::Overlapped);
        let gateway = Gateway::with_config(config, Arc::new(MockTransport::new())).unwrap();
        assert_eq!(gateway.endpoint().as_str(), "http://localhost:8080/documents");
        assert_eq!(gateway.dispatch_mode(), DispatchMode::Overlapped);
        assert_eq!(gateway.limiter().interval(), Duration::from_millis(500));
    }
}
