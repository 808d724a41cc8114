use std::time::Duration;

/// Runtime configuration, sourced from the environment with validation.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub log_level: String,
    pub environment: String,
    /// Sessions idle longer than this are removed by the sweep task.
    pub session_ttl: Duration,
    /// How often the sweep task runs.
    pub sweep_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            log_level: "info".into(),
            environment: "development".into(),
            session_ttl: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid port: {0}")]
    InvalidPort(String),
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl ServerConfig {
    /// Load configuration from `PULSE_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("PULSE_PORT") {
            config.port = value
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value))?;
        }
        if let Ok(value) = std::env::var("PULSE_LOG_LEVEL") {
            config.log_level = value.to_lowercase();
        }
        if let Ok(value) = std::env::var("PULSE_ENVIRONMENT") {
            config.environment = value;
        }
        if let Ok(value) = std::env::var("PULSE_SESSION_TTL_SECS") {
            config.session_ttl = parse_secs("PULSE_SESSION_TTL_SECS", &value)?;
        }
        if let Ok(value) = std::env::var("PULSE_SWEEP_INTERVAL_SECS") {
            config.sweep_interval = parse_secs("PULSE_SWEEP_INTERVAL_SECS", &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort("0".into()));
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        if self.sweep_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "PULSE_SWEEP_INTERVAL_SECS",
                value: "0".into(),
            });
        }
        Ok(())
    }

    /// Production deployments log JSON lines; everything else stays
    /// human-readable.
    pub fn json_logs(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_secs(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs());
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPort(_))));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let config = ServerConfig {
            log_level: "verbose".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn zero_sweep_interval_is_rejected() {
        let config = ServerConfig {
            sweep_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn production_environment_switches_to_json_logs() {
        let config = ServerConfig {
            environment: "production".into(),
            ..Default::default()
        };
        assert!(config.json_logs());
    }

    #[test]
    fn env_overrides_apply() {
        std::env::set_var("PULSE_PORT", "9100");
        std::env::set_var("PULSE_LOG_LEVEL", "DEBUG");
        std::env::set_var("PULSE_SESSION_TTL_SECS", "120");

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.session_ttl, Duration::from_secs(120));

        std::env::set_var("PULSE_PORT", "not-a-port");
        assert!(matches!(
            ServerConfig::from_env(),
            Err(ConfigError::InvalidPort(_))
        ));

        std::env::remove_var("PULSE_PORT");
        std::env::remove_var("PULSE_LOG_LEVEL");
        std::env::remove_var("PULSE_SESSION_TTL_SECS");
    }
}
