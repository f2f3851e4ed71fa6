//! API configuration

use infra_notify::NotifyConfig;
use serde::Deserialize;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Staff username accepted by the token endpoint; empty disables it
    pub auth_username: String,
    /// Staff password accepted by the token endpoint
    pub auth_password: String,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Static key guarding the programmatic intake endpoint
    pub intake_api_key: String,
    /// Directory where uploaded x-ray files are stored
    pub upload_dir: String,
    /// When true, submissions run the simulated adjudicator instead of
    /// leaving claims awaiting a decision. Simulation only.
    pub simulate_adjudication: bool,
    /// SMTP relay host; when unset, outbound mail is recorded, not sent
    pub smtp_host: Option<String>,
    /// SMTP username
    pub smtp_username: String,
    /// SMTP password
    pub smtp_password: String,
    /// From address on outbound mail
    pub from_address: String,
    /// Claims-inbox recipient for generated documents
    pub claims_inbox: String,
    /// Path to the ONNX abscess model, when inference is enabled
    pub model_path: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            auth_username: String::new(),
            auth_password: String::new(),
            database_url: "postgres://localhost/dental_practice".to_string(),
            log_level: "info".to_string(),
            intake_api_key: "change-me-intake-key".to_string(),
            upload_dir: "./uploads".to_string(),
            simulate_adjudication: false,
            smtp_host: None,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: "noreply@practice.example".to_string(),
            claims_inbox: "claims@practice.example".to_string(),
            model_path: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Notification settings, when SMTP is configured
    pub fn notify_config(&self) -> Option<NotifyConfig> {
        self.smtp_host.as_ref().map(|host| NotifyConfig {
            smtp_host: host.clone(),
            smtp_username: self.smtp_username.clone(),
            smtp_password: self.smtp_password.clone(),
            from_address: self.from_address.clone(),
            claims_inbox: self.claims_inbox.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_config_requires_smtp_host() {
        let config = ApiConfig::default();
        assert!(config.notify_config().is_none());

        let config = ApiConfig {
            smtp_host: Some("smtp.example.com".to_string()),
            ..ApiConfig::default()
        };
        let notify = config.notify_config().unwrap();
        assert_eq!(notify.claims_inbox, "claims@practice.example");
    }
}
