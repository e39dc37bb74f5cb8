use std::env;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite://booknest.db?mode=rwc";
const DEFAULT_JWT_EXPIRATION_MINUTES: i64 = 60;
const DEFAULT_ACTIVATION_URL: &str = "http://localhost:4200/activate-account";

/// Credentials for the Brevo transactional email API
#[derive(Debug, Clone)]
pub struct BrevoSettings {
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: Option<String>,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub database_url: String,

    /// Session token lifetime in minutes
    pub jwt_expiration_minutes: i64,

    /// Frontend landing page for account activation, passed through to the
    /// notification gateway without interpretation
    pub activation_url: String,

    /// Brevo credentials; when absent, activation codes are written to the
    /// log instead of being emailed
    pub brevo: Option<BrevoSettings>,
}

impl Settings {
    /// Load settings from environment variables, applying defaults
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let jwt_expiration_minutes = env::var("JWT_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_JWT_EXPIRATION_MINUTES);

        let activation_url =
            env::var("ACTIVATION_URL").unwrap_or_else(|_| DEFAULT_ACTIVATION_URL.to_string());

        let brevo = match (env::var("BREVO_API_KEY"), env::var("BREVO_SENDER_EMAIL")) {
            (Ok(api_key), Ok(sender_email))
                if !api_key.trim().is_empty() && !sender_email.trim().is_empty() =>
            {
                Some(BrevoSettings {
                    api_key,
                    sender_email,
                    sender_name: env::var("BREVO_SENDER_NAME").ok(),
                })
            }
            _ => None,
        };

        Self {
            bind_addr,
            database_url,
            jwt_expiration_minutes,
            activation_url,
            brevo,
        }
    }
}
