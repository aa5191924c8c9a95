use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Selects the mail transport. `develop` talks SMTP to a local test mailbox,
/// `production` goes through the Resend API, `test` only logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeployMode {
    Develop,
    Production,
    Test,
}

impl FromStr for DeployMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "develop" | "development" | "dev" => Ok(Self::Develop),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::Invalid { key: "NODE_ENV", value: other.to_string() }),
        }
    }
}

impl fmt::Display for DeployMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployMode::Develop => write!(f, "develop"),
            DeployMode::Production => write!(f, "production"),
            DeployMode::Test => write!(f, "test"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),
    #[error("environment variable {key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub jwt: JwtConfig,
    pub token_ttl_secs: i64,
    pub mail: MailConfig,
}

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in_secs: i64,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub mode: DeployMode,
    pub sender: String,
    pub web_domain: String,
    pub resend_key: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl EnvConfig {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Every required key is checked
    /// here so the process fails at startup rather than on first use.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let db_url = match get("POSTGRES_URI") {
            Some(uri) => uri,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                require("POSTGRES_USER")?,
                require("POSTGRES_PASSWORD")?,
                require("POSTGRES_HOST")?,
                parse_or(get("POSTGRES_PORT"), "POSTGRES_PORT", 5432u16)?,
                require("DATABASE_NAME")?,
            ),
        };

        let mode = match get("NODE_ENV") {
            Some(v) => v.parse()?,
            None => DeployMode::Develop,
        };

        let resend_key = get("RESEND_KEY");
        if mode == DeployMode::Production && resend_key.is_none() {
            return Err(ConfigError::Missing("RESEND_KEY"));
        }

        let expires_in_secs = parse_or(get("JWT_EXPIRES_IN_SECS"), "JWT_EXPIRES_IN_SECS", 3600i64)?;
        if expires_in_secs <= 0 {
            return Err(ConfigError::Invalid { key: "JWT_EXPIRES_IN_SECS", value: expires_in_secs.to_string() });
        }
        let token_ttl_secs = parse_or(get("VERIFICATION_TOKEN_TTL_SECS"), "VERIFICATION_TOKEN_TTL_SECS", 86_400i64)?;
        if token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid { key: "VERIFICATION_TOKEN_TTL_SECS", value: token_ttl_secs.to_string() });
        }

        Ok(EnvConfig {
            port: parse_or(get("PORT"), "PORT", 8080u16)?,
            db_url,
            jwt: JwtConfig {
                secret: require("JWT_SECRET_KEY")?,
                expires_in_secs,
            },
            token_ttl_secs,
            mail: MailConfig {
                mode,
                sender: require("SENDER_EMAIL")?,
                web_domain: require("WEB_DOMAIN")?,
                resend_key,
                smtp_host: get("SMTP_HOST").unwrap_or_else(|| "mailhog".to_string()),
                smtp_port: parse_or(get("SMTP_PORT"), "SMTP_PORT", 1025u16)?,
            },
        })
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("POSTGRES_URI", "postgres://u:p@localhost:5432/timetrack"),
            ("JWT_SECRET_KEY", "secret"),
            ("SENDER_EMAIL", "noreply@timetrack.dev"),
            ("WEB_DOMAIN", "http://localhost:3000"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<EnvConfig, ConfigError> {
        EnvConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_apply() {
        let cfg = load(&base()).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.jwt.expires_in_secs, 3600);
        assert_eq!(cfg.token_ttl_secs, 86_400);
        assert_eq!(cfg.mail.mode, DeployMode::Develop);
        assert_eq!(cfg.mail.smtp_host, "mailhog");
        assert_eq!(cfg.mail.smtp_port, 1025);
    }

    #[test]
    fn missing_secret_fails_fast() {
        let mut vars = base();
        vars.remove("JWT_SECRET_KEY");
        assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing("JWT_SECRET_KEY"));
    }

    #[test]
    fn production_needs_provider_key() {
        let mut vars = base();
        vars.insert("NODE_ENV", "production");
        assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing("RESEND_KEY"));

        vars.insert("RESEND_KEY", "re_123");
        assert_eq!(load(&vars).unwrap().mail.mode, DeployMode::Production);
    }

    #[test]
    fn db_url_from_parts() {
        let mut vars = base();
        vars.remove("POSTGRES_URI");
        vars.insert("POSTGRES_USER", "tt");
        vars.insert("POSTGRES_PASSWORD", "pw");
        vars.insert("POSTGRES_HOST", "db");
        vars.insert("DATABASE_NAME", "timetrack");
        assert_eq!(load(&vars).unwrap().db_url, "postgres://tt:pw@db:5432/timetrack");
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let mut vars = base();
        vars.insert("PORT", "eighty");
        assert!(matches!(load(&vars), Err(ConfigError::Invalid { key: "PORT", .. })));
    }
}
