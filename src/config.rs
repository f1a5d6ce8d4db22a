use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub jwt_secret: String,
    pub jwt_expiry_minutes: i64,
    pub host: IpAddr,
    pub port: u16,
    pub registration: RegistrationMode,
    pub allowed_origins: Vec<String>,
    pub max_body_size: usize,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationMode {
    Open,
    Closed,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let storage = match env_or("TASKTRACKER_STORAGE", "postgres").as_str() {
            "postgres" => StorageBackend::Postgres {
                database_url: env_required("DATABASE_URL")?,
            },
            "memory" => StorageBackend::Memory,
            other => {
                return Err(format!(
                    "Invalid TASKTRACKER_STORAGE '{other}': expected 'postgres' or 'memory'"
                ));
            }
        };

        let jwt_secret = env_required("JWT_SECRET")?;

        let jwt_expiry_minutes: i64 = env_or("TASKTRACKER_JWT_EXPIRY_MINUTES", "43200")
            .parse()
            .map_err(|e| format!("Invalid TASKTRACKER_JWT_EXPIRY_MINUTES: {e}"))?;
        if jwt_expiry_minutes <= 0 {
            return Err("TASKTRACKER_JWT_EXPIRY_MINUTES must be positive".to_string());
        }

        let host: IpAddr = env_or("TASKTRACKER_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid TASKTRACKER_HOST: {e}"))?;

        let port: u16 = env_or("TASKTRACKER_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid TASKTRACKER_PORT: {e}"))?;

        let registration = parse_registration(&env_or("TASKTRACKER_REGISTRATION", "open"))?;

        let allowed_origins = parse_origins(&env_or(
            "TASKTRACKER_ALLOWED_ORIGINS",
            "http://localhost:3000",
        ));

        let max_body_size: usize = env_or("TASKTRACKER_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid TASKTRACKER_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("TASKTRACKER_LOG_LEVEL", "info");

        Ok(Config {
            storage,
            jwt_secret,
            jwt_expiry_minutes,
            host,
            port,
            registration,
            allowed_origins,
            max_body_size,
            log_level,
        })
    }
}

fn parse_registration(raw: &str) -> Result<RegistrationMode, String> {
    match raw {
        "open" => Ok(RegistrationMode::Open),
        "closed" => Ok(RegistrationMode::Closed),
        other => Err(format!(
            "Invalid TASKTRACKER_REGISTRATION '{other}': expected 'open' or 'closed'"
        )),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_normalized() {
        assert_eq!(
            parse_origins(" http://localhost:3000 , https://app.example.com/ ,,"),
            vec!["http://localhost:3000", "https://app.example.com"]
        );
    }

    #[test]
    fn registration_accepts_only_open_or_closed() {
        assert_eq!(parse_registration("open"), Ok(RegistrationMode::Open));
        assert_eq!(parse_registration("closed"), Ok(RegistrationMode::Closed));

        for typo in ["Closed", "disabled", ""] {
            let err = parse_registration(typo).unwrap_err();
            assert!(err.contains("TASKTRACKER_REGISTRATION"), "{err}");
        }
    }
}
