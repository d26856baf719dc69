use std::str::FromStr;

use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compact" | "" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown LOG_FORMAT '{other}', expecting compact|json")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub http_addr: String,
    pub store: StoreBackend,
    pub log_level: String,
    pub log_format: LogFormat,
    pub http_request_body_limit_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let store = parse_store_backend(&lookup)?;
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let log_format = lookup("LOG_FORMAT")
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()?
            .unwrap_or(LogFormat::Compact);
        let http_request_body_limit_bytes = parse_positive(
            "HTTP_REQUEST_BODY_LIMIT_BYTES",
            lookup("HTTP_REQUEST_BODY_LIMIT_BYTES"),
            1024 * 1024,
        )?;

        Ok(Self {
            http_addr,
            store,
            log_level,
            log_format,
            http_request_body_limit_bytes,
        })
    }
}

fn parse_store_backend(lookup: &impl Fn(&str) -> Option<String>) -> Result<StoreBackend> {
    let backend = lookup("STORE_BACKEND").unwrap_or_else(|| "memory".to_string());

    match backend.trim().to_ascii_lowercase().as_str() {
        "memory" => Ok(StoreBackend::Memory),
        "postgres" => {
            let database_url = get_required(lookup, "DATABASE_URL")
                .context("DATABASE_URL is required for STORE_BACKEND=postgres")?;
            let max_connections = parse_positive(
                "DATABASE_MAX_CONNECTIONS",
                lookup("DATABASE_MAX_CONNECTIONS"),
                5,
            )?;
            Ok(StoreBackend::Postgres {
                database_url,
                max_connections,
            })
        }
        other => Err(anyhow!(
            "unknown STORE_BACKEND '{other}', expecting memory|postgres"
        )),
    }
}

fn get_required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = lookup(key).ok_or_else(|| anyhow!("{key} is not set"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_positive<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr + PartialEq + Default + ToString,
{
    let value = raw
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow!("Failed to parse {key}, expecting positive integer"))?;

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{LogFormat, Settings, StoreBackend};

    fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_use_memory_store() {
        let settings = settings_from(&[]).expect("defaults must be valid");

        assert_eq!(settings.http_addr, "0.0.0.0:8080");
        assert_eq!(settings.store, StoreBackend::Memory);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.log_format, LogFormat::Compact);
        assert_eq!(settings.http_request_body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let err = settings_from(&[("STORE_BACKEND", "postgres")])
            .expect_err("missing DATABASE_URL must fail");
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn postgres_backend_reads_url_and_pool_size() {
        let settings = settings_from(&[
            ("STORE_BACKEND", "Postgres"),
            ("DATABASE_URL", " postgres://blog@localhost/blog "),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .expect("settings must be valid");

        assert_eq!(
            settings.store,
            StoreBackend::Postgres {
                database_url: "postgres://blog@localhost/blog".to_string(),
                max_connections: 12,
            }
        );
    }

    #[test]
    fn zero_body_limit_is_rejected() {
        let err = settings_from(&[("HTTP_REQUEST_BODY_LIMIT_BYTES", "0")])
            .expect_err("zero limit must fail");
        assert!(err.to_string().contains("must be > 0"));
    }

    #[test]
    fn log_format_and_level_are_read() {
        let settings = settings_from(&[("LOG_FORMAT", "JSON"), ("RUST_LOG", "debug")])
            .expect("settings must be valid");

        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(settings_from(&[("STORE_BACKEND", "dynamo")]).is_err());
    }
}
