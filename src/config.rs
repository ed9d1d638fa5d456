use std::env;

use anyhow::Context;
use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub jwt_secret: SecretString,
    pub admin: AdminCredentials,
}

/// The single operator account; it lives in configuration, not in the database.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: SecretString,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(10);
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let admin_email = env::var("ADMIN_EMAIL").context("ADMIN_EMAIL is not set")?;
        let admin_password = env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD is not set")?;

        Ok(Self {
            port,
            database_url,
            host,
            db_max_connections,
            jwt_secret: SecretString::from(jwt_secret),
            admin: AdminCredentials {
                email: admin_email,
                password: SecretString::from(admin_password),
            },
        })
    }
}
