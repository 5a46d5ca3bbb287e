use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Key for the session-token HMAC; tokens are never stored raw.
    pub session_secret: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let session_secret = std::env::var("SESSION_SECRET")?;
        Ok(Self {
            database_url,
            session_secret,
        })
    }
}
