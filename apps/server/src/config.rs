use std::{net::SocketAddr, time::Duration};

use crate::auth::decode_secret_key;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Secret used to verify identity-provider tokens. `None` disables the
    /// auth check entirely (local development).
    pub jwt_secret: Option<Vec<u8>>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("LH_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
            .parse()
            .expect("Invalid LH_LISTEN_ADDR");
        let db_path = std::env::var("LH_DB_PATH").unwrap_or_else(|_| "./db/leadhub.db".into());
        let cors_allow = std::env::var("LH_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("LH_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let jwt_secret = std::env::var("LH_JWT_SECRET")
            .ok()
            .map(|raw| decode_secret_key(&raw).expect("Invalid LH_JWT_SECRET"));
        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
        }
    }
}
