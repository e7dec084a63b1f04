// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;

/// Length of a quiz run shown by the client countdown, in seconds.
pub const QUIZ_TIME_LIMIT_SECONDS: i64 = 600;

/// Finishing within this many seconds earns "Speed Demon".
pub const SPEED_DEMON_MAX_SECONDS: i32 = 300;

/// Minimum percentage for "Sharp Shooter".
pub const SHARP_SHOOTER_PERCENTAGE: f64 = 80.0;

/// Name stored when the client does not send one.
pub const DEFAULT_USERNAME: &str = "Anonymous";

/// Usernames are cut to this many characters before they are stored.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Upper bound for the `limit` query parameter on the leaderboard.
pub const MAX_LEADERBOARD_LIMIT: i64 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<String>,
    pub leaderboard_limit: i64,
    /// Directory holding a built browser client, served for unmatched paths.
    pub static_dir: Option<String>,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        let leaderboard_limit = env::var("LEADERBOARD_LIMIT")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .map(|v| v.clamp(1, MAX_LEADERBOARD_LIMIT))
            .unwrap_or(10);

        let static_dir = env::var("STATIC_DIR").ok().filter(|v| !v.is_empty());

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        Self {
            database_url,
            rust_log,
            bind_addr,
            allowed_origins,
            leaderboard_limit,
            static_dir,
            log_dir,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
