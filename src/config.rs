use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Repository
    pub repo_dir: String,
    pub remote: String,
    pub branch: String,

    // Exchange sandbox (used by the external strategy scripts, checked by doctor)
    pub api_key: String,
    pub api_secret: String,
    pub testnet: bool,

    // Capital
    pub initial_capital: f64,

    // Results
    pub results_dir: String,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            repo_dir: env("REPO_DIR", "."),
            remote: env("SYNC_REMOTE", "origin"),
            branch: env("SYNC_BRANCH", "main"),
            api_key: env("BINANCE_API_KEY", ""),
            api_secret: env("BINANCE_API_SECRET", ""),
            testnet: env("TESTNET", "true").to_lowercase() == "true",
            initial_capital: env("INITIAL_CAPITAL", "1000")
                .parse()
                .unwrap_or(1000.0),
            results_dir: env("RESULTS_DIR", "results"),
            log_level: env("LOG_LEVEL", "INFO"),
        }
    }
}
