//! Setup checks for the strategy workspace.
//!
//! Mirrors the onboarding steps: exchange sandbox credentials, trading
//! mode, capital allocation, and the results directory the strategy
//! scripts write their JSON artifacts into.

use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::error::SyncError;
use crate::git::GitCli;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetupCheck {
    pub name: &'static str,
    pub status: CheckStatus,
    /// Hint for the operator; empty on pass.
    pub detail: String,
}

impl SetupCheck {
    fn pass(name: &'static str) -> Self {
        Self {
            name,
            status: CheckStatus::Pass,
            detail: String::new(),
        }
    }

    fn warn(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Warn,
            detail: detail.into(),
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Fail,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SetupReport {
    pub checks: Vec<SetupCheck>,
}

impl SetupReport {
    /// Warnings alone do not fail the report.
    pub fn is_ok(&self) -> bool {
        !self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }

    pub fn print_summary(&self) {
        for check in &self.checks {
            let tag = match check.status {
                CheckStatus::Pass => "[ OK ]",
                CheckStatus::Warn => "[WARN]",
                CheckStatus::Fail => "[FAIL]",
            };
            if check.detail.is_empty() {
                println!("  {} {}", tag, check.name);
            } else {
                println!("  {} {}: {}", tag, check.name, check.detail);
            }
        }

        println!();
        if self.is_ok() {
            println!("Workspace is ready.");
        } else {
            println!("Workspace is not ready; fix the failed checks above.");
        }
    }
}

/// Run every setup check against the current configuration.
pub async fn check(cfg: &Config) -> SetupReport {
    let git = GitCli::new(&cfg.repo_dir);

    let mut report = SetupReport::default();
    report.checks.push(check_remote(&git, &cfg.remote).await);
    report.checks.push(check_credentials(cfg));
    report.checks.push(check_trading_mode(cfg));
    report.checks.push(check_capital(cfg));
    report.checks.push(check_results_dir(&cfg.results_dir));
    report
}

async fn check_remote(git: &GitCli, remote: &str) -> SetupCheck {
    match git.remote_url(remote).await {
        Ok(_) => SetupCheck::pass("sync-remote"),
        Err(SyncError::MissingRemote { .. }) => SetupCheck::fail(
            "sync-remote",
            format!(
                "remote '{}' is not configured; run `git remote add {} <url>`",
                remote, remote
            ),
        ),
        Err(err) => SetupCheck::fail("sync-remote", err.to_string()),
    }
}

fn check_credentials(cfg: &Config) -> SetupCheck {
    if cfg.api_key.is_empty() || cfg.api_secret.is_empty() {
        SetupCheck::fail(
            "api-credentials",
            "set BINANCE_API_KEY and BINANCE_API_SECRET in .env (never commit them)",
        )
    } else {
        SetupCheck::pass("api-credentials")
    }
}

fn check_trading_mode(cfg: &Config) -> SetupCheck {
    if cfg.testnet {
        SetupCheck::pass("trading-mode")
    } else {
        SetupCheck::warn(
            "trading-mode",
            "TESTNET=false: strategies will trade with real funds",
        )
    }
}

fn check_capital(cfg: &Config) -> SetupCheck {
    if cfg.initial_capital.is_finite() && cfg.initial_capital > 0.0 {
        SetupCheck::pass("capital-allocation")
    } else {
        SetupCheck::fail(
            "capital-allocation",
            format!(
                "INITIAL_CAPITAL must be a positive amount, got {}",
                cfg.initial_capital
            ),
        )
    }
}

/// The strategy scripts drop JSON artifacts here; a file that no longer
/// parses usually means an interrupted run.
fn check_results_dir(dir: &str) -> SetupCheck {
    let path = Path::new(dir);
    if !path.is_dir() {
        return SetupCheck::warn(
            "results-dir",
            format!("'{}' does not exist yet; run the strategy scripts first", dir),
        );
    }

    let mut corrupt = Vec::new();
    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => {
            return SetupCheck::fail("results-dir", format!("cannot read '{}': {}", dir, err))
        }
    };

    for entry in entries.flatten() {
        let file = entry.path();
        if file.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let parses = std::fs::read_to_string(&file)
            .ok()
            .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
            .is_some();
        if !parses {
            corrupt.push(
                file.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
        }
    }

    if corrupt.is_empty() {
        SetupCheck::pass("results-dir")
    } else {
        corrupt.sort();
        SetupCheck::fail(
            "results-dir",
            format!("corrupt result artifacts: {}", corrupt.join(", ")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            repo_dir: ".".to_string(),
            remote: "origin".to_string(),
            branch: "main".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            testnet: true,
            initial_capital: 1000.0,
            results_dir: "results".to_string(),
            log_level: "INFO".to_string(),
        }
    }

    #[test]
    fn missing_credentials_fail() {
        let mut cfg = test_config();
        cfg.api_secret = String::new();
        let check = check_credentials(&cfg);
        assert_eq!(check.status, CheckStatus::Fail);
    }

    #[test]
    fn present_credentials_pass() {
        assert_eq!(check_credentials(&test_config()).status, CheckStatus::Pass);
    }

    #[test]
    fn live_trading_warns_but_does_not_fail() {
        let mut cfg = test_config();
        cfg.testnet = false;
        let check = check_trading_mode(&cfg);
        assert_eq!(check.status, CheckStatus::Warn);

        let report = SetupReport {
            checks: vec![check],
        };
        assert!(report.is_ok());
    }

    #[test]
    fn non_positive_capital_fails() {
        let mut cfg = test_config();
        cfg.initial_capital = 0.0;
        assert_eq!(check_capital(&cfg).status, CheckStatus::Fail);
    }

    #[test]
    fn missing_results_dir_is_a_warning() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("results");
        let check = check_results_dir(missing.to_str().unwrap());
        assert_eq!(check.status, CheckStatus::Warn);
    }

    #[test]
    fn corrupt_artifact_is_reported_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("obv_backtest.json"),
            r#"{"trades": 12, "pnl": 3.4}"#,
        )
        .unwrap();
        std::fs::write(tmp.path().join("atr_backtest.json"), "{truncated").unwrap();

        let check = check_results_dir(tmp.path().to_str().unwrap());
        assert_eq!(check.status, CheckStatus::Fail);
        assert!(check.detail.contains("atr_backtest.json"));
        assert!(!check.detail.contains("obv_backtest.json"));
    }

    #[test]
    fn healthy_results_dir_passes() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("ma_cross.json"), r#"{"pnl": 1.0}"#).unwrap();
        // Non-JSON files are ignored.
        std::fs::write(tmp.path().join("notes.txt"), "not json").unwrap();

        let check = check_results_dir(tmp.path().to_str().unwrap());
        assert_eq!(check.status, CheckStatus::Pass);
    }
}
