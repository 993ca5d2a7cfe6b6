use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use strategy_sync::config::Config;
use strategy_sync::sync::MessageSource;

/// Run git in `dir`, panicking on failure. Test scaffolding only.
pub async fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .output()
        .await
        .expect("failed to spawn git");

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialize a work repository on `main` with one committed file.
pub async fn init_repo(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    git(dir, &["init", "-b", "main"]).await;
    git(dir, &["config", "user.name", "Sync Test"]).await;
    git(dir, &["config", "user.email", "sync@test.local"]).await;
    git(dir, &["config", "commit.gpgsign", "false"]).await;

    std::fs::write(dir.join("README.md"), "# workspace\n").unwrap();
    git(dir, &["add", "-A"]).await;
    git(dir, &["commit", "-m", "init"]).await;
}

/// Create a bare repository at `bare` and register it as `origin` of `work`.
pub async fn add_bare_remote(work: &Path, bare: &Path) {
    std::fs::create_dir_all(bare).unwrap();
    git(bare, &["init", "--bare"]).await;
    git(work, &["remote", "add", "origin", bare.to_str().unwrap()]).await;
}

pub fn test_config(repo_dir: &Path) -> Config {
    Config {
        repo_dir: repo_dir.to_string_lossy().into_owned(),
        remote: "origin".to_string(),
        branch: "main".to_string(),
        api_key: String::new(),
        api_secret: String::new(),
        testnet: true,
        initial_capital: 1000.0,
        results_dir: "results".to_string(),
        log_level: "INFO".to_string(),
    }
}

/// Message source that answers the prompt with a fixed line.
pub struct CannedMessage(pub &'static str);

#[async_trait]
impl MessageSource for CannedMessage {
    async fn commit_message(&mut self) -> std::io::Result<String> {
        Ok(self.0.to_string())
    }
}
