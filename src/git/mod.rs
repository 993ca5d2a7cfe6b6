//! Wrappers over the system `git` binary using [`tokio::process::Command`].
//!
//! Shelling out instead of linking a git library keeps the operator's
//! hooks, GPG signing, and git config in effect for every commit.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, SyncError};

/// Runs git subcommands inside a fixed repository directory.
pub struct GitCli {
    repo_dir: PathBuf,
}

impl GitCli {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.repo_dir);
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd
    }

    async fn run(&self, op: &'static str, args: &[&str]) -> Result<String> {
        let mut cmd = self.command();
        cmd.args(args);

        debug!(op, "spawning git");

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SyncError::Command {
                op,
                detail: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// URL of the named remote, or [`SyncError::MissingRemote`] if it is
    /// not configured.
    pub async fn remote_url(&self, remote: &str) -> Result<String> {
        let mut cmd = self.command();
        cmd.args(["remote", "get-url", remote]);

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("No such remote") || output.status.code() == Some(2) {
                return Err(SyncError::MissingRemote {
                    remote: remote.to_string(),
                });
            }
            return Err(SyncError::Command {
                op: "remote get-url",
                detail: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Stage every working-tree change: additions, modifications, deletions.
    pub async fn stage_all(&self) -> Result<()> {
        self.run("add", &["add", "-A"]).await.map(|_| ())
    }

    /// Whether anything is staged, via the `diff --cached --quiet`
    /// exit-status convention (0 = clean, 1 = changes staged).
    pub async fn staged_changes_present(&self) -> Result<bool> {
        let mut cmd = self.command();
        cmd.args(["diff", "--cached", "--quiet"]);

        let output = cmd.output().await?;

        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(SyncError::Command {
                    op: "diff --cached",
                    detail: stderr.trim().to_string(),
                })
            }
        }
    }

    pub async fn commit(&self, message: &str) -> Result<()> {
        self.run("commit", &["commit", "-m", message])
            .await
            .map(|_| ())
    }

    /// Push the current branch head to the remote's target branch and
    /// record it as upstream.
    pub async fn push(&self, remote: &str, branch: &str) -> Result<()> {
        let refspec = format!("HEAD:{}", branch);

        let mut cmd = self.command();
        cmd.args(["push", "--set-upstream", remote, &refspec]);

        debug!(remote, branch, "spawning git push");

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SyncError::Publish {
                remote: remote.to_string(),
                branch: branch.to_string(),
                detail: stderr.trim().to_string(),
            });
        }

        Ok(())
    }

    /// Subject line of the HEAD commit.
    pub async fn head_subject(&self) -> Result<String> {
        self.run("log", &["log", "-1", "--format=%s"]).await
    }

    pub async fn rev_parse(&self, rev: &str) -> Result<String> {
        self.run("rev-parse", &["rev-parse", rev]).await
    }

    /// Number of commits reachable from HEAD.
    pub async fn commit_count(&self) -> Result<usize> {
        let out = self.run("rev-list", &["rev-list", "--count", "HEAD"]).await?;
        out.parse().map_err(|_| SyncError::Command {
            op: "rev-list",
            detail: format!("unexpected count output: {}", out),
        })
    }
}

/// Rewrite a configured remote URL into its browsable form.
///
/// scp-style ssh remotes become https, and a trailing `.git` is dropped:
/// `git@github.com:user/repo.git` -> `https://github.com/user/repo`.
/// URLs that are already browsable (or plain paths) pass through.
pub fn browse_url(remote_url: &str) -> String {
    let url = remote_url.trim();

    let url = if let Some(rest) = url.strip_prefix("git@") {
        match rest.split_once(':') {
            Some((host, path)) => format!("https://{}/{}", host, path),
            None => format!("https://{}", rest),
        }
    } else if let Some(rest) = url.strip_prefix("ssh://git@") {
        format!("https://{}", rest)
    } else {
        url.to_string()
    };

    url.strip_suffix(".git").unwrap_or(url.as_str()).to_string()
}
