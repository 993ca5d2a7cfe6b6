pub mod message;

pub use message::{MessageSource, StdinMessageSource};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::git::{browse_url, GitCli};

const DEFAULT_MESSAGE_PREFIX: &str = "更新";

/// Terminal states of a sync run that are not failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The staged set was empty; no commit was created.
    NoChanges,
    /// A commit was created and pushed; carries the remote's browsable URL.
    Pushed { url: String },
}

/// Publishes the workspace to its configured remote in one pass: stages
/// the whole tree, then commits and pushes the current branch head to the
/// remote's target branch.
///
/// Holds no state between runs; everything durable lives in git itself.
pub struct SyncRunner<M: MessageSource> {
    git: GitCli,
    remote: String,
    branch: String,
    messages: M,
}

impl<M: MessageSource> SyncRunner<M> {
    pub fn new(cfg: &Config, messages: M) -> Self {
        Self {
            git: GitCli::new(&cfg.repo_dir),
            remote: cfg.remote.clone(),
            branch: cfg.branch.clone(),
            messages,
        }
    }

    pub async fn run(&mut self) -> Result<SyncOutcome> {
        // The remote must exist before anything is mutated.
        let remote_url = self.git.remote_url(&self.remote).await?;
        debug!(%remote_url, "remote configured");

        self.git.stage_all().await?;

        if !self.git.staged_changes_present().await? {
            info!("working tree clean, nothing to sync");
            return Ok(SyncOutcome::NoChanges);
        }

        let raw = self.messages.commit_message().await?;
        let message = resolve_message(&raw, Local::now());

        self.git.commit(&message).await?;
        info!(%message, "commit created");

        self.git.push(&self.remote, &self.branch).await?;

        let url = browse_url(&remote_url);
        info!(remote = %self.remote, branch = %self.branch, %url, "push complete");

        Ok(SyncOutcome::Pushed { url })
    }
}

/// Operator input, trimmed; empty input selects the timestamped default.
fn resolve_message(raw: &str, now: DateTime<Local>) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default_message(now)
    } else {
        trimmed.to_string()
    }
}

/// Default commit message for an empty prompt, minute granularity,
/// local clock.
pub fn default_message(now: DateTime<Local>) -> String {
    format!("{}: {}", DEFAULT_MESSAGE_PREFIX, now.format("%Y-%m-%d %H:%M"))
}
