use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

/// Everything that can stop a sync run.
///
/// `MissingRemote` and `Publish` are kept apart so the binary can print
/// setup instructions for the former and a plain failure for the latter.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("remote '{remote}' is not configured")]
    MissingRemote { remote: String },

    #[error("push to {remote}/{branch} failed: {detail}")]
    Publish {
        remote: String,
        branch: String,
        detail: String,
    },

    #[error("git {op} failed: {detail}")]
    Command { op: &'static str, detail: String },

    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),
}
