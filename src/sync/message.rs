use async_trait::async_trait;
use tokio::io::{stdin, stdout, AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Where the commit message comes from.
///
/// Injected into [`super::SyncRunner`] so the procedure runs without a
/// terminal; tests supply canned input instead.
#[async_trait]
pub trait MessageSource: Send {
    /// One free-text line. Empty means "use the default".
    async fn commit_message(&mut self) -> std::io::Result<String>;
}

/// Interactive prompt on the controlling terminal.
pub struct StdinMessageSource;

#[async_trait]
impl MessageSource for StdinMessageSource {
    async fn commit_message(&mut self) -> std::io::Result<String> {
        let mut out = stdout();
        out.write_all("提交说明 (回车使用默认): ".as_bytes()).await?;
        out.flush().await?;

        let mut line = String::new();
        BufReader::new(stdin()).read_line(&mut line).await?;
        Ok(line)
    }
}
