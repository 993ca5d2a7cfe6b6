use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use strategy_sync::config::Config;
use strategy_sync::error::SyncError;
use strategy_sync::sync::{StdinMessageSource, SyncOutcome, SyncRunner};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let mut runner = SyncRunner::new(&cfg, StdinMessageSource);

    match runner.run().await {
        Ok(SyncOutcome::NoChanges) => {
            println!("没有需要同步的更改");
        }
        Ok(SyncOutcome::Pushed { url }) => {
            println!("✅ 同步完成: {}", url);
        }
        Err(SyncError::MissingRemote { remote }) => {
            print_remote_setup(&remote, &cfg.branch);
            std::process::exit(1);
        }
        Err(err @ SyncError::Publish { .. }) => {
            eprintln!("❌ 推送失败: {}", err);
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("❌ 同步失败: {}", err);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_remote_setup(remote: &str, branch: &str) {
    println!("⚠️  尚未配置远程仓库 '{}'", remote);
    println!();
    println!("配置方法:");
    println!("  1. 在 https://github.com/new 创建一个新仓库");
    println!(
        "  2. git remote add {} git@github.com:<用户名>/<仓库名>.git",
        remote
    );
    println!("  3. git push -u {} {}", remote, branch);
}
