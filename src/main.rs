use anyhow::Context;
use clap::Parser;
use tracing::debug;

use embedlinker::cli::{Cli, run_cli_command};
use embedlinker::config::{get_config, init_config, init_config_from};
use embedlinker::system::logging::init_logging;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 加载静态配置
    match cli.config.as_deref() {
        Some(path) => init_config_from(path),
        None => init_config(),
    }

    let config = get_config();
    let guard = init_logging(&config.logging).context("Failed to initialize logging")?;
    debug!("Storage location: {:?}", config.storage.location());

    let result = run_cli_command(cli.command);
    // 退出前刷新非阻塞日志
    drop(guard);

    if let Err(e) = result {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }

    Ok(())
}
