use clap::Parser;
use colored::Colorize;

use tracking_service::cli::{Cli, Commands};
use tracking_service::config::{StaticConfig, get_config, init_config_from};
use tracking_service::runtime::lifetime::startup::format_startup_error;
use tracking_service::runtime::modes;
use tracking_service::system::init_logging;

const DEFAULT_SAMPLE_CONFIG_PATH: &str = "config.example.toml";

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{}", format_startup_error(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command_or_default() {
        Commands::GenerateConfig { output_path } => generate_config(output_path.as_deref()),
        command => {
            init_config_from(cli.config.as_deref());
            let config = get_config();

            // guard 必须存活到进程结束
            let _log_guard = init_logging(&config.logging)?;

            match command {
                Commands::Inspect { limit } => modes::run_inspect(limit).await,
                _ => modes::run_server().await,
            }
        }
    }
}

/// 生成示例配置文件（不加载配置和日志）
fn generate_config(output_path: Option<&str>) -> anyhow::Result<()> {
    let path = output_path.unwrap_or(DEFAULT_SAMPLE_CONFIG_PATH);
    StaticConfig::default()
        .save_to_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path, e))?;
    println!("{} Sample configuration written to {}", "✓".green(), path);
    Ok(())
}
