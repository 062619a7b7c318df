//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Tracking service - records marketing interaction events
#[derive(Parser, Debug)]
#[command(name = "tracking-service")]
#[command(version)]
#[command(about = "Records marketing interaction tracking events", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Show the backend, the number of stored events and the latest ones
    Inspect {
        /// How many recent events to print
        #[arg(long, short = 'n', default_value_t = 5)]
        limit: u64,
    },

    /// Write a sample configuration file
    GenerateConfig {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,
    },
}

impl Cli {
    /// 未指定子命令时默认启动服务器
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
