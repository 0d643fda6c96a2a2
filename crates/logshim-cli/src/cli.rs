//! CLI structure and command definitions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use logshim_core::LoggingContext;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logshim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Structured logging and console sanitizing shim", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML file overriding logging settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Emit one structured record
    Emit {
        /// Level (debug, info, warn, error) or console method (log)
        level: String,

        /// Message text
        message: String,

        /// Metadata as a JSON object
        #[arg(short, long)]
        meta: Option<String>,
    },

    /// Sanitize stdin line by line
    Sanitize,

    /// Run a command, routing its output through structured logging
    Run {
        /// Program to run
        command: String,

        /// Program arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Cli {
    /// Run the selected command, returning the process exit code.
    pub async fn execute(&self) -> Result<i32> {
        use crate::commands::*;

        match &self.command {
            Commands::Emit { level, message, meta } => {
                let ctx = self.context()?;
                emit::execute(&ctx, level, message, meta.as_deref()).await
            }
            Commands::Sanitize => {
                sanitize::execute().await
            }
            Commands::Run { command, args } => {
                let ctx = self.context()?;
                run::execute(&ctx, command, args).await
            }
        }
    }

    fn context(&self) -> Result<LoggingContext> {
        let config = logshim_core::config::load(self.config.as_deref())?;
        Ok(LoggingContext::init(&config)?)
    }
}
