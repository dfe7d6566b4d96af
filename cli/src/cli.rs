//! CLI argument definitions using clap derive macros.

use std::time::Duration;

use clap::{Parser, Subcommand};
use task_core::config::parse_timeout;
use task_core::{ApiLayout, TaskStatus};

/// Manage tasks on a remote task API
#[derive(Debug, Parser)]
#[command(name = "tasks", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the task API (overrides API_BASE_URL / MANAGER_* variables)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides TASKS_API_TIMEOUT_SECS)
    #[arg(long, global = true, value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Path layout of the API: plain or spring (overrides TASKS_API_LAYOUT)
    #[arg(long, global = true, value_parser = parse_layout)]
    pub layout: Option<ApiLayout>,

    /// Run task commands without checking the health endpoint first
    #[arg(long, global = true)]
    pub skip_health_check: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every task with a per-status summary
    List,
    /// Show a single task
    Show {
        id: String,
    },
    /// Create a task
    Create {
        /// Title (required)
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Initial status; the server decides when omitted
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Edit a task; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Delete a task
    Delete {
        id: String,
    },
    /// Check the health endpoint
    Health,
    /// Print the API version
    Version,
}

impl Command {
    /// Whether the command needs a healthy backend before it runs.
    pub fn is_gated(&self) -> bool {
        !matches!(self, Command::Health | Command::Version)
    }
}

fn parse_layout(raw: &str) -> Result<ApiLayout, task_core::ConfigError> {
    raw.parse()
}
