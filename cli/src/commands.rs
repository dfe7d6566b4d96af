//! Command dispatch: the caller layer between the CLI and `TaskApi`.
//!
//! Input is trimmed here before it reaches the API, task commands are gated on
//! a healthy backend, and `edit` turns a partial change into the full replace
//! the API expects.

use std::io::Write;

use anyhow::{bail, Result};
use task_core::{is_healthy, ClientConfig, TaskApi, Transport, UserMessage};
use tracing::{debug, info};

use crate::cli::{Cli, Command};
use crate::view;

pub const SERVICE_UNAVAILABLE: &str = "Service unavailable";
pub const VERSION_UNAVAILABLE: &str = "API version unavailable";

/// Environment configuration with command-line overrides applied.
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout = timeout;
    }
    if let Some(layout) = cli.layout {
        config.layout = layout;
    }
    Ok(config)
}

/// Fails with the health call's message, or `Service unavailable` when the
/// payload does not report UP.
pub fn ensure_healthy<T: Transport>(api: &TaskApi<T>) -> Result<(), UserMessage> {
    let payload = api.health()?;
    if is_healthy(&payload) {
        Ok(())
    } else {
        Err(UserMessage::new(SERVICE_UNAVAILABLE))
    }
}

pub fn run<T: Transport>(
    api: &TaskApi<T>,
    command: &Command,
    skip_health_check: bool,
    out: &mut dyn Write,
) -> Result<()> {
    if command.is_gated() && !skip_health_check {
        ensure_healthy(api)?;
    }

    match command {
        Command::List => {
            let tasks = api.get_tasks()?;
            debug!(count = tasks.len(), "loaded tasks");
            if tasks.is_empty() {
                writeln!(out, "{}", view::NO_TASKS)?;
                return Ok(());
            }
            writeln!(out, "{}", view::summary_line(&tasks))?;
            for task in &tasks {
                writeln!(out, "\n{}", view::task_block(task))?;
            }
        }
        Command::Show { id } => {
            let task = api.get_task(id.trim())?;
            writeln!(out, "{}", view::task_block(&task))?;
        }
        Command::Create {
            title,
            description,
            status,
        } => {
            let task = api.create_task(title.trim(), description.trim(), *status)?;
            info!(id = %task.id, "task created");
            view::success(out, "Task created")?;
            writeln!(out, "{}", view::task_block(&task))?;
        }
        Command::Edit {
            id,
            title,
            description,
            status,
        } => {
            let current = api.get_task(id.trim())?;
            let title = title.as_deref().unwrap_or(&current.title).trim();
            let description = description
                .as_deref()
                .unwrap_or(&current.description)
                .trim();
            let status = status.unwrap_or(current.status);
            let task = api.update_task(&current.id, title, description, status)?;
            info!(id = %task.id, "task updated");
            view::success(out, "Task updated")?;
            writeln!(out, "{}", view::task_block(&task))?;
        }
        Command::Delete { id } => {
            api.delete_task(id.trim())?;
            info!(id = %id.trim(), "task deleted");
            view::success(out, "Deleted")?;
        }
        Command::Health => {
            let payload = api.health()?;
            writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
            if !is_healthy(&payload) {
                bail!(SERVICE_UNAVAILABLE);
            }
        }
        Command::Version => match api.api_version()? {
            Some(version) => writeln!(out, "API version: {version}")?,
            None => writeln!(out, "{VERSION_UNAVAILABLE}")?,
        },
    }
    Ok(())
}
