//! Terminal rendering of tasks and status messages.
//!
//! Uses `console` for colors, which respects NO_COLOR and turns itself off
//! when output is piped.

use std::io::{self, Write};

use console::style;
use task_core::{Task, TaskStatus};

pub const NO_TASKS: &str = "No tasks found.";
pub const NO_DESCRIPTION: &str = "No description";
pub const NO_TITLE: &str = "<no title>";

/// `Total: N • TODO: a • IN_PROGRESS: b • ...` over every known status.
pub fn summary_line(tasks: &[Task]) -> String {
    let mut parts = vec![format!("Total: {}", tasks.len())];
    for status in TaskStatus::ALL {
        let count = tasks.iter().filter(|task| task.status == status).count();
        parts.push(format!("{status}: {count}"));
    }
    parts.join(" • ")
}

/// `📝 Todo`, `🚧 In Progress`, ...
pub fn status_badge(status: TaskStatus) -> String {
    format!("{} {}", status.emoji(), status.label())
}

/// Multi-line block for one task: id, title with status, description.
pub fn task_block(task: &Task) -> String {
    let title = match task.title.trim() {
        "" => NO_TITLE,
        title => title,
    };
    let description = match task.description.trim() {
        "" => style(NO_DESCRIPTION).dim().to_string(),
        description => description.to_string(),
    };
    format!(
        "{}\n{} • {}\n{}",
        style(format!("Task Id: {}", task.id)).dim(),
        style(title).bold(),
        status_badge(task.status),
        description
    )
}

pub fn success(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out, "{}", style(message).green())
}

/// Failure line on stderr.
pub fn error(message: &str) {
    eprintln!("{} {}", style("error:").red().bold(), message);
}
