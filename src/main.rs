//! OmniTask - Main Entry Point
//!
//! Command-line front end for the dashboard. The actual implementation is in
//! the `omnitask` library.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use omnitask::formatting::{
    format_history, format_meetings, format_notifications, format_report, format_tasks,
};
use omnitask::model::{format_iso_date, local_date_today};
use omnitask::report::{export_file_name, render};
use omnitask::validation::{parse_date, parse_period, parse_status, parse_time};
use omnitask::{
    AppConfig, Dashboard, ExportFormat, FileStore, NewMeeting, NewTask, TracingNotifier,
};
use tracing::info;

/// OmniTask - tasks, notes, meetings and reminders from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(long, default_value = "omnitask.toml")]
    config: PathBuf,

    /// Directory holding the data files (overrides the config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level filter (overrides the config; RUST_LOG wins over both)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the reminder scheduler until Ctrl-C
    Run,

    /// Run one reminder check now and print the notification log
    Check,

    /// Print a period report, optionally exporting it
    Report {
        /// day, week, month or year
        #[arg(long)]
        period: String,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Export format: csv or doc
        #[arg(long)]
        export: Option<String>,

        /// Directory for the exported file
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// List tasks
    Tasks {
        /// Case-insensitive search over title and description
        #[arg(long)]
        search: Option<String>,

        /// Only tasks with this status
        #[arg(long)]
        status: Option<String>,
    },

    /// Add a task
    AddTask {
        #[arg(long)]
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        #[arg(long)]
        status: Option<String>,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        remarks: String,

        /// Remind on the due date
        #[arg(long)]
        reminder: bool,
    },

    /// Print tasks split into past, today and future
    History,

    /// List meetings, upcoming first
    Meetings,

    /// Schedule a meeting
    AddMeeting {
        #[arg(long)]
        title: String,

        /// Meeting date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Start time (HH:MM)
        #[arg(long)]
        time: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Platform or location
        #[arg(long, default_value = "")]
        platform: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    omnitask::logging::init_logging(&config.log_level);

    let backend = FileStore::new(&config.data_dir);
    let mut dashboard = Dashboard::open(&config, backend, Arc::new(TracingNotifier));

    match args.command {
        Command::Run => {
            if config.reminders.enabled {
                dashboard.start_reminders()?;
            } else {
                info!("reminders disabled in config");
            }
            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for Ctrl-C")?;
            dashboard.shutdown().await?;
        }
        Command::Check => {
            let outcome = dashboard.check_reminders();
            info!(due = outcome.due, appended = outcome.appended, "reminder check done");
            println!("{}", format_notifications(&dashboard.notifications()));
        }
        Command::Report {
            period,
            date,
            export,
            out,
        } => {
            let period = parse_period(&period)?;
            let reference = date.unwrap_or_else(|| format_iso_date(local_date_today()));
            let report = dashboard.report(period, &reference)?;
            println!("{}", format_report(&report));

            if let Some(format) = export {
                let format: ExportFormat = format
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?;
                let path = write_export(
                    &out,
                    &export_file_name(&report, format),
                    &render(&report, format),
                )?;
                println!("Exported to {}", path.display());
            }
        }
        Command::Tasks { search, status } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let tasks = dashboard
                .store()
                .search_tasks(search.as_deref().unwrap_or(""), status);
            println!("{}", format_tasks(&tasks));
        }
        Command::AddTask {
            title,
            date,
            status,
            description,
            remarks,
            reminder,
        } => {
            let mut new_task = NewTask::new(title, parse_date(&date)?)
                .with_description(description)
                .with_remarks(remarks)
                .with_reminder(reminder);
            if let Some(status) = status {
                new_task = new_task.with_status(parse_status(&status)?);
            }
            let task = dashboard.store().add_task(new_task)?;
            println!("Task created with ID: {}", task.id);
        }
        Command::History => {
            let view = omnitask::views::history(&dashboard.store().tasks(), local_date_today());
            println!("{}", format_history(&view));
        }
        Command::Meetings => {
            let (upcoming, past) = dashboard
                .store()
                .split_meetings(chrono::Local::now().naive_local());
            println!("{}", format_meetings(&upcoming, &past));
        }
        Command::AddMeeting {
            title,
            date,
            time,
            description,
            platform,
        } => {
            let meeting = dashboard.store().add_meeting(NewMeeting {
                title,
                date: parse_date(&date)?,
                time: parse_time(&time)?,
                description,
                platform,
            })?;
            println!("Meeting created with ID: {}", meeting.id);
        }
    }

    Ok(())
}

fn write_export(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(file_name);
    std::fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
