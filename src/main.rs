mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use birthday_core::config::BirthdayConfig;
use birthday_core::week::WeekWindow;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "birthday-notifs")]
#[command(about = "Weekly birthday reminders from your month documents to a Telegram chat")]
struct Cli {
    /// Use this config file instead of ~/.config/birthday-notifs/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the birthday message for a week
    Upcoming {
        /// Any date in the week (MM-DD-YYYY), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Look up the week's birthdays and post them to Telegram, with retries
    Notify {
        /// Any date in the week (MM-DD-YYYY), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Upload the 12-month calendar skeleton (overwrites existing months)
    Skeleton {
        /// Skeleton .json file; generated from scratch when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Add or delete a single birthday
    Update {
        /// Full month name (e.g. "June")
        month: String,
        /// Day of the month
        day: String,
        /// Person's name
        name: String,
        /// "add" or "delete"
        #[arg(short, long, default_value = "add")]
        action: String,
    },
    /// Apply add/delete rows from a .csv file
    Bulk {
        file: PathBuf,

        #[arg(long, default_value = "Name")]
        name_col: String,

        #[arg(long, default_value = "Date")]
        date_col: String,

        #[arg(long, default_value = "Update")]
        update_col: String,
    },
    /// Print the Monday-Sunday range for a date
    Week {
        /// Any date in the week (MM-DD-YYYY), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so rendered messages on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Week { date } = &cli.command {
        let window = WeekWindow::from_arg(date.as_deref())?;
        return commands::week::run(window);
    }

    let config = BirthdayConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Upcoming { date } => {
            let window = WeekWindow::from_arg(date.as_deref())?;
            commands::upcoming::run(&config, window).await
        }
        Commands::Notify { date } => commands::notify::run(&config, date.as_deref()).await,
        Commands::Skeleton { file } => commands::skeleton::run(&config, file.as_deref()).await,
        Commands::Update {
            month,
            day,
            name,
            action,
        } => commands::update::run(&config, &month, &day, &name, &action).await,
        Commands::Bulk {
            file,
            name_col,
            date_col,
            update_col,
        } => {
            let columns = birthday_core::bulk::BulkColumns {
                name: name_col,
                date: date_col,
                update: update_col,
            };
            commands::bulk::run(&config, &file, &columns).await
        }
        Commands::Week { .. } => Ok(()),
    }
}
