use chrono::Local;
use clap::Parser;
use pregtrack::application::context::default_device;
use pregtrack::application::init::init;
use pregtrack::application::{AppContext, ConfigService};
use pregtrack::cli::{
    format_cycle, format_reminders, format_settings, format_status, AnchorAction, Cli, Commands,
    CycleAction, NotifyAction,
};
use pregtrack::domain::{parse_date, PregnancyInfo, ReminderKind};
use pregtrack::error::PregtrackError;
use pregtrack::infrastructure::Home;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PREGTRACK_LOG";
const RESYNC_KEYS: [&str; 2] = ["language", "cycle_length"];

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), PregtrackError> {
    let home = Home::locate()?;
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Init { language } => {
            init(&home, &language)?;
            println!("Initialized pregtrack at {}", home.root().display());

            let ctx = open(home)?;
            if ctx.notifications.request_permissions().await {
                println!("Notifications enabled");
            } else {
                println!("Notifications unavailable; reminders will not be delivered");
            }
            ctx.close();
            Ok(())
        }
        Commands::Status => {
            let ctx = open(home)?;
            let record = ctx.tracking.anchor()?.ok_or(PregtrackError::MissingAnchor)?;
            let info = PregnancyInfo::compute(record.last_period_start, today);
            let content = ctx.content.week(&ctx.config.language, info.weeks_pregnant);
            print!("{}", format_status(&record, &info, &content));
            ctx.sync_reminders().await?;
            ctx.close();
            Ok(())
        }
        Commands::Anchor { action } => {
            let ctx = open(home)?;
            match action {
                AnchorAction::Period { date } => {
                    let record = ctx.tracking.set_period(parse_date(&date, today)?, today)?;
                    println!("Last period start: {}", record.last_period_start);
                }
                AnchorAction::Due { date } => {
                    let record = ctx.tracking.set_due_date(parse_date(&date, today)?, today)?;
                    println!(
                        "Due date: {} (last period start {})",
                        record.last_period_start.due_date().format("%Y-%m-%d"),
                        record.last_period_start
                    );
                }
                AnchorAction::Clear => {
                    ctx.tracking.clear_anchor()?;
                    println!("Anchor cleared");
                }
            }
            ctx.sync_reminders().await?;
            ctx.close();
            Ok(())
        }
        Commands::Cycle { action } => {
            let ctx = open(home)?;
            match action {
                CycleAction::Log { date } => {
                    let record = ctx.tracking.log_cycle(parse_date(&date, today)?, today)?;
                    println!("Logged period start {}", record.last_period_start);
                    ctx.sync_reminders().await?;
                }
                CycleAction::Status => match ctx.tracking.cycle_status(today)? {
                    Some(info) => print!("{}", format_cycle(&info)),
                    None => println!("No period logged. Use 'pregtrack cycle log <DATE>'."),
                },
            }
            ctx.close();
            Ok(())
        }
        Commands::Notify { action } => {
            let ctx = open(home)?;
            match action {
                NotifyAction::List => {
                    let pending = ctx.notifications.pending().await;
                    println!("{}", format_reminders(&pending).trim_end());
                }
                NotifyAction::Settings => {
                    print!("{}", format_settings(&ctx.notifications.get_settings()));
                }
                NotifyAction::Enable { kind } => {
                    let kind = ReminderKind::from_str(&kind).map_err(PregtrackError::UnknownReminder)?;
                    ctx.set_enabled(kind, true).await?;
                    println!("{} on", kind);
                }
                NotifyAction::Disable { kind } => {
                    let kind = ReminderKind::from_str(&kind).map_err(PregtrackError::UnknownReminder)?;
                    ctx.set_enabled(kind, false).await?;
                    println!("{} off", kind);
                }
                NotifyAction::Sync => {
                    ctx.sync_reminders().await?;
                    let pending = ctx.notifications.pending().await;
                    println!("{}", format_reminders(&pending).trim_end());
                }
                NotifyAction::CancelAll => {
                    ctx.notifications.cancel_all_notifications().await;
                    println!("All reminders cancelled");
                }
                NotifyAction::Permission { revoke: true } => {
                    ctx.notifications.revoke_permissions().await;
                    println!("Permission revoked");
                }
                NotifyAction::Permission { revoke: false } => {
                    if ctx.notifications.request_permissions().await {
                        println!("Permission granted");
                    } else {
                        println!("Permission denied");
                    }
                }
            }
            ctx.close();
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(home);

            if list {
                let config = service.list()?;
                println!("language = {}", config.language);
                println!("cycle_length = {}", config.cycle_length);
                println!("created = {}", config.created.to_rfc3339());
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);

                    // Reminder text and the period prediction depend on these
                    if RESYNC_KEYS.contains(&k.as_str()) {
                        let ctx = open(service.into_home())?;
                        ctx.sync_reminders().await?;
                        ctx.close();
                    }
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: pregtrack config [--list | <key> [<value>]]");
                println!("Valid keys: language, cycle_length, created");
            }
            Ok(())
        }
    }
}

fn open(home: Home) -> Result<AppContext, PregtrackError> {
    let device = default_device(&home);
    AppContext::open(home, device)
}
