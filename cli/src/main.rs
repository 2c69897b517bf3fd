use bosswatch_cli::CliContext;
use bosswatch_cli::commands;
use bosswatch_cli::logging;
use bosswatch_cli::readline;
use bosswatch_cli::watch;
use clap::{Parser, Subcommand};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    let ctx = CliContext::new();
    commands::startup_banner(&ctx).await;

    // Reopen the group from the previous run
    if let Some(slug) = ctx.startup_group().await {
        commands::use_group(&slug, &ctx).await;
    }

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "boss respawn tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Groups,
    Use {
        #[arg(short, long)]
        group: String,
    },
    Status,
    Upcoming,
    Record {
        #[arg(short, long)]
        boss: String,
    },
    RecordAt {
        #[arg(short, long)]
        boss: String,
        #[arg(short, long)]
        time: String,
    },
    Update {
        #[arg(short, long)]
        boss: String,
        #[arg(short, long)]
        time: String,
    },
    Clear {
        #[arg(short, long)]
        boss: String,
    },
    ClearAll,
    Sync,
    Watch,
    StopWatch,
    RemoteCheck,
    Config,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "bosswatch".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Groups) => commands::list_groups(ctx).await,
        Some(Commands::Use { group }) => commands::use_group(group, ctx).await,
        Some(Commands::Status) => commands::show_status(ctx).await,
        Some(Commands::Upcoming) => commands::show_upcoming(ctx).await,
        Some(Commands::Record { boss }) => commands::record_now(boss, ctx).await,
        Some(Commands::RecordAt { boss, time }) => commands::record_at(boss, time, ctx).await,
        Some(Commands::Update { boss, time }) => commands::update_time(boss, time, ctx).await,
        Some(Commands::Clear { boss }) => commands::clear_one(boss, ctx).await,
        Some(Commands::ClearAll) => commands::clear_all(ctx).await,
        Some(Commands::Sync) => commands::sync_now(ctx).await,
        Some(Commands::Watch) => watch::start_watch(ctx).await,
        Some(Commands::StopWatch) => watch::stop_watch(ctx).await,
        Some(Commands::RemoteCheck) => commands::remote_check(ctx).await,
        Some(Commands::Config) => commands::show_config(ctx).await,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
