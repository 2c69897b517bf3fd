use std::collections::{HashMap, HashSet};
use std::io::Write;

use bosswatch_core::clock::{
    format_clock_time, format_countdown, format_interval, format_remaining, format_timestamp,
};
use bosswatch_core::config::{REMOTE_KEY_ENV, REMOTE_URL_ENV};
use bosswatch_core::respawn::progress_fraction;
use bosswatch_core::sync::RemoteStore;
use bosswatch_core::time_input::ACCEPTED_FORMATS;
use bosswatch_core::{
    AppConfigExt, BossStatus, GroupCatalog, RecordedKill, RemoteRecord, RestRemote, SaveOutcome,
    SessionError, SyncSource,
};
use chrono::Utc;

use crate::context::{CliContext, SessionHandle};

pub async fn startup_banner(ctx: &CliContext) {
    println!("bosswatch - boss respawn tracker");
    println!(
        "{} groups, {} bosses in the catalog",
        ctx.catalog.groups().len(),
        ctx.catalog.roster().len()
    );
    if ctx.remote_enabled() {
        println!("Cloud sync: enabled");
    } else {
        println!("Cloud sync: not configured, running local-only (see: config)");
    }
}

pub async fn list_groups(ctx: &CliContext) {
    let active_slug = match ctx.session().await {
        Some(handle) => Some(handle.read().await.group().slug.clone()),
        None => None,
    };

    println!("{:<24} {:<16} Icon", "Group", "Slug");
    println!("{}", "-".repeat(48));
    for group in ctx.catalog.groups() {
        let marker = if active_slug.as_deref() == Some(group.slug.as_str()) {
            " (active)"
        } else {
            ""
        };
        println!(
            "{:<24} {:<16} {}{}",
            group.name, group.slug, group.icon, marker
        );
    }
    println!("\nTotal: {} groups", ctx.catalog.groups().len());
}

pub async fn use_group(query: &str, ctx: &CliContext) {
    let Some(group) = ctx.catalog.find_group(query).cloned() else {
        println!("No group named '{query}'. See: groups");
        return;
    };

    // A watch ticking against the previous group would keep announcing it
    {
        let mut tasks = ctx.tasks.lock().await;
        if let Some(task) = tasks.watch.take() {
            task.abort();
            println!("Stopped the watch for the previous group");
        }
    }

    let slug = group.slug.clone();
    let handle = ctx.open_session(group).await;
    {
        let session = handle.read().await;
        match session.source() {
            SyncSource::Remote => println!("Opened {} (cloud sync active)", session.group().name),
            SyncSource::LocalFallback => println!(
                "Opened {} (cloud unreachable, using local data)",
                session.group().name
            ),
            SyncSource::LocalOnly => println!("Opened {} (local-only)", session.group().name),
        }

        let tracked = session
            .mapping()
            .iter()
            .filter(|b| b.last_killed.is_some())
            .count();
        println!(
            "{} bosses, {} with recorded kills",
            session.mapping().len(),
            tracked
        );
    }

    ctx.remember_group(&slug).await;
}

pub async fn show_status(ctx: &CliContext) {
    let Some(handle) = active_session(ctx).await else {
        return;
    };
    let session = handle.read().await;
    let now = Utc::now();

    println!(
        "Group: {}    {}",
        session.group().name,
        format_timestamp(now)
    );
    println!(
        "{:<22} {:<9} {:<13} {:<10} {:<21} Respawn at",
        "Boss", "Interval", "Status", "Countdown", "Killed at"
    );
    println!("{}", "-".repeat(96));

    let mut any_warning = false;
    for (boss, snapshot) in session.status_rows(now) {
        let status = match snapshot.status {
            BossStatus::Alive => "alive",
            BossStatus::Respawning => {
                if snapshot.warning {
                    any_warning = true;
                    "respawning *"
                } else {
                    "respawning"
                }
            }
        };
        let countdown = snapshot
            .seconds_until_respawn
            .map(format_countdown)
            .unwrap_or_else(|| "-".to_string());
        let killed_at = boss
            .last_killed
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string());
        let respawn_at = match snapshot.next_respawn_at {
            Some(at) => {
                let mark = if snapshot.theoretical { " (est)" } else { "" };
                format!("{}{mark}", format_timestamp(at))
            }
            None => "-".to_string(),
        };
        println!(
            "{:<22} {:<9} {:<13} {:<10} {:<21} {}",
            boss.name,
            format_interval(boss.respawn_minutes),
            status,
            countdown,
            killed_at,
            respawn_at
        );
    }

    if any_warning {
        println!("\n* due within five minutes");
    }
}

pub async fn show_upcoming(ctx: &CliContext) {
    let Some(handle) = active_session(ctx).await else {
        return;
    };
    let session = handle.read().await;
    let now = Utc::now();

    let entries = session.upcoming(now);
    if entries.is_empty() {
        println!("Nothing due in the next five minutes");
        return;
    }

    for entry in entries {
        let mark = if entry.theoretical { " (est)" } else { "" };
        let filled = (progress_fraction(entry.seconds_until) * 10.0).round() as usize;
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(10 - filled));
        println!(
            "[{:<8}] {:<22} in {:<10} at {}{:<6} {bar}",
            entry.urgency.label(),
            entry.name,
            format_remaining(entry.seconds_until),
            format_clock_time(entry.respawn_at),
            mark
        );
    }
}

pub async fn record_now(boss: &str, ctx: &CliContext) {
    let Some(handle) = active_session(ctx).await else {
        return;
    };
    let mut session = handle.write().await;
    match session.record_now(boss, Utc::now()).await {
        Ok(kill) => report_kill("Recorded", &kill),
        Err(e) => print_session_error(&e),
    }
}

pub async fn record_at(boss: &str, time: &str, ctx: &CliContext) {
    let Some(handle) = active_session(ctx).await else {
        return;
    };
    let mut session = handle.write().await;
    match session.record_at(boss, time, Utc::now()).await {
        Ok(kill) => report_kill("Recorded", &kill),
        Err(e) => print_session_error(&e),
    }
}

pub async fn update_time(boss: &str, time: &str, ctx: &CliContext) {
    let Some(handle) = active_session(ctx).await else {
        return;
    };
    let mut session = handle.write().await;
    match session.record_at(boss, time, Utc::now()).await {
        Ok(kill) => report_kill("Updated", &kill),
        Err(e) => print_session_error(&e),
    }
}

pub async fn clear_one(boss: &str, ctx: &CliContext) {
    let Some(handle) = active_session(ctx).await else {
        return;
    };
    let mut session = handle.write().await;
    match session.clear_one(boss, Utc::now()).await {
        Ok((name, outcome)) => {
            println!("Cleared {name}");
            report_outcome(&outcome);
        }
        Err(e) => print_session_error(&e),
    }
}

pub async fn clear_all(ctx: &CliContext) {
    let Some(handle) = active_session(ctx).await else {
        return;
    };
    let mut session = handle.write().await;
    let outcome = session.clear_all(Utc::now()).await;
    println!("Cleared every kill record in {}", session.group().name);
    report_outcome(&outcome);
}

pub async fn sync_now(ctx: &CliContext) {
    let Some(handle) = active_session(ctx).await else {
        return;
    };
    let mut session = handle.write().await;
    match session.refresh(Utc::now()).await {
        SyncSource::Remote => println!("Synced from the cloud"),
        SyncSource::LocalFallback => println!("Cloud unreachable; reloaded local data"),
        SyncSource::LocalOnly => println!("Reloaded local data (cloud not configured)"),
    }
}

pub async fn remote_check(ctx: &CliContext) {
    let Some(settings) = ctx.remote_settings() else {
        println!("Cloud sync is not configured; nothing to check");
        return;
    };
    let client = match RestRemote::new(settings) {
        Ok(client) => client,
        Err(e) => {
            println!("Failed to build remote client: {e}");
            return;
        }
    };

    let rows = match client.fetch_all().await {
        Ok(rows) => rows,
        Err(e) => {
            println!("Remote query failed: {e}");
            return;
        }
    };

    println!("Connected; {} rows in the shared table", rows.len());
    if rows.is_empty() {
        println!("The table is empty: no group has synced yet");
        return;
    }

    let known: HashSet<&str> = ctx
        .catalog
        .roster()
        .iter()
        .map(|b| b.name.as_str())
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut by_group: HashMap<&str, Vec<&RemoteRecord>> = HashMap::new();
    for row in &rows {
        let slug = row.group_name.as_str();
        if !by_group.contains_key(slug) {
            order.push(slug);
        }
        by_group.entry(slug).or_default().push(row);
    }

    for slug in order {
        let group_rows = &by_group[slug];
        println!("\n{slug}: {} rows", group_rows.len());

        let stale: Vec<&str> = group_rows
            .iter()
            .filter(|r| !known.contains(r.boss_name.as_str()))
            .map(|r| r.boss_name.as_str())
            .collect();
        if !stale.is_empty() {
            println!("  rows not in the current roster: {}", stale.join(", "));
        }
        if let Some(latest) = group_rows.iter().filter_map(|r| r.updated_at).max() {
            println!("  last synced {}", format_timestamp(latest));
        }
    }
}

pub async fn show_config(ctx: &CliContext) {
    let config = ctx.config.read().await;

    println!(
        "Cloud sync: {}",
        if ctx.remote_enabled() {
            "enabled"
        } else {
            "not configured"
        }
    );
    let resolved = config.resolved_remote();
    let url = if resolved.url.trim().is_empty() {
        "(empty)"
    } else {
        resolved.url.as_str()
    };
    println!("  url: {url}");
    println!(
        "  api key: {}",
        if resolved.api_key.trim().is_empty() {
            "(empty)"
        } else {
            "(set)"
        }
    );
    println!("  env overrides: {REMOTE_URL_ENV}, {REMOTE_KEY_ENV}");

    match &config.active_group {
        Some(slug) => println!("Startup group: {slug}"),
        None => println!("Startup group: (none)"),
    }

    println!(
        "Catalog: {} groups, {} bosses",
        ctx.catalog.groups().len(),
        ctx.catalog.roster().len()
    );
    if let Some(path) = GroupCatalog::override_path() {
        let state = if path.exists() {
            "in use"
        } else {
            "not present"
        };
        println!("  override {}: {state}", path.display());
    }
}

pub fn exit() {
    write!(std::io::stdout(), "quitting...").expect("error exiting");
    std::io::stdout().flush().expect("error flushing stdout");
}

async fn active_session(ctx: &CliContext) -> Option<SessionHandle> {
    let session = ctx.session().await;
    if session.is_none() {
        println!("No active group. Pick one with: use --group <name>");
    }
    session
}

fn report_kill(verb: &str, kill: &RecordedKill) {
    println!(
        "{verb} {} at {}",
        kill.boss_name,
        format_timestamp(kill.recorded_at)
    );
    if kill.adjusted {
        println!("  (time was outside the current cycle; snapped to the nearest plausible one)");
    }
    report_outcome(&kill.outcome);
}

fn report_outcome(outcome: &SaveOutcome) {
    if !outcome.local_persisted {
        println!("  warning: local cache write failed; the change is in memory only");
    }
    if outcome.degraded() {
        println!("  warning: cloud sync failed; saved locally");
    }
}

fn print_session_error(err: &SessionError) {
    match err {
        SessionError::Parse(_) => {
            println!("Unrecognized time format. Accepted formats:");
            for line in ACCEPTED_FORMATS {
                println!("  {line}");
            }
        }
        SessionError::AmbiguousBoss { name, matches } => {
            println!("'{name}' matches multiple bosses: {}", matches.join(", "));
        }
        SessionError::UnknownBoss { name } => {
            println!("Unknown boss: {name}. See: status");
        }
    }
}
