use std::collections::{HashMap, HashSet};
use std::time::Duration;

use bosswatch_core::BossStatus;
use bosswatch_core::clock::{format_clock_time, format_remaining};
use chrono::Utc;
use tokio::task::JoinHandle;

use crate::context::{CliContext, SessionHandle};

/// Start the background ticker that announces imminent respawns.
pub async fn start_watch(ctx: &CliContext) {
    let Some(handle) = ctx.session().await else {
        println!("No active group. Pick one with: use --group <name>");
        return;
    };

    let mut tasks = ctx.tasks.lock().await;
    if tasks.watch.is_some() {
        println!("Watch already running; stop it with: stop-watch");
        return;
    }

    let name = handle.read().await.group().name.clone();
    println!("Watching {name}; alerts print as respawns come due");
    tasks.watch = Some(spawn_ticker(handle));
}

pub async fn stop_watch(ctx: &CliContext) {
    let mut tasks = ctx.tasks.lock().await;
    match tasks.watch.take() {
        Some(task) => {
            task.abort();
            println!("Watch stopped");
        }
        None => println!("Watch is not running"),
    }
}

fn spawn_ticker(handle: SessionHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // One alert per cycle boundary; keyed on the boundary instant so a
        // re-recorded kill arms a fresh alert.
        let mut warned: HashSet<(String, i64)> = HashSet::new();
        let mut respawning: HashMap<String, bool> = HashMap::new();

        loop {
            interval.tick().await;
            let now = Utc::now();
            let rows = {
                let session = handle.read().await;
                session.status_rows(now)
            };

            for (boss, snapshot) in rows {
                let is_respawning = snapshot.status == BossStatus::Respawning;
                let was = respawning
                    .insert(boss.name.clone(), is_respawning)
                    .unwrap_or(is_respawning);
                if was && !is_respawning {
                    println!("{} has respawned", boss.name);
                }

                if snapshot.warning {
                    if let (Some(secs), Some(at)) =
                        (snapshot.seconds_until_respawn, snapshot.next_respawn_at)
                    {
                        let key = (boss.name.clone(), at.timestamp());
                        if warned.insert(key) {
                            println!(
                                "{} respawns in {} (at {})",
                                boss.name,
                                format_remaining(secs),
                                format_clock_time(at)
                            );
                        }
                    }
                }
            }

            // A boundary an hour gone can never fire again
            warned.retain(|(_, ts)| now.timestamp() - ts < 3600);
        }
    })
}
