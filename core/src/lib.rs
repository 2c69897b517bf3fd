pub mod catalog;
pub mod clock;
pub mod config;
pub mod mapping;
pub mod respawn;
pub mod session;
pub mod sync;
pub mod time_input;

// Re-exports for convenience
pub use bosswatch_types::{AppConfig, Boss, GroupConfig, RemoteRecord, RemoteSettings};
pub use catalog::{CatalogError, GroupCatalog, RosterBoss};
pub use config::AppConfigExt;
pub use mapping::BossMapping;
pub use respawn::{
    BossStatus, BossStatusSnapshot, UpcomingEntry, Urgency, calculate_status, reconcile_kill_time,
    upcoming_bosses,
};
pub use session::{GroupSession, RecordedKill, SessionError};
pub use sync::{CacheError, LocalCache, RemoteError, RemoteStore, RestRemote, SaveOutcome, SyncSource, SyncStore};
pub use time_input::{ACCEPTED_FORMATS, TimeParseError, parse_time_input};
