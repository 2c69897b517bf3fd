use bosswatch_core::config::AppConfigExt;
use bosswatch_core::sync::{LocalCache, RemoteStore, RestRemote, SyncStore};
use bosswatch_core::{AppConfig, GroupCatalog, GroupConfig, GroupSession, RemoteSettings};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::warn;

/// Shared handle to the active group session.
pub type SessionHandle = Arc<RwLock<GroupSession>>;

/// Background task handles owned by the REPL.
#[derive(Default)]
pub struct BackgroundTasks {
    pub watch: Option<JoinHandle<()>>,
}

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the individual state types.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    pub catalog: Arc<GroupCatalog>,
    /// Remote settings resolved once at startup. `None` selects local-only
    /// mode for the whole run.
    remote: Option<RemoteSettings>,
    /// The active group session. None until a `use` command opens one.
    session: Arc<RwLock<Option<SessionHandle>>>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl CliContext {
    pub fn new() -> Self {
        let config = AppConfig::load();
        let resolved = config.resolved_remote();
        let remote = resolved.is_configured().then_some(resolved);
        Self {
            config: Arc::new(RwLock::new(config)),
            catalog: Arc::new(GroupCatalog::load_or_bundled()),
            remote,
            session: Arc::new(RwLock::new(None)),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
        }
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    pub fn remote_settings(&self) -> Option<&RemoteSettings> {
        self.remote.as_ref()
    }

    /// Build the sync store for one group, remote-backed when configured.
    pub fn build_store(&self, slug: &str) -> SyncStore {
        let remote: Option<Box<dyn RemoteStore>> = match &self.remote {
            Some(settings) => match RestRemote::new(settings) {
                Ok(client) => Some(Box::new(client)),
                Err(e) => {
                    warn!("Failed to build remote client, running local-only: {e}");
                    None
                }
            },
            None => None,
        };
        SyncStore::new(
            slug,
            self.catalog.roster().to_vec(),
            LocalCache::new(),
            remote,
        )
    }

    /// Open a session for a group and make it the active one.
    pub async fn open_session(&self, group: GroupConfig) -> SessionHandle {
        let store = self.build_store(&group.slug);
        let session = GroupSession::open(group, store, Utc::now()).await;
        let handle = Arc::new(RwLock::new(session));
        *self.session.write().await = Some(Arc::clone(&handle));
        handle
    }

    /// Get the current session handle, if one exists.
    pub async fn session(&self) -> Option<SessionHandle> {
        self.session.read().await.clone()
    }

    /// Group slug to reopen on startup.
    pub async fn startup_group(&self) -> Option<String> {
        self.config.read().await.active_group.clone()
    }

    /// Persist the active group choice for the next run.
    pub async fn remember_group(&self, slug: &str) {
        let mut config = self.config.write().await;
        if config.active_group.as_deref() != Some(slug) {
            config.active_group = Some(slug.to_string());
            config.clone().save();
        }
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}
