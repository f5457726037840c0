//! Application wiring.
//!
//! [`AppContext`] owns every long-lived service of one client instance:
//! the HTTP collaborators, the preference store, the session clock and the
//! limit watcher. Build it once at startup and call
//! [`AppContext::shutdown`] on teardown.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use mindful_core::calendar::SystemCalendar;
use mindful_core::community::CommunitiesApi;
use mindful_core::config::MindfulConfig;
use mindful_core::post::{Post, PostsApi};
use mindful_core::stats::StatsApi;
use mindful_core::storage::{HostEvent, HostEventSource, KeyValueStore};
use mindful_core::user::{AuthApi, AuthEvent, PreferencesRepository};
use mindful_infrastructure::logging::init_logging;
use mindful_infrastructure::{
    ApiClient, ConfigService, HttpAuthApi, HttpCommunityApi, HttpPostApi, HttpStatsApi,
    JsonFileStore, KvPreferencesRepository, MindfulPaths, SessionStateStore,
};
use tokio::sync::{broadcast, mpsc};
use tracing_appender::non_blocking::WorkerGuard;

use crate::discussion_thread::DiscussionThread;
use crate::feedback_reconciler::PostFeedback;
use crate::limit_policy::{LimitNotice, LimitPolicy, LimitWatcher};
use crate::overview::Overview;
use crate::session_clock::SessionClock;

const STORE_FILE_NAME: &str = "storage.json";

/// Sender half for a native host: push visibility changes here.
pub type NativeEventSender = mpsc::UnboundedSender<HostEvent>;

/// Every service of one running client.
pub struct AppContext {
    paths: MindfulPaths,
    config: MindfulConfig,
    store: Arc<dyn KeyValueStore>,
    api: ApiClient,
    posts: Arc<HttpPostApi>,
    communities: Arc<HttpCommunityApi>,
    stats: Arc<HttpStatsApi>,
    auth: Arc<HttpAuthApi>,
    preferences: Arc<KvPreferencesRepository>,
    clock: SessionClock,
    limit_watcher: LimitWatcher,
    _log_guard: Option<WorkerGuard>,
}

impl AppContext {
    /// Starts a native client.
    ///
    /// Resolves paths (under `base_override` when given), installs logging,
    /// loads `config.toml` and opens the JSON file store. There is no other
    /// tab, so host events only come from the returned sender.
    pub async fn bootstrap(base_override: Option<&Path>) -> Result<(Self, NativeEventSender)> {
        let paths = MindfulPaths::new(base_override)
            .map_err(|e| anyhow!("Failed to resolve paths: {}", e))?;
        std::fs::create_dir_all(paths.logs_dir())
            .map_err(|e| anyhow!("Failed to create {:?}: {}", paths.logs_dir(), e))?;
        let log_guard = init_logging(&paths.logs_dir());

        let config = ConfigService::load(&paths.config_file())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

        let store_file = match &config.storage.dir {
            Some(dir) => dir.join(STORE_FILE_NAME),
            None => paths.store_file(),
        };
        tracing::info!("[AppContext] Using store {:?}", store_file);
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(store_file));

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut context = Self::assemble(paths, config, store, Box::new(events_rx)).await?;
        context._log_guard = log_guard;
        Ok((context, events_tx))
    }

    /// Wires the services over an existing store and event source.
    ///
    /// Hosts with several tabs pass a `TabStorage` and its `TabEvents`.
    pub async fn assemble(
        paths: MindfulPaths,
        config: MindfulConfig,
        store: Arc<dyn KeyValueStore>,
        events: Box<dyn HostEventSource>,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

        let api = ApiClient::new(&config.api, store.clone())
            .map_err(|e| anyhow!("Failed to create API client: {}", e))?;
        let posts = Arc::new(HttpPostApi::new(api.clone()));
        let communities = Arc::new(HttpCommunityApi::new(api.clone()));
        let stats = Arc::new(HttpStatsApi::new(api.clone()));
        let auth = Arc::new(HttpAuthApi::new(api.clone()));
        let preferences = Arc::new(KvPreferencesRepository::new(store.clone()));

        let clock = SessionClock::spawn(
            SessionStateStore::new(store.clone()),
            Arc::new(SystemCalendar),
            events,
            &config.clock,
        )
        .await;

        let policy = Arc::new(LimitPolicy::new(preferences.clone(), auth.clone()));
        let limit_watcher = LimitWatcher::spawn(policy, clock.subscribe());

        tracing::info!("[AppContext] Ready, API at {}", api.base_url());
        Ok(Self {
            paths,
            config,
            store,
            api,
            posts,
            communities,
            stats,
            auth,
            preferences,
            clock,
            limit_watcher,
            _log_guard: None,
        })
    }

    pub fn paths(&self) -> &MindfulPaths {
        &self.paths
    }

    pub fn config(&self) -> &MindfulConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn posts(&self) -> Arc<dyn PostsApi> {
        self.posts.clone()
    }

    pub fn communities(&self) -> Arc<dyn CommunitiesApi> {
        self.communities.clone()
    }

    pub fn stats(&self) -> Arc<dyn StatsApi> {
        self.stats.clone()
    }

    /// Feeds, communities and stats with their empty fallbacks.
    pub fn overview(&self) -> Overview {
        Overview::new(self.posts.clone(), self.communities.clone(), self.stats.clone())
    }

    pub fn auth(&self) -> Arc<dyn AuthApi> {
        self.auth.clone()
    }

    pub fn preferences(&self) -> Arc<dyn PreferencesRepository> {
        self.preferences.clone()
    }

    /// 401s, logins and logouts.
    pub fn subscribe_auth_events(&self) -> broadcast::Receiver<AuthEvent> {
        self.api.subscribe_auth_events()
    }

    pub fn subscribe_limit_notices(&self) -> broadcast::Receiver<LimitNotice> {
        self.limit_watcher.subscribe()
    }

    /// Feedback controller for a post as it was listed.
    pub fn post_feedback(&self, post: &Post) -> PostFeedback {
        PostFeedback::for_post(post, self.posts.clone())
    }

    /// Discussion controller for `post_id`, after its silent initial load.
    pub async fn discussion_thread(&self, post_id: impl Into<String>) -> DiscussionThread {
        let thread = DiscussionThread::new(post_id, self.posts.clone());
        thread.initial_load().await;
        thread
    }

    /// Stops background tasks and writes pending state.
    pub async fn shutdown(&self) {
        self.limit_watcher.shutdown().await;
        self.clock.shutdown().await;
        tracing::info!("[AppContext] Shut down");
    }
}
