pub mod api;
pub mod config_service;
pub mod dto;
pub mod logging;
pub mod paths;
pub mod storage;

pub use crate::api::{ApiClient, HttpAuthApi, HttpCommunityApi, HttpPostApi, HttpStatsApi};
pub use crate::config_service::ConfigService;
pub use crate::paths::MindfulPaths;
pub use crate::storage::{
    HostEventSender, JsonFileStore, KvPreferencesRepository, OriginStorage, SessionStateStore,
    TabEvents, TabStorage,
};
