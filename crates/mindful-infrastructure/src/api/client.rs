//! Shared HTTP plumbing for the Mindful API.

use std::sync::Arc;
use std::time::Duration;

use mindful_core::config::ApiConfig;
use mindful_core::error::{MindfulError, Result};
use mindful_core::storage::{KeyValueStore, keys};
use mindful_core::user::AuthEvent;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;

const AUTH_EVENT_CAPACITY: usize = 16;

/// Header carrying the viewer id, used by the server to compute
/// `hasLiked`/`hasDisliked`.
pub const USER_ID_HEADER: &str = "idUsuario";

/// HTTP client that attaches the stored credentials to every request.
///
/// A 401 from any endpoint is broadcast as [`AuthEvent::SessionInvalidated`]
/// before the error is returned.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn KeyValueStore>,
    auth_events: broadcast::Sender<AuthEvent>,
}

impl ApiClient {
    /// Creates a client for `config.base_url`.
    ///
    /// # Arguments
    /// * `config` - Base URL and optional request timeout
    /// * `store` - Where `accessToken` and `userId` are read from
    pub fn new(config: &ApiConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| MindfulError::config(format!("failed to build HTTP client: {}", e)))?;

        let (auth_events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            auth_events,
        })
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Subscribes to session-level events (401s, login, logout).
    pub fn subscribe_auth_events(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth_events.subscribe()
    }

    pub(crate) fn emit(&self, event: AuthEvent) {
        // Nobody listening is fine.
        let _ = self.auth_events.send(event);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches `Authorization` and `idUsuario` when present in the store.
    async fn authorize(&self, mut request: RequestBuilder) -> RequestBuilder {
        match self.store.get(keys::ACCESS_TOKEN).await {
            Ok(Some(token)) if !token.is_empty() => {
                request = request.bearer_auth(token);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("[ApiClient] Failed to read access token: {}", e),
        }
        match self.store.get(keys::USER_ID).await {
            Ok(Some(user_id)) if !user_id.is_empty() => {
                request = request.header(USER_ID_HEADER, user_id);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("[ApiClient] Failed to read user id: {}", e),
        }
        request
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.authorize(request).await.send().await?;
        let status = response.status();
        tracing::debug!("[ApiClient] {} {}", status.as_u16(), response.url().path());

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("[ApiClient] Session rejected by server");
            self.emit(AuthEvent::SessionInvalidated);
            return Err(MindfulError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MindfulError::api(status.as_u16(), body));
        }

        let body = response.text().await?;
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.http.get(self.url(path))).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.http.post(self.url(path))).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::{OriginStorage, TabStorage};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) fn test_client(base_url: &str) -> (ApiClient, TabStorage) {
        let tab = OriginStorage::new().open_tab();
        let client = ApiClient::new(&ApiConfig::default(), Arc::new(tab.clone()))
            .unwrap()
            .with_base_url(base_url);
        (client, tab)
    }

    #[tokio::test]
    async fn test_sends_stored_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .and(header("authorization", "Bearer tok-1"))
            .and(header("idusuario", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let (client, tab) = test_client(&server.uri());
        tab.set(keys::ACCESS_TOKEN, "tok-1").await.unwrap();
        tab.set(keys::USER_ID, "42").await.unwrap();

        let posts: Vec<serde_json::Value> = client.get_json("/posts").await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_works_without_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts/1/like"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let (client, _tab) = test_client(&server.uri());
        let body: Option<serde_json::Value> = client.post_empty("/posts/1/like").await.unwrap();
        assert!(body.is_none());

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_broadcasts_session_invalidated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (client, _tab) = test_client(&server.uri());
        let mut events = client.subscribe_auth_events();

        let err = client
            .get_json::<serde_json::Value>("/posts/me")
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(events.try_recv().unwrap(), AuthEvent::SessionInvalidated);
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let (client, _tab) = test_client(&server.uri());
        let err = client
            .post_json::<_, serde_json::Value>("/posts", &serde_json::json!({"content": "x"}))
            .await
            .unwrap_err();
        match err {
            MindfulError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Nothing listens on this port once the server is dropped.
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };
        let (client, _tab) = test_client(&uri);
        let err = client
            .get_json::<serde_json::Value>("/posts")
            .await
            .unwrap_err();
        assert!(err.is_remote());
        assert!(!err.is_unauthorized());
    }
}
