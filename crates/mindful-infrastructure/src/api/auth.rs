//! Login, registration and logout.

use async_trait::async_trait;
use mindful_core::error::Result;
use mindful_core::storage::keys;
use mindful_core::user::{AuthApi, AuthEvent, Credentials, LoginResponse};

use super::client::ApiClient;

const LOGIN_PATH: &str = "/entrar";
const REGISTER_PATH: &str = "/cadastrar";

/// HTTP implementation of [`AuthApi`].
///
/// Successful logins store `accessToken` and `userId` in the client's
/// store; logout removes the token.
#[derive(Clone)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn authenticate(&self, path: &str, credentials: &Credentials) -> Result<LoginResponse> {
        let response: LoginResponse = self.client.post_json(path, credentials).await?;
        let store = self.client.store();
        store
            .set(keys::ACCESS_TOKEN, &response.access_token)
            .await?;
        store
            .set(keys::USER_ID, &response.user_id.to_string())
            .await?;
        tracing::info!("[HttpAuthApi] Signed in as user {}", response.user_id);
        self.client.emit(AuthEvent::LoggedIn {
            user_id: response.user_id,
        });
        Ok(response)
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.authenticate(LOGIN_PATH, credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.authenticate(REGISTER_PATH, credentials).await
    }

    async fn logout(&self) -> Result<()> {
        self.client.store().remove(keys::ACCESS_TOKEN).await?;
        tracing::info!("[HttpAuthApi] Signed out");
        self.client.emit(AuthEvent::LoggedOut);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::test_client;
    use mindful_core::storage::KeyValueStore;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        Credentials {
            email: "ana@example.com".to_string(),
            password: "segredo".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/entrar"))
            .and(body_json(json!({"email": "ana@example.com", "password": "segredo"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "tok",
                "userId": 5,
                "email": "ana@example.com"
            })))
            .mount(&server)
            .await;

        let (client, tab) = test_client(&server.uri());
        let mut events = client.subscribe_auth_events();
        let auth = HttpAuthApi::new(client);

        let response = auth.login(&credentials()).await.unwrap();
        assert_eq!(response.user_id, 5);
        assert_eq!(tab.get(keys::ACCESS_TOKEN).await.unwrap().as_deref(), Some("tok"));
        assert_eq!(tab.get(keys::USER_ID).await.unwrap().as_deref(), Some("5"));
        assert_eq!(events.try_recv().unwrap(), AuthEvent::LoggedIn { user_id: 5 });
    }

    #[tokio::test]
    async fn test_failed_register_stores_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cadastrar"))
            .respond_with(ResponseTemplate::new(409).set_body_string("exists"))
            .mount(&server)
            .await;

        let (client, tab) = test_client(&server.uri());
        let auth = HttpAuthApi::new(client);

        assert!(auth.register(&credentials()).await.is_err());
        assert_eq!(tab.get(keys::ACCESS_TOKEN).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (client, tab) = test_client("http://127.0.0.1:9");
        tab.set(keys::ACCESS_TOKEN, "tok").await.unwrap();
        let auth = HttpAuthApi::new(client);

        auth.logout().await.unwrap();
        auth.logout().await.unwrap();
        assert_eq!(tab.get(keys::ACCESS_TOKEN).await.unwrap(), None);
    }
}
