use serde::{Deserialize, Serialize};
use tracing::info;

/// Header carrying the bearer token, as the auth service expects it
const AUTH_HEADER: &str = "x-auth-token";

/// Auth operation failure
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The service rejected the operation; message shown to the user verbatim
    #[error("{0}")]
    Service(String),
    /// The service could not be reached
    #[error("Auth service unreachable: {0}")]
    Transport(String),
    /// A session-bound operation was attempted with no session
    #[error("Not logged in")]
    NotLoggedIn,
}

/// Minimal identity returned alongside a token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Successful login/register payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: UserIdentity,
}

/// Payload of the protected profile endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Error body shape used by the auth service
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Operations offered by the external auth service
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError>;
    async fn register(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError>;
    async fn profile(&self, token: &str) -> Result<ProfileResponse, AuthError>;
}

/// HTTP client for the auth service
pub struct HttpAuthClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn credentials_call(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError> {
        let response = self
            .http
            .post(self.url(path))
            .json(&CredentialsRequest { email, password })
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))
    }
}

/// Surface the service's own message when it provides one
async fn service_error(response: reqwest::Response) -> AuthError {
    let status = response.status();
    let message = match response.json::<ServiceErrorBody>().await {
        Ok(body) => body.message.or(body.error),
        Err(_) => None,
    };
    AuthError::Service(message.unwrap_or_else(|| format!("Auth service returned {}", status)))
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        info!("Logging in {}", email);
        self.credentials_call("/api/auth/login", email, password)
            .await
    }

    async fn register(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        info!("Registering {}", email);
        self.credentials_call("/api/auth/register", email, password)
            .await
    }

    async fn profile(&self, token: &str) -> Result<ProfileResponse, AuthError> {
        let response = self
            .http
            .get(self.url("/api/profile"))
            .header(AUTH_HEADER, token)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))
    }
}
