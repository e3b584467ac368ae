use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::client::{AuthApi, AuthError, ProfileResponse, UserIdentity};

/// The current login: bearer token plus minimal identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user: UserIdentity,
}

/// Holds and persists the current session
///
/// Rehydration happens synchronously in `open`, before anything is served,
/// so a previously logged-in user never sees a logged-out flash and no
/// extra login call is made. A failed login/register leaves any existing
/// session untouched.
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    path: PathBuf,
    session: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Default session file location under the platform data directory
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("signsync")
            .join("session.json")
    }

    /// Open the store, rehydrating a persisted session if one exists
    pub fn open(api: Arc<dyn AuthApi>, path: PathBuf) -> Result<Self> {
        let session = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    info!("Rehydrated session from {}", path.display());
                    Some(session)
                }
                Err(e) => {
                    warn!("Ignoring unreadable session file: {}", e);
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(e).context(format!("Failed to read session file {}", path.display()))
            }
        };

        Ok(Self {
            api,
            path,
            session: RwLock::new(session),
        })
    }

    pub async fn current(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.session.read().await.is_some()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self.api.login(email, password).await?;
        Ok(self
            .install(Session {
                token: response.token,
                user: response.user,
            })
            .await)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self.api.register(email, password).await?;
        Ok(self
            .install(Session {
                token: response.token,
                user: response.user,
            })
            .await)
    }

    /// Clear the session, in memory and on disk, unconditionally
    pub async fn logout(&self) {
        *self.session.write().await = None;
        match fs::remove_file(&self.path) {
            Ok(()) => info!("Session cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove session file: {}", e),
        }
    }

    /// Fetch the protected profile for the current session
    pub async fn profile(&self) -> Result<ProfileResponse, AuthError> {
        let token = {
            let session = self.session.read().await;
            session.as_ref().ok_or(AuthError::NotLoggedIn)?.token.clone()
        };
        self.api.profile(&token).await
    }

    async fn install(&self, session: Session) -> Session {
        if let Err(e) = self.persist(&session) {
            // The login itself succeeded; a persistence failure only costs
            // rehydration on the next start.
            error!("Failed to persist session: {}", e);
        }
        *self.session.write().await = Some(session.clone());
        info!("Session established");
        session
    }

    fn persist(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create session directory")?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw).context("Failed to write session file")?;
        Ok(())
    }
}
