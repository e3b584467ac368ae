//! Session and authentication
//!
//! The auth service is an external collaborator (login/register/token
//! issuance, one protected profile endpoint). This module holds its HTTP
//! client and the local session store that persists the bearer token across
//! restarts.

pub mod client;
pub mod store;

pub use client::{AuthApi, AuthError, AuthResponse, HttpAuthClient, ProfileResponse, UserIdentity};
pub use store::{Session, SessionStore};
