//! Google OAuth2 for the YouTube Data API.
//!
//! [`Authorizer::session`] loads stored credentials. It refreshes them when
//! they have expired and falls back to interactive consent when there are
//! none. Updated credentials are always written back to the
//! [`CredentialStore`].

pub mod consent;
pub mod oauth;
pub mod store;

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{consent::ConsentFlow, oauth::OAuthTokens, store::CredentialStore};

pub const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube.force-ssl";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Access tokens this close to expiry are refreshed ahead of time
const EXPIRY_SKEW_SECS: i64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid client secrets: {0}")]
    InvalidClientSecrets(String),
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Token endpoint error: {status} - {message}")]
    TokenEndpoint { status: u16, message: String },
    #[error("Consent flow failed: {0}")]
    Consent(String),
    #[error("Credential store error: {0}")]
    Store(#[from] store::StoreError),
}

/// OAuth client registration, as downloaded from the Google Cloud Console
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
}

impl ClientSecrets {
    /// Reads `client_secrets.json`; both `installed` and `web` clients are accepted
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AuthError::InvalidClientSecrets(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, AuthError> {
        #[derive(Deserialize)]
        struct Wrapper {
            installed: Option<ClientSecrets>,
            web: Option<ClientSecrets>,
        }

        let wrapper: Wrapper = serde_json::from_str(raw)
            .map_err(|e| AuthError::InvalidClientSecrets(e.to_string()))?;

        wrapper.installed.or(wrapper.web).ok_or_else(|| {
            AuthError::InvalidClientSecrets("expected an 'installed' or 'web' client".into())
        })
    }
}

/// Persisted credentials, laid out like Google's `authorized_user` token file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl Default for StoredCredentials {
    fn default() -> Self {
        Self {
            token: None,
            refresh_token: None,
            token_uri: default_token_uri(),
            client_id: String::new(),
            client_secret: String::new(),
            scopes: Vec::new(),
            expiry: None,
        }
    }
}

impl StoredCredentials {
    fn from_consent(
        secrets: &ClientSecrets,
        scopes: &[String],
        tokens: OAuthTokens,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            token: Some(tokens.access_token),
            refresh_token: tokens.refresh_token,
            token_uri: secrets.token_uri.clone(),
            client_id: secrets.client_id.clone(),
            client_secret: secrets.client_secret.clone(),
            scopes: scopes.to_vec(),
            expiry: tokens.expires_in.map(|secs| now + Duration::seconds(secs)),
        }
    }

    /// Applies a refresh response; the old refresh token is kept when Google omits one
    fn refreshed(&self, tokens: OAuthTokens, now: DateTime<Utc>) -> Self {
        Self {
            token: Some(tokens.access_token),
            refresh_token: tokens.refresh_token.or_else(|| self.refresh_token.clone()),
            expiry: tokens.expires_in.map(|secs| now + Duration::seconds(secs)),
            ..self.clone()
        }
    }

    /// An access token is present and not about to expire.
    /// Tokens without a recorded expiry are taken at face value.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.token, self.expiry) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(_), Some(expiry)) => expiry > now + Duration::seconds(EXPIRY_SKEW_SECS),
        }
    }

    /// Whether these credentials were granted every scope in `scopes`.
    /// Files that do not record scopes are assumed to cover them.
    pub fn covers(&self, scopes: &[String]) -> bool {
        self.scopes.is_empty() || scopes.iter().all(|s| self.scopes.contains(s))
    }
}

/// An authorized handle for calling the YouTube Data API
#[derive(Clone)]
pub struct Session {
    access_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Where the OAuth client registration comes from
enum SecretsSource {
    Loaded(ClientSecrets),
    /// Read on first use, so a missing file only matters once consent is needed
    File(PathBuf),
}

impl SecretsSource {
    fn load(&self) -> Result<Cow<'_, ClientSecrets>, AuthError> {
        match self {
            SecretsSource::Loaded(secrets) => Ok(Cow::Borrowed(secrets)),
            SecretsSource::File(path) => ClientSecrets::from_file(path).map(Cow::Owned),
        }
    }
}

pub struct Authorizer<S, C> {
    http: reqwest::Client,
    secrets: SecretsSource,
    scopes: Vec<String>,
    store: S,
    consent: C,
}

impl<S, C> Authorizer<S, C>
where
    S: CredentialStore,
    C: ConsentFlow + Send + Sync,
{
    pub fn new(secrets: ClientSecrets, store: S, consent: C) -> Self {
        Self::with_secrets(SecretsSource::Loaded(secrets), store, consent)
    }

    /// Like [`Authorizer::new`], but `client_secrets.json` is only read when
    /// interactive consent is needed
    pub fn from_secrets_file(path: impl Into<PathBuf>, store: S, consent: C) -> Self {
        Self::with_secrets(SecretsSource::File(path.into()), store, consent)
    }

    fn with_secrets(secrets: SecretsSource, store: S, consent: C) -> Self {
        Self {
            http: reqwest::Client::new(),
            secrets,
            scopes: vec![YOUTUBE_SCOPE.to_string()],
            store,
            consent,
        }
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Returns a usable session. It refreshes expired credentials or asks the
    /// user for consent when needed.
    #[tracing::instrument(skip(self))]
    pub async fn session(&self) -> Result<Session, AuthError> {
        let now = Utc::now();

        if let Some(stored) = self.store.load().filter(|c| c.covers(&self.scopes)) {
            if let (true, Some(token)) = (stored.is_valid_at(now), &stored.token) {
                return Ok(Session::new(token.clone()));
            }

            if let Some(refresh_token) = &stored.refresh_token {
                tracing::info!("Refreshing expired access token");
                let tokens = oauth::refresh_access_token(
                    &self.http,
                    &stored.token_uri,
                    &stored.client_id,
                    Some(stored.client_secret.as_str()),
                    refresh_token,
                )
                .await
                .inspect_err(|e| tracing::error!(error = %e, "Failed to refresh access token"))?;

                let refreshed = stored.refreshed(tokens, now);
                self.store.save(&refreshed)?;
                return Ok(Session::new(refreshed.token.unwrap_or_default()));
            }
        }

        tracing::info!("No usable stored credentials; starting interactive consent");
        let secrets = self
            .secrets
            .load()
            .inspect_err(|e| tracing::error!(error = %e, "Failed to load client secrets"))?;

        let tokens = self
            .consent
            .obtain_consent(&secrets, &self.scopes)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "OAuth consent failed"))?;

        let credentials = StoredCredentials::from_consent(&secrets, &self.scopes, tokens, now);
        self.store.save(&credentials)?;
        Ok(Session::new(credentials.token.unwrap_or_default()))
    }
}
