use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, ClientSecrets};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

/// Trades a refresh token for a fresh access token
#[tracing::instrument(skip_all)]
pub async fn refresh_access_token(
    http: &reqwest::Client,
    token_uri: &str,
    client_id: &str,
    client_secret: Option<&str>,
    refresh_token: &str,
) -> Result<OAuthTokens, AuthError> {
    let mut body = vec![
        ("grant_type", "refresh_token".to_string()),
        ("client_id", client_id.to_string()),
        ("refresh_token", refresh_token.to_string()),
    ];
    if let Some(cs) = client_secret.filter(|cs| !cs.is_empty()) {
        body.push(("client_secret", cs.to_string()));
    }

    request_tokens(http, token_uri, &body, "refresh failed").await
}

/// Trades the authorization code from the consent redirect for tokens
#[tracing::instrument(skip_all)]
pub async fn exchange_code(
    http: &reqwest::Client,
    secrets: &ClientSecrets,
    code: &str,
    redirect_uri: &str,
) -> Result<OAuthTokens, AuthError> {
    let body = vec![
        ("grant_type", "authorization_code".to_string()),
        ("code", code.to_string()),
        ("client_id", secrets.client_id.clone()),
        ("client_secret", secrets.client_secret.clone()),
        ("redirect_uri", redirect_uri.to_string()),
    ];

    request_tokens(http, &secrets.token_uri, &body, "code exchange failed").await
}

async fn request_tokens(
    http: &reqwest::Client,
    token_uri: &str,
    body: &[(&str, String)],
    failure: &str,
) -> Result<OAuthTokens, AuthError> {
    let resp = http
        .post(token_uri)
        .form(body)
        .send()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to reach token endpoint"))?;

    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(AuthError::TokenEndpoint {
            status: status.as_u16(),
            message: format!("{failure}: {message}"),
        });
    }

    Ok(resp.json::<OAuthTokens>().await?)
}
