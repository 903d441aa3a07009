//! Interactive OAuth consent for installed applications.
//!
//! The user opens the printed authorization URL in a browser. Google then
//! redirects to a one-shot HTTP listener on the loopback interface, and the
//! code it carries is exchanged for tokens.

use std::{future::Future, net::Ipv4Addr};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};
use url::Url;

use crate::auth::{
    oauth::{self, OAuthTokens},
    AuthError, ClientSecrets,
};

const MAX_REQUEST_HEAD: usize = 8 * 1024;

const SUCCESS_PAGE: &str =
    "The authentication flow has completed. You may close this window.";
const FAILURE_PAGE: &str = "The authentication flow failed. Check the terminal for details.";

pub trait ConsentFlow {
    fn obtain_consent(
        &self,
        secrets: &ClientSecrets,
        scopes: &[String],
    ) -> impl Future<Output = Result<OAuthTokens, AuthError>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct LoopbackConsent {
    http: reqwest::Client,
}

impl LoopbackConsent {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl ConsentFlow for LoopbackConsent {
    #[tracing::instrument(skip_all)]
    async fn obtain_consent(
        &self,
        secrets: &ClientSecrets,
        scopes: &[String],
    ) -> Result<OAuthTokens, AuthError> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let port = listener.local_addr()?.port();
        let redirect_uri = format!("http://127.0.0.1:{port}/");

        let auth_url = authorization_url(secrets, scopes, &redirect_uri)?;
        tracing::info!(%auth_url, "Waiting for OAuth consent");
        eprintln!("Please visit this URL to authorize this application: {auth_url}");

        let (mut stream, peer) = listener.accept().await?;
        tracing::debug!(%peer, "Received OAuth redirect");

        let head = read_request_head(&mut stream).await?;
        let outcome = code_from_redirect(&head);

        let page = if outcome.is_ok() { SUCCESS_PAGE } else { FAILURE_PAGE };
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{page}",
            page.len()
        );
        stream.write_all(response.as_bytes()).await?;
        let _ = stream.shutdown().await;

        let code = outcome?;
        oauth::exchange_code(&self.http, secrets, &code, &redirect_uri).await
    }
}

/// Builds the URL the user opens to grant access
pub fn authorization_url(
    secrets: &ClientSecrets,
    scopes: &[String],
    redirect_uri: &str,
) -> Result<Url, AuthError> {
    let scope = scopes.join(" ");
    let params = [
        ("response_type", "code"),
        ("client_id", secrets.client_id.as_str()),
        ("redirect_uri", redirect_uri),
        ("scope", scope.as_str()),
        ("access_type", "offline"),
        ("prompt", "consent"),
    ];

    Url::parse_with_params(&secrets.auth_uri, params)
        .map_err(|e| AuthError::InvalidClientSecrets(format!("bad auth_uri: {e}")))
}

async fn read_request_head<S>(stream: &mut S) -> Result<String, AuthError>
where
    S: AsyncReadExt + Unpin,
{
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") || buf.len() >= MAX_REQUEST_HEAD {
            break;
        }
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Pulls the authorization code out of the redirect's request line,
/// e.g. `GET /?code=4/0Ad...&scope=... HTTP/1.1`
pub fn code_from_redirect(request_head: &str) -> Result<String, AuthError> {
    let target = request_head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .ok_or_else(|| AuthError::Consent("malformed redirect request".into()))?;

    let url = Url::parse("http://127.0.0.1/")
        .and_then(|base| base.join(target))
        .map_err(|e| AuthError::Consent(format!("malformed redirect target: {e}")))?;

    let mut code = None;
    let mut error = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    match (code, error) {
        (Some(code), _) if !code.is_empty() => Ok(code),
        (_, Some(error)) => Err(AuthError::Consent(format!("consent refused: {error}"))),
        _ => Err(AuthError::Consent("redirect carried no authorization code".into())),
    }
}
