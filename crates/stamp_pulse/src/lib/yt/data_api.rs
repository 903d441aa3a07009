use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;

use crate::{
    auth::{consent::ConsentFlow, store::CredentialStore, Authorizer},
    yt::{CommentPublisher, MetadataSource},
};

/// YouTube Data API v3 client; every call first obtains a session from the shared [`Authorizer`]
pub struct YouTubeDataClient<S, C> {
    http: reqwest::Client,
    authorizer: Arc<Authorizer<S, C>>,
    base_url: String,
}

impl<S, C> Clone for YouTubeDataClient<S, C> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            authorizer: Arc::clone(&self.authorizer),
            base_url: self.base_url.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Option<VideoSnippet>,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThread {
    snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadSnippet {
    top_level_comment: Comment,
}

#[derive(Debug, Deserialize)]
struct Comment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    text_original: String,
}

impl<S, C> YouTubeDataClient<S, C>
where
    S: CredentialStore,
    C: ConsentFlow + Send + Sync,
{
    pub fn new(authorizer: Authorizer<S, C>) -> Self {
        Self {
            http: reqwest::Client::new(),
            authorizer: Arc::new(authorizer),
            base_url: "https://www.googleapis.com/youtube/v3".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn check_status(resp: reqwest::Response) -> anyhow::Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let message = resp.text().await.unwrap_or_default();
        anyhow::bail!("YouTube API error: {status} - {message}")
    }
}

impl<S, C> MetadataSource for YouTubeDataClient<S, C>
where
    S: CredentialStore,
    C: ConsentFlow + Send + Sync,
{
    #[tracing::instrument(skip(self))]
    async fn video_description(&self, video_id: &str) -> anyhow::Result<String> {
        let session = self.authorizer.session().await?;

        let resp = self
            .http
            .get(format!("{}/videos", self.base_url))
            .query(&[("part", "snippet"), ("id", video_id)])
            .bearer_auth(session.access_token())
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let videos = Self::check_status(resp)
            .await?
            .json::<VideoListResponse>()
            .await
            .context("Failed to decode videos.list response")?;

        Ok(videos
            .items
            .into_iter()
            .next()
            .and_then(|item| item.snippet)
            .map(|snippet| snippet.description)
            .unwrap_or_default())
    }
}

impl<S, C> CommentPublisher for YouTubeDataClient<S, C>
where
    S: CredentialStore,
    C: ConsentFlow + Send + Sync,
{
    #[tracing::instrument(skip(self, text))]
    async fn post_comment(&self, video_id: &str, text: &str) -> anyhow::Result<String> {
        let session = self.authorizer.session().await?;

        let body = serde_json::json!({
            "snippet": {
                "videoId": video_id,
                "topLevelComment": {
                    "snippet": {
                        "textOriginal": text
                    }
                }
            }
        });

        let resp = self
            .http
            .post(format!("{}/commentThreads", self.base_url))
            .query(&[("part", "snippet")])
            .bearer_auth(session.access_token())
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let thread = Self::check_status(resp)
            .await?
            .json::<CommentThread>()
            .await
            .context("Failed to decode commentThreads.insert response")?;

        Ok(thread.snippet.top_level_comment.snippet.text_original)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::{
        auth::{
            consent::LoopbackConsent, store::MemoryCredentialStore, ClientSecrets,
            StoredCredentials, YOUTUBE_SCOPE,
        },
        test_http::serve_once,
    };

    fn authorized_client(
        base_url: &str,
    ) -> YouTubeDataClient<MemoryCredentialStore, LoopbackConsent> {
        let secrets = ClientSecrets {
            client_id: "123.apps.googleusercontent.com".into(),
            client_secret: "GOCSPX-secret".into(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".into(),
            token_uri: "https://oauth2.googleapis.com/token".into(),
        };
        let credentials = StoredCredentials {
            token: Some("ya29.valid".into()),
            client_id: secrets.client_id.clone(),
            scopes: vec![YOUTUBE_SCOPE.into()],
            expiry: Some(Utc::now() + Duration::hours(1)),
            ..Default::default()
        };

        let authorizer = Authorizer::new(
            secrets,
            MemoryCredentialStore::new(Some(credentials)),
            LoopbackConsent::default(),
        );
        YouTubeDataClient::new(authorizer).with_base_url(base_url)
    }

    #[tokio::test]
    async fn test_description_is_fetched_with_bearer_token() {
        let (base_url, server) = serve_once(
            200,
            r#"{"items": [{"id": "abc", "snippet": {"description": "Ten games you missed"}}]}"#,
        )
        .await;

        let description = authorized_client(&base_url)
            .video_description("abc")
            .await
            .unwrap();
        assert_eq!(description, "Ten games you missed");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /videos?part=snippet&id=abc"));
        assert!(request
            .to_ascii_lowercase()
            .contains("authorization: bearer ya29.valid"));
    }

    #[tokio::test]
    async fn test_comment_is_posted_as_top_level_thread() {
        let (base_url, server) = serve_once(
            200,
            r#"{"snippet": {"topLevelComment": {"snippet": {"textOriginal": "00:30 - A"}}}}"#,
        )
        .await;

        let posted = authorized_client(&base_url)
            .post_comment("abc", "00:30 - A")
            .await
            .unwrap();
        assert_eq!(posted, "00:30 - A");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /commentThreads?part=snippet"));
        let body: serde_json::Value =
            serde_json::from_str(request.split("\r\n\r\n").nth(1).unwrap()).unwrap();
        assert_eq!(body["snippet"]["videoId"], "abc");
        assert_eq!(
            body["snippet"]["topLevelComment"]["snippet"]["textOriginal"],
            "00:30 - A"
        );
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let (base_url, _server) =
            serve_once(403, r#"{"error": {"errors": [{"reason": "commentsDisabled"}]}}"#).await;

        let err = authorized_client(&base_url)
            .post_comment("abc", "text")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("commentsDisabled"));
    }

    #[test]
    fn test_videos_list_description() {
        let raw = r#"{"kind": "youtube#videoListResponse", "items": [
            {"id": "abc", "snippet": {"title": "t", "description": "0:00 Intro\n1:30 Elden Ring"}}
        ]}"#;
        let resp: VideoListResponse = serde_json::from_str(raw).unwrap();
        let description = resp.items[0].snippet.as_ref().unwrap().description.as_str();
        assert_eq!(description, "0:00 Intro\n1:30 Elden Ring");
    }

    #[test]
    fn test_videos_list_without_items() {
        let resp: VideoListResponse =
            serde_json::from_str(r#"{"kind": "youtube#videoListResponse"}"#).unwrap();
        assert!(resp.items.is_empty());
    }

    #[test]
    fn test_comment_thread_text() {
        let raw = r#"{"id": "Ugx", "snippet": {"videoId": "abc", "topLevelComment": {
            "id": "Ugx", "snippet": {"textOriginal": "📋 Here's timestamps:\n\n00:30 - A\n"}}}}"#;
        let thread: CommentThread = serde_json::from_str(raw).unwrap();
        assert_eq!(
            thread.snippet.top_level_comment.snippet.text_original,
            "📋 Here's timestamps:\n\n00:30 - A\n"
        );
    }
}
