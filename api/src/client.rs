use crate::config::ApiConfig;
use crate::wire::{MatchRecord, SportRecord, StreamRecord};
use crate::{Match, Sport, StreamTarget};
use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::fmt;

pub type ApiResult<T> = Result<T, ApiError>;

/// Upstream client for the streamed.su JSON API.
///
/// Every call is a single GET bounded by the configured timeout. Nothing is
/// retried and nothing is cached; callers always see what upstream says now.
#[derive(Debug, Clone)]
pub struct StreamedApi {
    client: Client,
    config: ApiConfig,
}

impl Default for StreamedApi {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// Connect failure, timeout, non-2xx status or a body that could not be read.
    UpstreamUnavailable(reqwest::Error, String),
    /// Body was not JSON, or not the JSON shape we expect.
    Decode(serde_json::Error, String),
    /// Upstream answered with an empty stream list for this match id.
    NoStreamsFound(String),
    /// The configured base URL cannot be turned into a request URL.
    InvalidUrl(String),
}

impl ApiError {
    /// Stable short name, used in logs and JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::UpstreamUnavailable(..) => "upstream_unavailable",
            ApiError::Decode(..) => "decode_error",
            ApiError::NoStreamsFound(_) => "no_streams_found",
            ApiError::InvalidUrl(_) => "invalid_url",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::UpstreamUnavailable(e, url) => write!(f, "Upstream unavailable for {url}: {e}"),
            ApiError::Decode(e, url) => write!(f, "Decode error for {url}: {e}"),
            ApiError::NoStreamsFound(id) => write!(f, "No streams found for match {id}"),
            ApiError::InvalidUrl(msg) => write!(f, "Invalid upstream URL: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::UpstreamUnavailable(e, _) => Some(e),
            ApiError::Decode(e, _) => Some(e),
            _ => None,
        }
    }
}

impl StreamedApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("sportstream/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetch the full sports list.
    pub async fn fetch_sports(&self) -> ApiResult<Vec<Sport>> {
        let raw: Vec<SportRecord> = self.get("/api/sports", &[]).await?;
        Ok(raw.into_iter().map(Sport::from).collect())
    }

    /// Fetch matches, restricted to one sport when `sport_id` is given.
    pub async fn fetch_matches(&self, sport_id: Option<&str>) -> ApiResult<Vec<Match>> {
        let raw: Vec<MatchRecord> = match sport_id {
            Some(id) => self.get("/api/matches", &[("sport", id)]).await?,
            None => self.get("/api/matches", &[]).await?,
        };
        Ok(raw.into_iter().map(Match::from).collect())
    }

    /// Fetch candidate streams for a match, each paired with the upstream referer.
    pub async fn fetch_streams(&self, match_id: &str) -> ApiResult<Vec<StreamTarget>> {
        let raw: Vec<StreamRecord> = self.get("/api/streams", &[("id", match_id)]).await?;
        let referer = self.config.referer();
        Ok(raw
            .into_iter()
            .map(|s| StreamTarget {
                stream_url: s.url,
                referer_header: referer.to_owned(),
            })
            .collect())
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<Url> {
        let raw = format!("{}{path}", self.config.base_url);
        // parse_with_params leaves a dangling '?' when given no pairs.
        let parsed = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query)
        };
        parsed.map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<T> {
        let url = self.endpoint(path, query)?;
        let url_str = url.to_string();
        debug!("GET {url_str}");

        let response = self
            .client
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| ApiError::UpstreamUnavailable(e, url_str.clone()))?;

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::UpstreamUnavailable(e, url_str.clone()))?;

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e, url_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn api_for(server: &mockito::Server) -> StreamedApi {
        StreamedApi::new(ApiConfig::new(server.url()))
    }

    #[tokio::test]
    async fn fetch_sports_decodes_array() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/sports")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"football","name":"Football"},{"id":"mma","name":"UFC"}]"#)
            .create_async()
            .await;

        let sports = api_for(&server).fetch_sports().await.unwrap();
        assert_eq!(
            sports,
            vec![
                Sport { id: "football".into(), name: "Football".into() },
                Sport { id: "mma".into(), name: "UFC".into() },
            ]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_matches_sends_sport_param() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/matches")
            .match_query(Matcher::UrlEncoded("sport".into(), "basketball".into()))
            .with_status(200)
            .with_body(
                r#"[{"id":42,"team1":"Lakers","team2":"Celtics","logo1":"l.png","logo2":"c.png","streams":1}]"#,
            )
            .create_async()
            .await;

        let matches = api_for(&server).fetch_matches(Some("basketball")).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, 42);
        assert_eq!(matches[0].stream_count, 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_matches_without_sport_hits_plain_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/matches")
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;

        let matches = api_for(&server).fetch_matches(None).await.unwrap();
        assert!(matches.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_streams_decodes_bare_array_and_sets_referer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/streams")
            .match_query(Matcher::UrlEncoded("id".into(), "123".into()))
            .with_status(200)
            .with_body(r#"[{"url":"http://x/1"},{"url":"http://x/2"}]"#)
            .create_async()
            .await;

        let api = api_for(&server);
        let streams = api.fetch_streams("123").await.unwrap();
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[0].stream_url, "http://x/1");
        assert_eq!(streams[1].referer_header, api.config().base_url);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn match_id_is_percent_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/streams")
            .match_query(Matcher::UrlEncoded("id".into(), "a b&c".into()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let streams = api_for(&server).fetch_streams("a b&c").await.unwrap();
        assert!(streams.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/sports")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = api_for(&server).fetch_sports().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(..)), "got {err}");
        assert_eq!(err.kind(), "decode_error");
    }

    #[tokio::test]
    async fn wrong_shape_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/matches")
            .with_status(200)
            .with_body(r#"{"matches":[]}"#)
            .create_async()
            .await;

        let err = api_for(&server).fetch_matches(None).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(..)), "got {err}");
    }

    #[tokio::test]
    async fn server_error_is_upstream_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/sports")
            .with_status(503)
            .create_async()
            .await;

        let err = api_for(&server).fetch_sports().await.unwrap_err();
        assert!(matches!(err, ApiError::UpstreamUnavailable(..)), "got {err}");
    }

    #[tokio::test]
    async fn not_found_is_upstream_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/streams")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let err = api_for(&server).fetch_streams("9").await.unwrap_err();
        assert!(matches!(err, ApiError::UpstreamUnavailable(..)), "got {err}");
    }

    #[tokio::test]
    async fn refused_connection_is_upstream_unavailable() {
        let api = StreamedApi::new(ApiConfig::new("http://127.0.0.1:9"));
        let err = api.fetch_sports().await.unwrap_err();
        assert!(matches!(err, ApiError::UpstreamUnavailable(..)), "got {err}");
        assert!(err.to_string().contains("127.0.0.1:9/api/sports"));
    }

    #[tokio::test]
    async fn garbage_base_url_is_invalid_url() {
        let api = StreamedApi::new(ApiConfig::new("not a url"));
        let err = api.fetch_sports().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)), "got {err}");
    }
}
