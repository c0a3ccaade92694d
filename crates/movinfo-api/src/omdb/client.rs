//! `OmdbClient` - OMDb API client implementation.

use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalOmdbApi;
use super::error::OmdbError;
use super::params::TitleQuery;
use super::types::MovieRecord;

/// Default base URL for the OMDb API.
pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

/// Builds the title lookup URL.
///
/// Produces `<base>?t=<title>&y=&plot=short&r=json`, followed by
/// `&apikey=<key>` when a key is given. The title is form-encoded, so
/// spaces become `+` and reserved characters are percent-escaped.
#[must_use]
pub fn build_request_url(base_url: &Url, query: &TitleQuery, api_key: Option<&str>) -> Url {
    let mut url = base_url.clone();
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("t", &query.text())
            .append_pair("y", "")
            .append_pair("plot", "short")
            .append_pair("r", "json");
        if let Some(key) = api_key {
            pairs.append_pair("apikey", key);
        }
    }
    url
}

/// OMDb API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Optional API key.
    api_key: Option<String>,
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

/// Error raised by [`OmdbClientBuilder::build`].
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum BuildError {
    /// `user_agent` was not set.
    MissingUserAgent,
    /// The HTTP client could not be constructed.
    Http(reqwest::Error),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingUserAgent => write!(f, "user_agent is required"),
            Self::Http(_) => write!(f, "failed to build HTTP client"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingUserAgent => None,
            Self::Http(source) => Some(source),
        }
    }
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key sent as the `apikey` parameter.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient, BuildError> {
        let user_agent = self.user_agent.ok_or(BuildError::MissingUserAgent)?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => default_base_url(),
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .map_err(BuildError::Http)?;

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key: self.api_key.filter(|key| !key.is_empty()),
        })
    }
}

/// Parses [`DEFAULT_BASE_URL`].
#[allow(clippy::expect_used)] // constant input
fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl LocalOmdbApi for OmdbClient {
    #[instrument(skip_all)]
    async fn lookup_title(&self, query: &TitleQuery) -> Result<MovieRecord, OmdbError> {
        let url = build_request_url(&self.base_url, query, self.api_key.as_deref());
        let shown_url = redact(&url);
        tracing::debug!(url = %shown_url, "OMDb API request");

        let transport = |source| OmdbError::Transport {
            url: shown_url.clone(),
            source,
        };

        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            // The body still carries the in-band `Response`/`Error` fields.
            tracing::warn!(%status, "OMDb API returned non-success status");
        }

        let body = response.bytes().await.map_err(transport)?;
        let record: MovieRecord =
            serde_json::from_slice(&body).map_err(|source| OmdbError::Decode { source })?;

        if let Some(message) = record.upstream_error() {
            tracing::debug!(error = message, "OMDb API reported an error");
        }

        Ok(record)
    }
}

/// Formats a request URL for error messages with the API key removed.
fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != "apikey")
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn client_for(mock_server: &wiremock::MockServer) -> OmdbClient {
        let base_url = format!("{}/", mock_server.uri());
        OmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = OmdbClient::builder().build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_uses_default_base_url() {
        // Arrange & Act
        let client = OmdbClient::builder().user_agent("test/0.0.0").build().unwrap();

        // Assert
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_with_custom_base_url() {
        // Arrange
        let custom_url = Url::parse("http://localhost:8080/").unwrap();

        // Act
        let client = OmdbClient::builder()
            .base_url(custom_url.clone())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url(), &custom_url);
    }

    #[test]
    fn test_build_request_url_joins_words_with_plus() {
        // Arrange
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        let query = TitleQuery::from_words(["star", "wars"]);

        // Act
        let url = build_request_url(&base, &query, None);

        // Assert
        assert_eq!(
            url.as_str(),
            "http://www.omdbapi.com/?t=star+wars&y=&plot=short&r=json"
        );
    }

    #[test]
    fn test_build_request_url_escapes_reserved_characters() {
        // Arrange
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        let query = TitleQuery::from_words(["Fast", "&", "Furious"]);

        // Act
        let url = build_request_url(&base, &query, None);

        // Assert
        assert_eq!(
            url.as_str(),
            "http://www.omdbapi.com/?t=Fast+%26+Furious&y=&plot=short&r=json"
        );
        let title = url.query_pairs().find(|(k, _)| k == "t").unwrap().1;
        assert_eq!(title, "Fast & Furious");
    }

    #[test]
    fn test_build_request_url_appends_api_key() {
        // Arrange
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        let query = TitleQuery::from_words(["Alien"]);

        // Act
        let url = build_request_url(&base, &query, Some("abc123"));

        // Assert
        assert_eq!(
            url.as_str(),
            "http://www.omdbapi.com/?t=Alien&y=&plot=short&r=json&apikey=abc123"
        );
    }

    #[test]
    fn test_redact_removes_api_key() {
        // Arrange
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        let url = build_request_url(&base, &TitleQuery::from_words(["Alien"]), Some("secret"));

        // Act
        let shown = redact(&url);

        // Assert
        assert!(!shown.contains("secret"));
        assert!(shown.contains("t=Alien"));
    }

    #[tokio::test]
    async fn test_lookup_title_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/omdb/title_the_matrix.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/"))
            .and(wiremock::matchers::query_param("t", "the matrix"))
            .and(wiremock::matchers::query_param("y", ""))
            .and(wiremock::matchers::query_param("plot", "short"))
            .and(wiremock::matchers::query_param("r", "json"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let query = TitleQuery::from_words(["the", "matrix"]);

        // Act
        let record = client.lookup_title(&query).await.unwrap();

        // Assert
        assert!(record.is_found());
        assert_eq!(record.title, "The Matrix");
        assert_eq!(record.metascore, "73");
    }

    #[tokio::test]
    async fn test_api_key_is_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/omdb/title_the_matrix.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::query_param("apikey", "my-key"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OmdbClient::builder()
            .base_url(format!("{}/", mock_server.uri()).parse().unwrap())
            .api_key("my-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act & Assert (mock expect(1) verifies the apikey parameter)
        client
            .lookup_title(&TitleQuery::from_words(["the", "matrix"]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_not_found_body_is_not_an_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/omdb/title_not_found.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let record = client
            .lookup_title(&TitleQuery::from_words(["zzzz"]))
            .await
            .unwrap();

        // Assert
        assert!(!record.is_found());
        assert_eq!(record.upstream_error(), Some("Movie not found!"));
    }

    #[tokio::test]
    async fn test_non_success_status_still_decodes_body() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"Response":"False","Error":"No API key provided."}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(401).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let record = client
            .lookup_title(&TitleQuery::from_words(["Alien"]))
            .await
            .unwrap();

        // Assert
        assert!(!record.is_found());
        assert_eq!(record.upstream_error(), Some("No API key provided."));
    }

    #[tokio::test]
    async fn test_malformed_body_returns_decode_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let result = client
            .lookup_title(&TitleQuery::from_words(["Alien"]))
            .await;

        // Assert
        assert!(result.unwrap_err().is_decode());
    }

    #[tokio::test]
    async fn test_connection_failure_returns_transport_error() {
        // Arrange
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let client = OmdbClient::builder()
            .base_url(format!("http://127.0.0.1:{port}/").parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let result = client
            .lookup_title(&TitleQuery::from_words(["Alien"]))
            .await;

        // Assert
        let error = result.unwrap_err();
        assert!(error.is_transport());
        assert!(error.to_string().contains("OMDb request failed"));
    }
}
