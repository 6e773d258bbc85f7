use crate::catalog::{Genre, Movie, MovieId};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Default request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors returned by the catalog API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(reqwest::Error),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body was not the expected JSON shape
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Received fewer bytes than Content-Length announced
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
    /// Endpoint URL could not be built from the base URL
    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    /// The request task ended without producing a result
    #[error("Request aborted: {0}")]
    Aborted(String),
}

impl ApiError {
    /// HTTP status code, when the server answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }

    /// True when the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }
}

/// HTTP client for the movie catalog service.
///
/// Cheap to clone: `reqwest::Client` is reference counted internally, so the
/// UI hands a clone to every spawned request task.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Build a client for `base` with a per-request timeout.
    ///
    /// `base` should come from [`crate::util::parse_base_url`] so that it
    /// ends in `/`.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vidly/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http, base))
    }

    /// Use a preconfigured `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET movies`
    pub async fn list_movies(&self) -> Result<Vec<Movie>, ApiError> {
        self.get_json("movies").await
    }

    /// `GET genres`
    ///
    /// Returns only what the server lists; the synthetic "All Genres" entry
    /// is added by the catalog loader.
    pub async fn list_genres(&self) -> Result<Vec<Genre>, ApiError> {
        self.get_json("genres").await
    }

    /// `DELETE movies/{id}`
    ///
    /// Any 2xx status counts as success; the response body is ignored.
    pub async fn delete_movie(&self, id: &MovieId) -> Result<(), ApiError> {
        let url = self.movie_url(id)?;
        tracing::debug!(url = %url, "Deleting movie");

        let response = self.http.delete(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }

    fn movie_url(&self, id: &MovieId) -> Result<Url, ApiError> {
        let mut url = self.base.join("movies")?;
        // Pushing a segment percent-encodes the id, so an id containing `/`
        // or `?` cannot escape the movies collection.
        url.path_segments_mut()
            .map_err(|()| ApiError::Endpoint(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(id.as_str());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.base.join(path)?;
        tracing::debug!(url = %url, "Fetching");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

async fn read_limited_bytes(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, ApiError> {
    let expected_length = response.content_length();

    if let Some(len) = expected_length {
        if len > limit as u64 {
            return Err(ApiError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ApiError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(ApiError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::parse_base_url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MOVIES_JSON: &str = r#"[
        {
            "_id": "m1",
            "title": "Terminator",
            "genre": { "_id": "g1", "name": "Action" },
            "numberInStock": 6,
            "dailyRentalRate": 2.5
        },
        {
            "_id": "m2",
            "title": "Get Out",
            "genre": { "_id": "g3", "name": "Thriller" },
            "numberInStock": 8,
            "dailyRentalRate": 3.5,
            "liked": true
        }
    ]"#;

    fn client_for(server: &MockServer) -> ApiClient {
        let base = parse_base_url(&format!("{}/api", server.uri())).unwrap();
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_movies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(MOVIES_JSON)
                    .insert_header("Content-Type", "application/json"),
            )
            .mount(&server)
            .await;

        let movies = client_for(&server).list_movies().await.unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(&*movies[0].title, "Terminator");
        assert!(!movies[0].liked);
        assert!(movies[1].liked);
    }

    #[tokio::test]
    async fn test_list_genres() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/genres"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"_id":"g1","name":"Action"},{"_id":"g2","name":"Comedy"}]"#,
            ))
            .mount(&server)
            .await;

        let genres = client_for(&server).list_genres().await.unwrap();
        let names: Vec<&str> = genres.iter().map(|g| &*g.name).collect();
        assert_eq!(names, ["Action", "Comedy"]);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        match client_for(&server).list_movies().await {
            Err(ApiError::HttpStatus(503)) => {}
            other => panic!("Expected HttpStatus(503), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
            .mount(&server)
            .await;

        match client_for(&server).list_genres().await {
            Err(ApiError::Decode(_)) => {}
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_movie_success() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/movies/m1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .delete_movie(&MovieId::new("m1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_movie_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .delete_movie(&MovieId::new("gone"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_timeout_maps_to_timeout_variant() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let base = parse_base_url(&server.uri()).unwrap();
        let client = ApiClient::new(base, Duration::from_millis(200)).unwrap();
        match client.list_movies().await {
            Err(ApiError::Timeout) => {}
            other => panic!("Expected Timeout, got {:?}", other),
        }
    }

    #[test]
    fn test_movie_url_encodes_id() {
        let base = parse_base_url("http://localhost:3900/api").unwrap();
        let client = ApiClient::with_client(reqwest::Client::new(), base);
        let url = client.movie_url(&MovieId::new("a/b?c")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3900/api/movies/a%2Fb%3Fc");
    }
}
