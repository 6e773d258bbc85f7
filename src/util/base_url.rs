use thiserror::Error;
use url::Url;

/// Errors that can occur while validating the catalog API base URL.
#[derive(Error, Debug)]
pub enum BaseUrlError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL carries a username or password.
    #[error("Credentials in the API URL are not supported")]
    EmbeddedCredentials,
    /// The URL cannot have path segments appended (e.g. `mailto:`-style).
    #[error("URL cannot be used as an API base: {0}")]
    CannotBeABase(String),
}

/// Validates and normalizes the catalog API base URL.
///
/// Localhost and private addresses are allowed: the catalog backend is
/// normally a local development server. The returned URL always ends in
/// `/` so that `Url::join("movies")` appends rather than replaces the last
/// path segment.
///
/// # Examples
///
/// ```
/// use vidly::util::parse_base_url;
///
/// let base = parse_base_url("http://localhost:3900/api").unwrap();
/// assert_eq!(base.as_str(), "http://localhost:3900/api/");
///
/// assert!(parse_base_url("ftp://example.com/").is_err());
/// ```
pub fn parse_base_url(url_str: &str) -> Result<Url, BaseUrlError> {
    let mut url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(BaseUrlError::UnsupportedScheme(scheme.to_owned())),
    }

    if !url.username().is_empty() || url.password().is_some() {
        return Err(BaseUrlError::EmbeddedCredentials);
    }

    if url.cannot_be_a_base() {
        return Err(BaseUrlError::CannotBeABase(url.to_string()));
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_trailing_slash() {
        let url = parse_base_url("http://localhost:3900/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3900/api/");
        assert_eq!(url.join("movies").unwrap().as_str(), "http://localhost:3900/api/movies");
    }

    #[test]
    fn test_keeps_existing_slash() {
        let url = parse_base_url("https://vidly.example.com/api/").unwrap();
        assert_eq!(url.as_str(), "https://vidly.example.com/api/");
    }

    #[test]
    fn test_bare_host_gets_root_path() {
        let url = parse_base_url("http://127.0.0.1:3900").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:3900/");
    }

    #[test]
    fn test_strips_query_and_fragment() {
        let url = parse_base_url("http://localhost/api?x=1#top").unwrap();
        assert_eq!(url.as_str(), "http://localhost/api/");
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            parse_base_url("file:///etc/passwd"),
            Err(BaseUrlError::UnsupportedScheme(s)) if s == "file"
        ));
    }

    #[test]
    fn test_rejects_credentials() {
        assert!(matches!(
            parse_base_url("http://user:pw@localhost/api"),
            Err(BaseUrlError::EmbeddedCredentials)
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(BaseUrlError::InvalidUrl(_))
        ));
    }
}
