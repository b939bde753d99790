//! Response handling shared by the HTTP clients

use log::debug;
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ConfigError, Result};

/// Parse the base URL held in `var`. It must be able to carry a path.
pub(crate) fn parse_base_url(raw: &str, var: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::Invalid(format!("{} is not a valid URL: {}", var, e)))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid(format!("{} cannot be used as a base URL", var)).into());
    }
    Ok(url)
}

/// Append `segments` to the path of `base`, percent-encoding each one so a
/// name never adds path levels or a query.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Map a response onto the error taxonomy, decoding the body on success.
pub(crate) async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().path().to_string();
    debug!("{} {}", status.as_u16(), url);

    if status.is_success() {
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", url, e))
        })?;
        return Ok(data);
    }

    let body = response.text().await.unwrap_or_default();
    let err = match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden(format!("{} ({})", url, body)),
        StatusCode::NOT_FOUND => ApiError::NotFound(url),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::BadRequest(body),
        status if status.is_server_error() => {
            ApiError::ServerError(format!("{} returned {}: {}", url, status, body))
        }
        _ => ApiError::InvalidResponse(format!("Unexpected status code {} from {}", status, url)),
    };
    Err(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_endpoint_appends_segments() {
        let base = parse_base_url("https://api.github.com", "GITHUB_API_URL").unwrap();
        let url = endpoint(&base, &["orgs", "acme", "repos"]);
        assert_eq!(url.as_str(), "https://api.github.com/orgs/acme/repos");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = parse_base_url("http://127.0.0.1:1234/contoso/", "AZURE_DEVOPS_URL").unwrap();
        let url = endpoint(&base, &["_apis", "projects"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:1234/contoso/_apis/projects");
    }

    #[test]
    fn test_endpoint_encodes_reserved_characters() {
        let base = parse_base_url("https://api.github.com", "GITHUB_API_URL").unwrap();

        let url = endpoint(&base, &["orgs", "acme/evil?x=1#frag"]);

        assert_eq!(url.path(), "/orgs/acme%2Fevil%3Fx=1%23frag");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
        assert_eq!(url.path_segments().unwrap().count(), 2);
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let err = parse_base_url("not a url", "GITHUB_API_URL").unwrap_err();
        match err {
            Error::Config(ConfigError::Invalid(msg)) => assert!(msg.contains("GITHUB_API_URL")),
            other => panic!("unexpected error: {}", other),
        }

        let err = parse_base_url("mailto:ops@example.com", "AZURE_DEVOPS_URL").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Invalid(_))));
    }
}
