use std::time::Duration;

use reqwest::{
    header::{
        HeaderMap,
        HeaderValue,
        ACCEPT,
        USER_AGENT,
    },
    Client,
    Response,
};

use crate::core::GakuError;

pub fn http_client(timeout: Option<Duration>) -> Result<Client, GakuError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("gaku/0.1 (+reqwest)"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut builder = Client::builder().default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|e| GakuError::Custom(format!("HTTP client build failed: {e}")))
}

pub fn ensure_success(resp: &Response, endpoint: &str) -> Result<(), GakuError> {
    if !resp.status().is_success() {
        return Err(GakuError::Status {
            endpoint: endpoint.to_string(),
            status: resp.status().as_u16(),
        });
    }
    Ok(())
}

/// Joins the configured API root and an endpoint path without doubling slashes.
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(join_url("http://localhost:8000/api", "/cards"), "http://localhost:8000/api/cards");
        assert_eq!(join_url("http://localhost:8000/api/", "cards/add"), "http://localhost:8000/api/cards/add");
        assert_eq!(join_url("http://h/api//", "//test/next"), "http://h/api/test/next");
    }

    #[test]
    fn client_builds_without_timeout() {
        assert!(http_client(None).is_ok());
        assert!(http_client(Some(Duration::from_secs(5))).is_ok());
    }
}
