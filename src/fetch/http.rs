//! HTTP source (single GET, no retry)

use std::future::Future;

use reqwest::Client;

use super::LogSource;
use crate::{Error, Result};

/// Fetches logs with `GET <base_url>/<path>`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// Create a source for `base_url` (e.g. `http://localhost:8000/chart`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// URL requested for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl LogSource for HttpSource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String>> + Send {
        let request = self.client.get(self.url(path));
        let path = path.to_string();
        async move {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::HttpStatus {
                    path,
                    status: status.as_u16(),
                });
            }
            Ok(response.text().await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_single_slash() {
        let source = HttpSource::new("http://localhost:8000/chart/");
        assert_eq!(
            source.url("/log/test3.log"),
            "http://localhost:8000/chart/log/test3.log"
        );
        assert_eq!(
            HttpSource::new("http://host").url("a.log"),
            "http://host/a.log"
        );
    }
}
