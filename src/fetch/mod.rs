//! Log retrieval
//!
//! The parsers only need a text blob; where it comes from is behind
//! [`LogSource`].
//!
//! # Example
//!
//! ```rust,no_run
//! use runplot::fetch::{load, StaticSource};
//!
//! # async fn example() {
//! let source = StaticSource::new("Starting test with speed 1(10.0)\n");
//! let lines = load(&source, "test3.log", |text| text.lines().count()).await;
//! assert_eq!(lines, Some(1));
//! # }
//! ```

mod file;
#[cfg(feature = "http")]
mod http;

pub use file::FileSource;
#[cfg(feature = "http")]
pub use http::HttpSource;

use std::future::Future;

use tracing::{debug, warn};

use crate::Result;

/// A place logs can be read from.
pub trait LogSource: Send + Sync {
    /// Retrieve the full text of the resource at `path`.
    ///
    /// Issues a single attempt: no retry and no timeout.
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Fetch `path` and hand the body to `continuation`.
///
/// The continuation runs exactly once when the fetch succeeds and never when
/// it fails; a failure is only logged. Returns the continuation's output.
pub async fn load<S, F, T>(source: &S, path: &str, continuation: F) -> Option<T>
where
    S: LogSource,
    F: FnOnce(String) -> T,
{
    match source.fetch(path).await {
        Ok(text) => {
            debug!(path, bytes = text.len(), "log fetched");
            Some(continuation(text))
        }
        Err(err) => {
            warn!(path, error = %err, "log fetch failed");
            None
        }
    }
}

/// In-memory source that serves the same text for every path.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    /// Serve `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl LogSource for StaticSource {
    fn fetch(&self, _path: &str) -> impl Future<Output = Result<String>> + Send {
        let text = self.text.clone();
        async move { Ok(text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct FailingSource;

    impl LogSource for FailingSource {
        fn fetch(&self, path: &str) -> impl Future<Output = Result<String>> + Send {
            let path = path.to_string();
            async move {
                Err(Error::HttpStatus { path, status: 404 })
            }
        }
    }

    #[tokio::test]
    async fn test_load_invokes_continuation_once() {
        let source = StaticSource::new("a\nb\n");
        let mut calls = 0;
        let out = load(&source, "any", |text| {
            calls += 1;
            text
        })
        .await;
        assert_eq!(out.as_deref(), Some("a\nb\n"));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_load_skips_continuation_on_failure() {
        let mut called = false;
        let out = load(&FailingSource, "missing.log", |_| called = true).await;
        assert!(out.is_none());
        assert!(!called);
    }
}
