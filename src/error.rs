//! The error type shared by every stage of a download.

use std::path::PathBuf;

use thiserror::Error;

/// A boxed error coming from the transport layer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong while resolving, fetching, scraping or saving a target.
///
/// None of these are recovered inside the library,
/// the caller decides whether to stop or move on, see [`crate::session::ErrorPolicy`].
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// The input matches neither the album nor the image shape.
    #[error("unknown target format: {input}")]
    UnrecognizedFormat {
        /// The raw input string.
        input: String,
    },
    /// A transport level failure, while sending the request or reading the body.
    #[error("request failed for url: {url}")]
    Network {
        /// The requested URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: BoxError,
    },
    /// The response is not of the type expected for the requested kind.
    #[error("unexpected Content-Type: {content_type:?} for url: {url}")]
    UnexpectedContentType {
        /// The observed `Content-Type`, empty if the header is missing.
        content_type: String,
        /// The requested URL.
        url: String,
    },
    /// The album page has no embedded album data block.
    #[error("could not find the album data in the page")]
    AlbumDataNotFound,
    /// Creating a file or directory, or writing to it, failed.
    #[error("failed to write: {}", path.display())]
    Filesystem {
        /// The file or directory being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn network(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Network {
            url: url.into(),
            source: source.into(),
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_display_carries_context() {
        let err = Error::UnexpectedContentType {
            content_type: String::from("text/plain"),
            url: String::from("http://i.imgur.com/xyz9999.jpg"),
        };
        assert_eq!(
            err.to_string(),
            r#"unexpected Content-Type: "text/plain" for url: http://i.imgur.com/xyz9999.jpg"#
        );

        let err = Error::network("http://imgur.com/a/aB3d5", "connection refused");
        assert_eq!(err.to_string(), "request failed for url: http://imgur.com/a/aB3d5");
        assert_eq!(err.source().unwrap().to_string(), "connection refused");
    }
}
