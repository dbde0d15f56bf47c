//! Issue the HTTP GET for a [`Target`].
//!
//! [`Fetch`] and [`FetchResponse`] are the seam between the saver and the transport,
//! [`HttpFetcher`] is the [`reqwest`] implementation used by the binary.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder, Response};

use crate::config::Config;
use crate::error::{BoxError, Error};
use crate::target::Target;

/// The default `User-Agent`, a common desktop browser, so that the server doesn't filter us out as a bot.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:19.0) Gecko/20100101 Firefox/19.0";

/// A response whose body has not been read yet.
///
/// Dropping it releases the underlying connection.
#[allow(async_fn_in_trait)]
pub trait FetchResponse {
    /// The raw `Content-Type` header, if any.
    fn content_type(&self) -> Option<&str>;

    /// The next chunk of the body, `None` once the body is exhausted.
    async fn chunk(&mut self) -> Result<Option<Bytes>, BoxError>;
}

/// Something able to GET a [`Target`].
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// The response type, its body is read by the caller.
    type Response: FetchResponse;

    /// Send a GET request to [`Target::url`].
    ///
    /// # Errors
    ///
    /// [`Error::Network`] on any transport level failure.
    async fn fetch(&self, target: &Target) -> Result<Self::Response, Error>;
}

/// [`Fetch`] over a single, immutable [`reqwest::Client`].
///
/// Cloning is cheap, the clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wrap an already configured client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build the client from the config: `User-Agent` and, if non-zero, the timeout.
    ///
    /// Redirects are followed with the reqwest default policy.
    pub fn build(config: &Config) -> reqwest::Result<Self> {
        client_builder(config).build().map(Self::new)
    }
}

#[inline]
fn client_builder(config: &Config) -> ClientBuilder {
    let client_builder = Client::builder().user_agent(config.user_agent.as_str());
    if config.timeout > 0 {
        client_builder.timeout(Duration::from_secs(config.timeout))
    } else {
        client_builder
    }
}

impl Fetch for HttpFetcher {
    type Response = HttpResponse;

    async fn fetch(&self, target: &Target) -> Result<HttpResponse, Error> {
        tracing::debug!(url = target.url(), kind = %target.kind(), "GET");
        let response = self
            .client
            .get(target.url())
            .send()
            .await
            .map_err(|err| Error::network(target.url(), err))?;
        tracing::debug!(
            url = target.url(),
            status = %response.status(),
            content_length = ?response.content_length(),
            "response received"
        );
        Ok(HttpResponse { inner: response })
    }
}

/// [`FetchResponse`] for [`HttpFetcher`].
#[derive(Debug)]
pub struct HttpResponse {
    inner: Response,
}

impl FetchResponse for HttpResponse {
    fn content_type(&self) -> Option<&str> {
        self.inner
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    async fn chunk(&mut self) -> Result<Option<Bytes>, BoxError> {
        Ok(self.inner.chunk().await?)
    }
}

/// An in-memory [`Fetch`] serving canned responses.
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub(crate) struct MemoryFetcher {
        routes: HashMap<String, (String, Bytes)>,
        requested: Mutex<Vec<String>>,
    }

    impl MemoryFetcher {
        /// Serve `body` with `content_type` for `url`. Unknown urls fail as a refused connection.
        pub(crate) fn route(mut self, url: &str, content_type: &str, body: impl Into<Bytes>) -> Self {
            self.routes
                .insert(url.to_owned(), (content_type.to_owned(), body.into()));
            self
        }

        /// Every url fetched so far, in order.
        pub(crate) fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    pub(crate) struct MemoryResponse {
        content_type: String,
        body: Option<Bytes>,
    }

    impl FetchResponse for MemoryResponse {
        fn content_type(&self) -> Option<&str> {
            Some(&self.content_type)
        }

        async fn chunk(&mut self) -> Result<Option<Bytes>, BoxError> {
            Ok(self.body.take())
        }
    }

    /// Yields `head`, then fails as if the connection was reset.
    pub(crate) struct BrokenResponse {
        content_type: String,
        head: Option<Bytes>,
    }

    impl BrokenResponse {
        pub(crate) fn new(content_type: &str, head: impl Into<Bytes>) -> Self {
            Self {
                content_type: content_type.to_owned(),
                head: Some(head.into()),
            }
        }
    }

    impl FetchResponse for BrokenResponse {
        fn content_type(&self) -> Option<&str> {
            Some(&self.content_type)
        }

        async fn chunk(&mut self) -> Result<Option<Bytes>, BoxError> {
            match self.head.take() {
                Some(head) => Ok(Some(head)),
                None => Err("connection reset".into()),
            }
        }
    }

    impl Fetch for MemoryFetcher {
        type Response = MemoryResponse;

        async fn fetch(&self, target: &Target) -> Result<MemoryResponse, Error> {
            self.requested.lock().unwrap().push(target.url().to_owned());
            match self.routes.get(target.url()) {
                Some((content_type, body)) => Ok(MemoryResponse {
                    content_type: content_type.clone(),
                    body: Some(body.clone()),
                }),
                None => Err(Error::network(target.url(), "connection refused")),
            }
        }
    }
}
