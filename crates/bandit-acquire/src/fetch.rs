//! The network capability the materializer depends on.
//!
//! Fetching is split in two steps, starting the request and draining its
//! body, because callers report the two failures differently.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("no response for {url}")]
    Unavailable { url: String },
}

/// A response body that can be drained chunk by chunk.
#[allow(async_fn_in_trait)]
pub trait ResponseBody: Sized {
    /// Next chunk of the body, `None` once it is exhausted.
    async fn chunk(&mut self) -> Result<Option<Vec<u8>>, FetchError>;

    /// The whole remaining body.
    async fn bytes(mut self) -> Result<Vec<u8>, FetchError> {
        let mut data = Vec::new();
        while let Some(chunk) = self.chunk().await? {
            data.extend_from_slice(&chunk);
        }
        Ok(data)
    }
}

/// Something that can GET a URL.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    type Body: ResponseBody;

    async fn get(&self, url: &str) -> Result<Self::Body, FetchError>;
}

/// [`Fetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bandit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    type Body = HttpBody;

    async fn get(&self, url: &str) -> Result<HttpBody, FetchError> {
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(HttpBody(response))
    }
}

/// Body of a successful `reqwest` response.
#[derive(Debug)]
pub struct HttpBody(reqwest::Response);

impl ResponseBody for HttpBody {
    async fn chunk(&mut self) -> Result<Option<Vec<u8>>, FetchError> {
        Ok(self.0.chunk().await?.map(|bytes| bytes.to_vec()))
    }

    async fn bytes(self) -> Result<Vec<u8>, FetchError> {
        Ok(self.0.bytes().await?.to_vec())
    }
}
