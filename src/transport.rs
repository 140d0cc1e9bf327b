use crate::endpoints::{Endpoint, Method};
use crate::error::TrendsError;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// HTTP transport abstraction - the client never talks to the network directly
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Issue the request and return the raw response body of a 2xx response
    async fn fetch(&self, endpoint: &Endpoint) -> Result<String, TrendsError>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TrendsError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<String, TrendsError> {
        let url = endpoint.url()?;

        tracing::debug!(
            method = ?endpoint.method,
            url = %url,
            "trends request"
        );

        let mut request = match endpoint.method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => self.client.post(url.clone()).form(&endpoint.form),
        };
        for (name, value) in &endpoint.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status,
                url = %url,
                "trends request failed"
            );
            return Err(TrendsError::from_status(status.as_u16(), &body));
        }

        let body = response.text().await?;
        tracing::debug!(
            url = %url,
            bytes = body.len(),
            "trends response received"
        );
        Ok(body)
    }
}
