use std::{future::Future, time::Duration};

use isahc::{AsyncReadResponseExt, config::Configurable};

use crate::Error;

/// Status and body of a finished GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues the single outbound request of a lookup.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, Error>> + Send;
}

#[derive(Clone)]
pub struct HttpClient {
    inner: isahc::HttpClient,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let inner = isahc::HttpClient::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .default_header("user-agent", format!("ipgeo/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { inner })
    }
}

impl Transport for HttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, Error> {
        let mut response = self.inner.get_async(url).await.map_err(|err| {
            let err: Error = err.into();
            error!("http client request failed: {}", err);
            err
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
