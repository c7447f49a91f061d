use crate::{
    endpoint::EndpointSpec,
    report::{
        ErrorReporter,
        FileErrorReporter,
    },
};
use eyre::{
    Context as _,
    Result,
};
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::{
    sync::Arc,
    time::Duration,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// GETs JSON from the swxtch API.
///
/// Certificates are not verified since the management service commonly runs
/// with self-signed ones. Failures are reported, never returned.
#[derive(Clone)]
pub struct Fetcher {
    http_client: HttpClient,
    timeout: Duration,
    reporter: Arc<dyn ErrorReporter>,
}

impl Fetcher {
    pub fn new(timeout: Duration, reporter: Arc<dyn ErrorReporter>) -> Result<Self> {
        let http_client = HttpClient::builder()
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            timeout,
            reporter,
        })
    }

    /// Fetcher with the default timeout, logging failures to `./<host>`.
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_TIMEOUT, Arc::new(FileErrorReporter::default()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the parsed JSON body, or `None` after reporting the failure.
    #[instrument(level = "debug", skip(self, endpoint), fields(url = %endpoint))]
    pub async fn fetch(&self, endpoint: &EndpointSpec) -> Option<Value> {
        match self.request(&endpoint.url()).await {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("fetch failed: {err:#}");
                self.reporter
                    .report(&endpoint.host, &endpoint.method, &format!("{err:#}"));
                None
            }
        }
    }

    async fn request(&self, url: &str) -> Result<Value> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?;

        response.json::<Value>().await.context("Response body is not valid JSON")
    }
}
