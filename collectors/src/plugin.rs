use crate::{
    collectors::Aggregator,
    fetcher::Fetcher,
};
use eyre::{
    eyre,
    Result,
};

/// Entry point for an external poller framework calling `fetch(hosts)`.
///
/// The aggregator is built on the first call, for the last host given, and
/// reused afterwards.
pub struct PollerPlugin {
    fetcher: Fetcher,
    aggregator: Option<Aggregator>,
}

impl PollerPlugin {
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            aggregator: None,
        }
    }

    /// Hosts are polled one at a time.
    pub fn can_group(&self) -> bool {
        false
    }

    /// Runs one poll cycle and returns the documents as a JSON array.
    pub async fn fetch(&mut self, hosts: &[String]) -> Result<String> {
        let aggregator = match self.aggregator.take() {
            Some(aggregator) => aggregator,
            None => {
                let host = hosts.last().ok_or_else(|| eyre!("No host given to poll"))?;
                debug!(%host, "creating aggregator");
                Aggregator::new(host, self.fetcher.clone())
            }
        };
        let aggregator = self.aggregator.insert(aggregator);

        let documents = aggregator.collect_all().await;
        Ok(serde_json::to_string(&documents)?)
    }

    pub fn host(&self) -> Option<&str> {
        self.aggregator.as_ref().map(Aggregator::host)
    }
}
