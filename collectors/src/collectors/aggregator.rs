use crate::{
    collectors::{
        Collector,
        DebugAgents,
        DebugStatus,
        SwitchAgentSubscriptions,
        SwitchLinks,
        SwitchRouteTable,
        SwitchSubscriptions,
    },
    document::Document,
    endpoint::EndpointSpec,
    fetcher::Fetcher,
};
use futures::future::join_all;
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    time::Instant,
};

/// Runs every collector of one host concurrently and merges their documents
pub struct Aggregator {
    host: String,
    collectors: Vec<Arc<dyn Collector>>,
}

impl Aggregator {
    /// Create an aggregator with the six swxtch collectors sharing one fetcher
    pub fn new(host: &str, fetcher: Fetcher) -> Self {
        let collectors: Vec<Arc<dyn Collector>> = vec![
            Arc::new(DebugStatus::new(host, fetcher.clone())),
            Arc::new(DebugAgents::new(host, fetcher.clone())),
            Arc::new(SwitchLinks::new(host, fetcher.clone())),
            Arc::new(SwitchRouteTable::new(host, fetcher.clone())),
            Arc::new(SwitchAgentSubscriptions::new(host, fetcher.clone())),
            Arc::new(SwitchSubscriptions::new(host, fetcher)),
        ];
        Self::with_collectors(host, collectors)
    }

    pub fn with_collectors(host: &str, collectors: Vec<Arc<dyn Collector>>) -> Self {
        Self {
            host: host.to_string(),
            collectors,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn collectors(&self) -> &[Arc<dyn Collector>] {
        &self.collectors
    }

    /// One poll cycle: a task per collector, joined before returning.
    ///
    /// Documents of one collector keep their emission order; no order is
    /// guaranteed across collectors. A task that panics contributes nothing.
    #[instrument(level = "debug", skip(self), fields(host = %self.host))]
    pub async fn collect_all(&self) -> Vec<Document> {
        let started = Instant::now();

        let handles = self.collectors.iter().map(|collector| {
            let collector = Arc::clone(collector);
            tokio::spawn(async move {
                let documents = collector.collect().await;
                debug!(collector = collector.name(), count = documents.len(), "collector finished");
                documents
            })
        });

        let mut documents = Vec::new();
        for (result, collector) in join_all(handles).await.into_iter().zip(&self.collectors) {
            match result {
                Ok(batch) => documents.extend(batch),
                Err(err) => error!(collector = collector.name(), "collector task failed: {err}"),
            }
        }

        info!(
            host = %self.host,
            count = documents.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "poll cycle finished"
        );
        documents
    }
}

impl Collector for Aggregator {
    fn collect(&self) -> Pin<Box<dyn Future<Output = Vec<Document>> + Send + '_>> {
        Box::pin(self.collect_all())
    }

    fn endpoints(&self) -> Vec<EndpointSpec> {
        self.collectors.iter().flat_map(|collector| collector.endpoints()).collect()
    }

    fn name(&self) -> &'static str {
        "Aggregator"
    }
}
