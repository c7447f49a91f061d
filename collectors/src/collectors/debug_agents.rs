use crate::{
    collectors::Collector,
    document::{
        Document,
        FieldValue,
        Fields,
    },
    endpoint::{
        EndpointSpec,
        DEBUG_PATH,
    },
    fetcher::Fetcher,
};
use serde_json::Value;
use std::{
    future::Future,
    pin::Pin,
};

pub const DOCUMENT_NAME: &str = "debug_agent";

/// Passes every agent record through as one document.
pub struct DebugAgents {
    endpoint: EndpointSpec,
    fetcher: Fetcher,
}

impl DebugAgents {
    pub fn new(host: &str, fetcher: Fetcher) -> Self {
        Self {
            endpoint: EndpointSpec::new(host, DEBUG_PATH, "agents"),
            fetcher,
        }
    }

    /// Agent records are copied verbatim; anything that is not a JSON object
    /// cannot become a field mapping and is skipped.
    pub fn flatten(host: &str, payload: &Value) -> Vec<Document> {
        let Some(agents) = payload.as_array() else {
            return Vec::new();
        };

        agents
            .iter()
            .filter_map(|agent| match agent.as_object() {
                Some(record) => Some(record),
                None => {
                    debug!(%host, "skipping agent record that is not an object");
                    None
                }
            })
            .map(|record| {
                let fields: Fields = record
                    .iter()
                    .map(|(key, value)| (key.clone(), FieldValue::Json(value.clone())))
                    .collect();
                Document::new(DOCUMENT_NAME, host, fields)
            })
            .collect()
    }
}

impl Collector for DebugAgents {
    fn collect(&self) -> Pin<Box<dyn Future<Output = Vec<Document>> + Send + '_>> {
        Box::pin(async move {
            match self.fetcher.fetch(&self.endpoint).await {
                Some(payload) => Self::flatten(&self.endpoint.host, &payload),
                None => Vec::new(),
            }
        })
    }

    fn endpoints(&self) -> Vec<EndpointSpec> {
        vec![self.endpoint.clone()]
    }

    fn name(&self) -> &'static str {
        "DebugAgents"
    }
}
