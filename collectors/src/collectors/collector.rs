use crate::{
    document::Document,
    endpoint::EndpointSpec,
};
use std::{
    future::Future,
    pin::Pin,
};

/// Trait for fetching one logical endpoint and flattening it into documents
pub trait Collector: Send + Sync {
    /// Fetch and flatten. Never fails; unusable data yields no documents.
    fn collect(&self) -> Pin<Box<dyn Future<Output = Vec<Document>> + Send + '_>>;

    /// The upstream endpoints this collector reads from
    fn endpoints(&self) -> Vec<EndpointSpec>;

    /// Get the name of this collector
    fn name(&self) -> &'static str;
}
