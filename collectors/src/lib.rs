//! # Swxtch Poller Collectors
//!
//! Polls the JSON API of a swxtch management service and reshapes every
//! response into flat [`Document`]s for a time-series or logging pipeline.
//!
//! ## Architecture
//!
//! - **`fetcher`**: GET with timeout, tolerant TLS, failures reported not raised
//! - **`report`**: where fetch failures go (host-named log file or `tracing`)
//! - **`collectors`**: six endpoint collectors plus the concurrent `Aggregator`
//! - **`export`**: raw `db.json`/`routes.json` snapshot for mock servers
//! - **`plugin`**: `fetch(hosts)` adapter for an external poller framework
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run() -> eyre::Result<()> {
//! use swxtch_poller_collectors::{Aggregator, Fetcher};
//!
//! let aggregator = Aggregator::new("localhost:3000", Fetcher::with_defaults()?);
//! let documents = aggregator.collect_all().await;
//! println!("{}", serde_json::to_string_pretty(&documents)?);
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate tracing;

pub mod collectors;
pub mod document;
pub mod endpoint;
pub mod export;
pub mod fetcher;
pub mod plugin;
pub mod report;

pub use collectors::*;
pub use document::{
    Document,
    FieldValue,
    Fields,
};
pub use endpoint::EndpointSpec;
pub use export::Snapshot;
pub use fetcher::Fetcher;
pub use plugin::PollerPlugin;
pub use report::{
    ErrorReporter,
    FileErrorReporter,
    TracingErrorReporter,
};
