//! # Collectors Module
//!
//! One collector per logical swxtch endpoint, each turning a JSON payload
//! into flat [`Document`](crate::Document)s.
//!
//! ## Architecture
//!
//! - **`Collector` trait**: fetch + flatten, never fails
//! - **`DebugStatus`**: service status and uptime (`serviceStatus`, `startTime`)
//! - **`DebugAgents`**: agent records (`agents`)
//! - **`SwitchLinks`**: per-mesh switch links (`listSwitchLinks`)
//! - **`SwitchRouteTable`**: per-mesh routes (`listSwitchRouteTable`)
//! - **`SwitchAgentSubscriptions`**: multicast agent subscriptions (`listAgentSubscription`)
//! - **`SwitchSubscriptions`**: per-mesh multicast switch subscriptions (`listSwitchSubscription`)
//! - **`Aggregator`**: runs all of the above concurrently and merges the results
//!
//! Every collector also exposes a pure `flatten` function over an already
//! fetched payload. Malformed records are skipped one by one.

pub mod agent_subscriptions;
pub mod aggregator;
pub mod collector;
pub mod debug_agents;
pub mod debug_status;
mod mesh;
pub mod switch_links;
pub mod switch_route_table;
pub mod switch_subscriptions;

// Re-export the main types for easy access
pub use agent_subscriptions::SwitchAgentSubscriptions;
pub use aggregator::Aggregator;
pub use collector::Collector;
pub use debug_agents::DebugAgents;
pub use debug_status::DebugStatus;
pub use switch_links::SwitchLinks;
pub use switch_route_table::SwitchRouteTable;
pub use switch_subscriptions::SwitchSubscriptions;
