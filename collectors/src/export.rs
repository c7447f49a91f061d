//! # Export Snapshot
//!
//! Captures the raw payload of every swxtch endpoint once and writes two files
//! from which a mock server can be scaffolded:
//!
//! - `db.json`: method name → last fetched JSON (`null` when the fetch failed)
//! - `routes.json`: `/<path>/<method>` → method name

use crate::{
    endpoint::EndpointSpec,
    fetcher::Fetcher,
};
use eyre::{
    Context as _,
    Result,
};
use futures::future::join_all;
use serde::Serialize;
use serde_json::{
    ser::PrettyFormatter,
    Map,
    Value,
};
use std::path::{
    Path,
    PathBuf,
};

pub const DB_FILE: &str = "db.json";
pub const ROUTES_FILE: &str = "routes.json";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    db: Map<String, Value>,
    routes: Map<String, Value>,
}

impl Snapshot {
    /// Fetches all `endpoints` concurrently, keeping their order in the output.
    pub async fn capture(fetcher: &Fetcher, endpoints: &[EndpointSpec]) -> Self {
        let payloads = join_all(endpoints.iter().map(|endpoint| fetcher.fetch(endpoint))).await;

        let mut snapshot = Self::default();
        for (endpoint, payload) in endpoints.iter().zip(payloads) {
            snapshot.insert(endpoint, payload);
        }
        info!(endpoints = endpoints.len(), "captured snapshot");
        snapshot
    }

    pub fn insert(&mut self, endpoint: &EndpointSpec, payload: Option<Value>) {
        self.db.insert(endpoint.method.clone(), payload.unwrap_or(Value::Null));
        self.routes
            .insert(endpoint.route(), Value::String(endpoint.method.clone()));
    }

    pub fn db(&self) -> &Map<String, Value> {
        &self.db
    }

    pub fn routes(&self) -> &Map<String, Value> {
        &self.routes
    }

    /// Writes `db.json` and `routes.json` into `directory`, returning both paths.
    pub fn write_to(&self, directory: &Path) -> Result<(PathBuf, PathBuf)> {
        std::fs::create_dir_all(directory)
            .wrap_err_with(|| format!("Failed to create export directory {:?}", directory))?;

        let db_path = directory.join(DB_FILE);
        write_pretty(&db_path, &self.db)?;
        let routes_path = directory.join(ROUTES_FILE);
        write_pretty(&routes_path, &self.routes)?;

        Ok((db_path, routes_path))
    }
}

fn write_pretty(path: &Path, value: &impl Serialize) -> Result<()> {
    let mut content = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut content, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .wrap_err_with(|| format!("Failed to serialize {:?}", path))?;
    std::fs::write(path, content).wrap_err_with(|| format!("Failed to write {:?}", path))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::endpoint::DEBUG_PATH;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use temp_dir::TempDir;

    #[test]
    fn writes_db_and_routes_with_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let mut snapshot = Snapshot::default();
        snapshot.insert(
            &EndpointSpec::new("h", DEBUG_PATH, "serviceStatus"),
            Some(json!({"status": "ok"})),
        );
        snapshot.insert(&EndpointSpec::new("h", DEBUG_PATH, "agents"), None);

        let (db_path, routes_path) = snapshot.write_to(&dir.path().join("out")).unwrap();

        let db = std::fs::read_to_string(db_path).unwrap();
        assert_eq!(
            db,
            "{\n    \"serviceStatus\": {\n        \"status\": \"ok\"\n    },\n    \"agents\": null\n}"
        );
        let routes: Value = serde_json::from_str(&std::fs::read_to_string(routes_path).unwrap()).unwrap();
        assert_eq!(
            routes,
            json!({
                "/swxtch/debug/v1/serviceStatus": "serviceStatus",
                "/swxtch/debug/v1/agents": "agents",
            })
        );
    }
}
