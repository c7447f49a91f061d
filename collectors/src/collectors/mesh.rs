//! Shared walking of the mesh tooling payloads.
//!
//! `listSwitchLinks`, `listSwitchRouteTable` and `listSwitchSubscription` all
//! answer with a list of meshes, each carrying a `meshName` and one list of
//! entries under an endpoint specific key.

use serde::Deserialize;
use serde_json::Value;

/// A validated mesh: its name and its (non-empty) entry list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Mesh<'a> {
    pub(crate) name: &'a str,
    pub(crate) entries: &'a [Value],
}

/// Yields every usable mesh of `payload`.
///
/// A non-list payload yields nothing. Meshes without a string `meshName` or
/// without a non-empty list under `entries_key` are skipped.
pub(crate) fn meshes<'a>(payload: &'a Value, entries_key: &'a str) -> impl Iterator<Item = Mesh<'a>> + 'a {
    payload
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter_map(move |mesh| {
            let entries = mesh.get(entries_key).and_then(Value::as_array).filter(|e| !e.is_empty())?;
            let Some(name) = mesh.get("meshName").and_then(Value::as_str) else {
                debug!(%entries_key, "skipping mesh without a name");
                return None;
            };
            Some(Mesh { name, entries })
        })
}

/// Parses one record, logging and discarding it when it does not have the
/// expected shape.
pub(crate) fn parse_record<'a, T: Deserialize<'a>>(record: &'a Value, kind: &str) -> Option<T> {
    match T::deserialize(record) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(%kind, "skipping malformed record: {err}");
            None
        }
    }
}
