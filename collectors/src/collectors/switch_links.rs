use crate::{
    collectors::{
        mesh::{
            meshes,
            parse_record,
        },
        Collector,
    },
    document::{
        Document,
        FieldValue,
        Fields,
    },
    endpoint::{
        EndpointSpec,
        MESH_TOOL_PATH,
    },
    fetcher::Fetcher,
};
use serde::Deserialize;
use serde_json::Value;
use std::{
    future::Future,
    pin::Pin,
};

pub const DOCUMENT_NAME: &str = "switch_links";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwitchLink {
    switch: String,
    switch_links: Vec<String>,
}

/// One document per switch link of every mesh.
pub struct SwitchLinks {
    endpoint: EndpointSpec,
    fetcher: Fetcher,
}

impl SwitchLinks {
    pub fn new(host: &str, fetcher: Fetcher) -> Self {
        Self {
            endpoint: EndpointSpec::new(host, MESH_TOOL_PATH, "listSwitchLinks"),
            fetcher,
        }
    }

    pub fn flatten(host: &str, payload: &Value) -> Vec<Document> {
        meshes(payload, "switchLinksList")
            .flat_map(|mesh| {
                mesh.entries
                    .iter()
                    .filter_map(|entry| parse_record::<SwitchLink>(entry, DOCUMENT_NAME))
                    .map(move |link| {
                        let fields = Fields::from([
                            ("meshname".to_string(), FieldValue::from(mesh.name)),
                            ("switch".to_string(), FieldValue::from(link.switch)),
                            ("switchlinks".to_string(), FieldValue::from(link.switch_links)),
                        ]);
                        Document::new(DOCUMENT_NAME, host, fields)
                    })
            })
            .collect()
    }
}

impl Collector for SwitchLinks {
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
        "SwitchLinks"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn one_document_per_link() {
        let payload = json!([{"meshName": "m1", "switchLinksList": [{"switch": "sw1", "switchLinks": ["a", "b"]}]}]);

        let documents = SwitchLinks::flatten("h", &payload);

        assert_eq!(
            documents,
            vec![Document::new(
                "switch_links",
                "h",
                Fields::from([
                    ("meshname".to_string(), FieldValue::Text("m1".to_string())),
                    ("switch".to_string(), FieldValue::Text("sw1".to_string())),
                    (
                        "switchlinks".to_string(),
                        FieldValue::TextList(vec!["a".to_string(), "b".to_string()])
                    ),
                ])
            )]
        );
    }

    #[test]
    fn malformed_links_are_skipped_in_order() {
        let payload = json!([
            {"meshName": "m1", "switchLinksList": [
                {"switch": "sw1", "switchLinks": ["a"]},
                {"switch": "sw2"},
                {"switch": "sw3", "switchLinks": "not-a-list"},
                {"switch": "sw4", "switchLinks": []},
            ]},
            {"meshName": "m2", "switchLinksList": null},
            {"meshName": "m3", "switchLinksList": [{"switch": "sw5", "switchLinks": ["c"]}]},
        ]);

        let switches: Vec<_> = SwitchLinks::flatten("h", &payload)
            .into_iter()
            .map(|doc| (doc.field("meshname").cloned(), doc.field("switch").cloned()))
            .collect();

        assert_eq!(
            switches,
            vec![
                (Some(FieldValue::from("m1")), Some(FieldValue::from("sw1"))),
                (Some(FieldValue::from("m1")), Some(FieldValue::from("sw4"))),
                (Some(FieldValue::from("m3")), Some(FieldValue::from("sw5"))),
            ]
        );
    }

    #[test]
    fn unexpected_payloads_yield_nothing() {
        assert!(SwitchLinks::flatten("h", &json!({"error": "nope"})).is_empty());
        assert!(SwitchLinks::flatten("h", &json!([])).is_empty());
        assert!(SwitchLinks::flatten("h", &json!("text")).is_empty());
    }
}
