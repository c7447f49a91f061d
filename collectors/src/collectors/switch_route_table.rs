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

pub const DOCUMENT_NAME: &str = "switch_route_table";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwitchRoute {
    switch_dst: String,
    switch_links: Vec<String>,
}

/// One document per route of every mesh's switch route table.
pub struct SwitchRouteTable {
    endpoint: EndpointSpec,
    fetcher: Fetcher,
}

impl SwitchRouteTable {
    pub fn new(host: &str, fetcher: Fetcher) -> Self {
        Self {
            endpoint: EndpointSpec::new(host, MESH_TOOL_PATH, "listSwitchRouteTable"),
            fetcher,
        }
    }

    pub fn flatten(host: &str, payload: &Value) -> Vec<Document> {
        meshes(payload, "switchRouteList")
            .flat_map(|mesh| {
                mesh.entries
                    .iter()
                    .filter_map(|entry| parse_record::<SwitchRoute>(entry, DOCUMENT_NAME))
                    .map(move |route| {
                        let fields = Fields::from([
                            ("meshname".to_string(), FieldValue::from(mesh.name)),
                            ("switchdst".to_string(), FieldValue::from(route.switch_dst)),
                            ("switchlinks".to_string(), FieldValue::from(route.switch_links)),
                        ]);
                        Document::new(DOCUMENT_NAME, host, fields)
                    })
            })
            .collect()
    }
}

impl Collector for SwitchRouteTable {
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
        "SwitchRouteTable"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn one_document_per_route() {
        let payload = json!([
            {"meshName": "m1", "switchRouteList": [
                {"switchDst": "sw2", "switchLinks": ["sw1->sw2"]},
                {"switchDst": "sw3", "switchLinks": ["sw1->sw2", "sw2->sw3"]},
            ]},
        ]);

        let documents = SwitchRouteTable::flatten("h", &payload);

        assert_eq!(documents.len(), 2);
        assert!(documents.iter().all(|doc| doc.name == "switch_route_table"));
        assert_eq!(documents[0].field("switchdst"), Some(&FieldValue::from("sw2")));
        assert_eq!(
            documents[1].fields,
            Fields::from([
                ("meshname".to_string(), FieldValue::from("m1")),
                ("switchdst".to_string(), FieldValue::from("sw3")),
                (
                    "switchlinks".to_string(),
                    FieldValue::TextList(vec!["sw1->sw2".to_string(), "sw2->sw3".to_string()])
                ),
            ])
        );
    }

    #[test]
    fn skips_routes_missing_a_destination() {
        let payload = json!([
            {"meshName": "m1", "switchRouteList": [{"switchLinks": []}, {"switchDst": "sw9", "switchLinks": []}]},
            {"meshName": "m2"},
        ]);

        let documents = SwitchRouteTable::flatten("h", &payload);

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].field("switchdst"), Some(&FieldValue::from("sw9")));
    }
}
