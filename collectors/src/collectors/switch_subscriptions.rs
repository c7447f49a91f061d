use crate::{
    collectors::{
        mesh::{
            meshes,
            parse_record,
        },
        Collector,
    },
    document::{
        key_value_pairs,
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
use serde_json::{
    Map,
    Value,
};
use std::{
    future::Future,
    pin::Pin,
};

pub const DOCUMENT_NAME: &str = "switch_sub";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwitchSubscription {
    mcast_group_ip: String,
    subscribed_switch_map: Map<String, Value>,
}

/// One document per multicast group subscription of every mesh.
pub struct SwitchSubscriptions {
    endpoint: EndpointSpec,
    fetcher: Fetcher,
}

impl SwitchSubscriptions {
    pub fn new(host: &str, fetcher: Fetcher) -> Self {
        Self {
            endpoint: EndpointSpec::new(host, MESH_TOOL_PATH, "listSwitchSubscription"),
            fetcher,
        }
    }

    pub fn flatten(host: &str, payload: &Value) -> Vec<Document> {
        meshes(payload, "mcastGroupSwitchData")
            .flat_map(|mesh| {
                mesh.entries
                    .iter()
                    .filter_map(|entry| parse_record::<SwitchSubscription>(entry, DOCUMENT_NAME))
                    .map(move |sub| {
                        let fields = Fields::from([
                            ("meshname".to_string(), FieldValue::from(mesh.name)),
                            ("mcastgroupip".to_string(), FieldValue::from(sub.mcast_group_ip)),
                            (
                                "subswitchmap".to_string(),
                                FieldValue::from(key_value_pairs(&sub.subscribed_switch_map)),
                            ),
                        ]);
                        Document::new(DOCUMENT_NAME, host, fields)
                    })
            })
            .collect()
    }
}

impl Collector for SwitchSubscriptions {
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
        "SwitchSubscriptions"
    }
}
