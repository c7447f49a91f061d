use crate::{
    collectors::{
        mesh::parse_record,
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

pub const DOCUMENT_NAME: &str = "switch_agent_sub";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentSubscription {
    mcast_group_ip: String,
    subscribed_agents: Map<String, Value>,
}

/// One document per multicast group listing the agents subscribed to it.
pub struct SwitchAgentSubscriptions {
    endpoint: EndpointSpec,
    fetcher: Fetcher,
}

impl SwitchAgentSubscriptions {
    pub fn new(host: &str, fetcher: Fetcher) -> Self {
        Self {
            endpoint: EndpointSpec::new(host, MESH_TOOL_PATH, "listAgentSubscription"),
            fetcher,
        }
    }

    pub fn flatten(host: &str, payload: &Value) -> Vec<Document> {
        let Some(records) = payload.as_array() else {
            return Vec::new();
        };

        records
            .iter()
            .filter_map(|record| parse_record::<AgentSubscription>(record, DOCUMENT_NAME))
            .map(|sub| {
                let fields = Fields::from([
                    ("mcastgroupip".to_string(), FieldValue::from(sub.mcast_group_ip)),
                    (
                        "subagents".to_string(),
                        FieldValue::from(key_value_pairs(&sub.subscribed_agents)),
                    ),
                ]);
                Document::new(DOCUMENT_NAME, host, fields)
            })
            .collect()
    }
}

impl Collector for SwitchAgentSubscriptions {
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
        "SwitchAgentSubscriptions"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn stringifies_subscribed_agents() {
        let payload = json!([{"mcastGroupIp": "239.0.0.1", "subscribedAgents": {"ag1": "1.2.3.4"}}]);

        let documents = SwitchAgentSubscriptions::flatten("h", &payload);

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].name, "switch_agent_sub");
        assert_eq!(
            documents[0].fields,
            Fields::from([
                ("mcastgroupip".to_string(), FieldValue::from("239.0.0.1")),
                ("subagents".to_string(), FieldValue::TextList(vec!["ag1:1.2.3.4".to_string()])),
            ])
        );
    }

    #[test]
    fn skips_records_without_agent_mapping() {
        let payload = json!([
            {"mcastGroupIp": "239.0.0.1", "subscribedAgents": ["ag1"]},
            {"mcastGroupIp": "239.0.0.2"},
            {"mcastGroupIp": "239.0.0.3", "subscribedAgents": {}},
        ]);

        let documents = SwitchAgentSubscriptions::flatten("h", &payload);

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].field("mcastgroupip"), Some(&FieldValue::from("239.0.0.3")));
        assert_eq!(documents[0].field("subagents"), Some(&FieldValue::TextList(Vec::new())));
    }
}
