use std::fmt;

/// Path prefix of the service debug API.
pub const DEBUG_PATH: &str = "swxtch/debug/v1";
/// Path prefix of the mesh tooling API.
pub const MESH_TOOL_PATH: &str = "swxtch/mesh/v1/tool";

/// One upstream API method on a given host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointSpec {
    pub host: String,
    pub path: String,
    pub method: String,
}

impl EndpointSpec {
    pub fn new(host: impl Into<String>, path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            method: method.into(),
        }
    }

    /// `http://{host}/{path}/{method}`
    pub fn url(&self) -> String {
        format!("http://{}/{}/{}", self.host, self.path, self.method)
    }

    /// `/{path}/{method}`, the route a mock server has to answer.
    pub fn route(&self) -> String {
        format!("/{}/{}", self.path, self.method)
    }
}

impl fmt::Display for EndpointSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_url_and_route() {
        let endpoint = EndpointSpec::new("10.1.2.3:80", MESH_TOOL_PATH, "listSwitchLinks");
        assert_eq!(endpoint.url(), "http://10.1.2.3:80/swxtch/mesh/v1/tool/listSwitchLinks");
        assert_eq!(endpoint.route(), "/swxtch/mesh/v1/tool/listSwitchLinks");
    }
}
