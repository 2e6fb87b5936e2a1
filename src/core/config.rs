use std::env;

pub const MCP_SERVICE_URL_VAR: &str = "MCP_SERVICE_URL";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub mcp_service_url: String,
}

impl RelayConfig {
    #[must_use]
    pub fn new(mcp_service_url: impl Into<String>) -> Self {
        Self {
            mcp_service_url: mcp_service_url.into(),
        }
    }

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            mcp_service_url: env::var(MCP_SERVICE_URL_VAR)
                .map_err(|e| format!("{}: {}", MCP_SERVICE_URL_VAR, e))?,
        })
    }
}
