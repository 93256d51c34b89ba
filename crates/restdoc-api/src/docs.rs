//! API documentation export
//!
//! Builds a serializable description of a set of endpoints. Schemas are
//! exported with [`Schema::export`](restdoc_validation::Schema::export), so
//! user checks appear only as their failure messages.

use crate::endpoint::{Endpoint, ResponseDoc};
use crate::error::ApiResult;
use restdoc_common::{HttpMethod, HttpStatus};
use restdoc_validation::ExportedSchema;
use serde::{Deserialize, Serialize};

/// Documentation for a whole API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<EndpointDoc>,
}

impl ApiDocument {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            endpoints: Vec::new(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Add an endpoint to the document
    pub fn endpoint(mut self, endpoint: &Endpoint) -> Self {
        self.endpoints.push(EndpointDoc::from(endpoint));
        self
    }

    /// Look up an endpoint by method and path
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<&EndpointDoc> {
        self.endpoints
            .iter()
            .find(|e| e.method == method && e.path == path)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> ApiResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> ApiResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_json(json: &str) -> ApiResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml(yaml: &str) -> ApiResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Documentation for one endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDoc {
    pub method: HttpMethod,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ExportedSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<ExportedSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<ExportedSchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<ResponseEntry>,
}

impl From<&Endpoint> for EndpointDoc {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            method: endpoint.method(),
            path: endpoint.path().to_string(),
            summary: endpoint.summary_text().map(str::to_string),
            description: endpoint.description_text().map(str::to_string),
            tags: endpoint.tags().to_vec(),
            params: endpoint.params_schema().map(|s| s.export()),
            query: endpoint.query_schema().map(|s| s.export()),
            body: endpoint.body_schema().map(|s| s.export()),
            responses: endpoint.responses().iter().map(ResponseEntry::from).collect(),
        }
    }
}

/// A documented response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub status: HttpStatus,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<ExportedSchema>,
}

impl From<&ResponseDoc> for ResponseEntry {
    fn from(response: &ResponseDoc) -> Self {
        Self {
            status: response.status,
            description: response.description.clone(),
            schema: response.schema.as_ref().map(|s| s.export()),
        }
    }
}
