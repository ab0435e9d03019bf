//! Document model and trait implementations.
//!
//! Documents registered through this API are external references: the file
//! itself lives at a caller-provided URL, and Infrakit stores the pointer
//! plus optional survey metadata.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{self, InfrakitClient};
use crate::error::Result;
use crate::traits::Create;

/// A WGS84 point with elevation, attached to geolocated documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeographicPoint {
    pub lat: f64,
    pub lon: f64,
    pub elevation: f64,
}

/// A document record as echoed by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub folder_uuid: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub geographic_point: Option<GeographicPoint>,
}

/// Parameters for registering an external document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCreateParams {
    /// Display name of the document.
    pub name: String,

    /// Where the document content lives.
    pub url: String,

    /// Numeric id of the owning project.
    pub project_id: i64,

    /// UUID of the folder to file the document under.
    pub folder_uuid: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Location to pin the document to on the map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geographic_point: Option<GeographicPoint>,
}

#[async_trait]
impl Create for Document {
    type Params = DocumentCreateParams;
    type Output = Document;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &InfrakitClient, params: Self::Params) -> Result<Self::Output> {
        let value = client.post("document/external", &params).await?;
        client::from_value(value)
    }
}
