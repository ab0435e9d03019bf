//! Project model and trait implementations.
//!
//! Projects are the top-level containers in Infrakit: folders, documents
//! and logpoints all hang off a project. The list endpoint returns the full
//! project set for the authenticated account.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{self, InfrakitClient};
use crate::credentials::Credentials;
use crate::error::{InfrakitError, Result};
use crate::export::ExportStream;
use crate::models::folder::Folder;
use crate::traits::{Create, List};

/// An Infrakit project.
///
/// Carries a back-reference to the credentials that fetched it so follow-up
/// calls (`folders`, `export`) can refuse a client holding different
/// credentials. The back-reference is an association, not ownership; it is
/// never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Numeric project id.
    pub id: i64,

    /// Project UUID, used in path segments of follow-up calls.
    pub uuid: String,

    /// Human-readable project name.
    pub name: String,

    /// Server-side creation timestamp (epoch milliseconds).
    pub timestamp: i64,

    /// Whether the project has been archived.
    pub archived: bool,

    /// Whether reporting is enabled for this project.
    pub reports_enabled: bool,

    /// Owning organization.
    #[serde(default)]
    pub organization: Option<Organization>,

    /// Projected coordinate system the project surveys in.
    #[serde(default)]
    pub coordinate_system: Option<CoordinateSystem>,

    /// Height system the project surveys in.
    #[serde(default)]
    pub height_system: Option<HeightSystem>,

    #[serde(skip)]
    pub(crate) origin: Option<Arc<Credentials>>,
}

/// Organization owning a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Projected coordinate system description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateSystem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
    /// Full proj4 string for the projection.
    #[serde(default)]
    pub proj_string: Option<String>,
    #[serde(default)]
    pub wgs84_parameters: Option<String>,
    /// Northing offset applied on top of the projection.
    #[serde(default)]
    pub offset_n: Option<f64>,
    /// Easting offset applied on top of the projection.
    #[serde(default)]
    pub offset_e: Option<f64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
}

/// Height system description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeightSystem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
}

impl Project {
    /// List this project's folder tree.
    ///
    /// `depth` limits how many levels of nesting the server expands;
    /// `0` returns only the top level.
    ///
    /// # Errors
    ///
    /// Returns [`InfrakitError::CredentialMismatch`] if `client` holds
    /// different credentials than the ones that fetched this record, or any
    /// dispatch error.
    pub async fn folders(&self, client: &InfrakitClient, depth: u32) -> Result<Vec<Folder>> {
        self.check_origin(client)?;

        let path = format!(
            "project/{}/folders",
            urlencoding::encode(&self.uuid)
        );
        let value = client
            .get_with_query(&path, &[("depth", depth)])
            .await?;

        let response: ProjectFoldersResponse = client::from_value(value)?;
        Ok(response.folders)
    }

    /// Download this project's export as a lazy NDJSON record stream.
    ///
    /// # Errors
    ///
    /// Returns [`InfrakitError::CredentialMismatch`] on a credential
    /// mismatch, or any dispatch error. Per-record parse failures surface
    /// from the returned stream.
    pub async fn export(&self, client: &InfrakitClient) -> Result<ExportStream<Value>> {
        self.check_origin(client)?;

        let path = format!("project/{}/export", urlencoding::encode(&self.uuid));
        let response = client.get_stream(&path).await?;
        Ok(ExportStream::new(response))
    }

    fn check_origin(&self, client: &InfrakitClient) -> Result<()> {
        match &self.origin {
            Some(origin) if !client.holds(origin) => Err(InfrakitError::CredentialMismatch),
            _ => Ok(()),
        }
    }
}

/// Query parameters for listing projects.
///
/// Both filters are omitted from the request unless set.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListQuery {
    /// Restrict the listing to organization-level projects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_projects: Option<bool>,

    /// Restrict the listing to one organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_uuid: Option<String>,
}

/// Parameters for creating a project.
///
/// Only `name` is required; every optional field left as `None` is absent
/// from the outbound payload rather than sent as null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreateParams {
    /// Project name.
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<CoordinateSystem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_system: Option<HeightSystem>,

    /// Cross-section view width in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_section_width: Option<f64>,

    /// Vertical exaggeration of the cross-section view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_section_y_scale: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_section_logpoint_delta: Option<f64>,

    /// Planned project end date, ISO-8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,

    /// Server-defined tolerance object; shape varies per deployment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_tolerance: Option<Value>,

    /// Optimistic-locking counter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_lock: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub truck_mode: Option<i32>,
}

impl ProjectCreateParams {
    /// Start a creation payload with only the required name set.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            coordinate_system: None,
            height_system: None,
            cross_section_width: None,
            cross_section_y_scale: None,
            cross_section_logpoint_delta: None,
            end_date: None,
            hidden: None,
            accuracy_tolerance: None,
            opt_lock: None,
            reports_enabled: None,
            truck_mode: None,
        }
    }
}

/// Server response to a project creation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectCreationResponse {
    /// Always `true` on success; `false` answers are rejected by the
    /// dispatcher before reaching this type.
    pub status: bool,
    /// UUID of the new project.
    pub uuid: String,
    /// Numeric id of the new project.
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ProjectFoldersResponse {
    #[serde(default)]
    folders: Vec<Folder>,
}

#[async_trait]
impl List for Project {
    type Query = ProjectListQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &InfrakitClient, query: &Self::Query) -> Result<Vec<Self>> {
        let value = client.get_with_query("projects", query).await?;
        let mut projects: Vec<Project> = client::from_value(value)?;
        for project in &mut projects {
            project.origin = Some(client.credentials_arc());
        }
        Ok(projects)
    }
}

#[async_trait]
impl Create for Project {
    type Params = ProjectCreateParams;
    type Output = ProjectCreationResponse;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &InfrakitClient, params: Self::Params) -> Result<Self::Output> {
        let value = client.post("project", &params).await?;
        client::from_value(value)
    }
}
